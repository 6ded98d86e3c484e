//! Byte stream primitives for block data
//!
//! Little-endian integers, one-byte booleans and `u32`-length-prefixed UTF-8
//! strings. Block descriptors only ever see these wrappers, never the
//! underlying file or buffer.

use crate::constants::persistence::MAX_STRING_LENGTH;
use crate::persistence::{corrupted_data, PersistenceResult};
use std::io::{Read, Write};

pub struct Writer<'a> {
    inner: &'a mut dyn Write,
}

impl<'a> Writer<'a> {
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner }
    }

    pub fn write_u8(&mut self, value: u8) -> PersistenceResult<()> {
        self.inner.write_all(&[value])?;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> PersistenceResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> PersistenceResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> PersistenceResult<()> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> PersistenceResult<()> {
        self.write_u8(value as u8)
    }

    pub fn write_string(&mut self, value: &str) -> PersistenceResult<()> {
        let len = u32::try_from(value.len())
            .ok()
            .filter(|len| *len <= MAX_STRING_LENGTH)
            .ok_or_else(|| corrupted_data(format!("string of {} bytes is too long", value.len())))?;
        self.write_u32(len)?;
        self.inner.write_all(value.as_bytes())?;
        Ok(())
    }
}

pub struct Reader<'a> {
    inner: &'a mut dyn Read,
}

impl<'a> Reader<'a> {
    pub fn new(inner: &'a mut dyn Read) -> Self {
        Self { inner }
    }

    fn read_array<const N: usize>(&mut self) -> PersistenceResult<[u8; N]> {
        let mut bytes = [0u8; N];
        self.inner.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> PersistenceResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> PersistenceResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> PersistenceResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> PersistenceResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_bool(&mut self) -> PersistenceResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(corrupted_data(format!("invalid bool byte {}", other))),
        }
    }

    pub fn read_string(&mut self) -> PersistenceResult<String> {
        let len = self.read_u32()?;
        if len > MAX_STRING_LENGTH {
            return Err(corrupted_data(format!("string length {} exceeds maximum", len)));
        }
        let mut bytes = vec![0u8; len as usize];
        self.inner.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|e| corrupted_data(format!("invalid UTF-8: {}", e)))
    }
}
