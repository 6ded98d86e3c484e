use crate::constants::core::BLOCKS_PER_CHUNK;
use crate::constants::persistence::{CHUNK_FORMAT_VERSION, CHUNK_MAGIC, MAX_CHUNK_DATA_SIZE};
use crate::persistence::{corrupted_data, PersistenceError, PersistenceResult, Reader, Writer};
use crate::world::{Block, BlockId, BlockRegistry, Chunk, ChunkKey, ChunkPos, Dimension, LightLevel};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Header for serialized chunks
#[derive(Debug, Serialize, Deserialize)]
struct ChunkHeader {
    magic: [u8; 4],
    version: u32,
    dimension: Dimension,
    chunk_pos: ChunkPos,
    compressed: bool,
    palette_len: u32,
    payload_len: u32,
    checksum: u32,
}

/// Serializes and deserializes chunks.
///
/// The payload is a palette of descriptor names followed by one record per
/// cell: palette index, packed light, then whatever the descriptor writes
/// as its block data.
#[derive(Debug, Clone, Copy)]
pub struct ChunkSerializer {
    compress: bool,
}

impl ChunkSerializer {
    pub fn new(compress: bool) -> Self {
        Self { compress }
    }

    /// Serialize a chunk to bytes
    pub fn serialize(&self, chunk: &Chunk, registry: &BlockRegistry) -> PersistenceResult<Vec<u8>> {
        let mut palette: Vec<BlockId> = Vec::new();
        let mut palette_index: FxHashMap<BlockId, u16> = FxHashMap::default();
        let mut body = Vec::new();
        {
            let mut writer = Writer::new(&mut body);
            for block in chunk.blocks() {
                let descriptor = registry
                    .descriptor(block)
                    .ok_or_else(|| corrupted_data("chunk contains an unregistered block"))?;
                let id = block.descriptor.unwrap_or_default();
                let index = match palette_index.get(&id) {
                    Some(index) => *index,
                    None => {
                        let index = palette.len() as u16;
                        palette.push(id);
                        palette_index.insert(id, index);
                        index
                    }
                };
                writer.write_u16(index)?;
                writer.write_u8(block.light.pack())?;
                descriptor.write_block_data(block, &mut writer)?;
            }
        }

        let mut raw = Vec::with_capacity(body.len() + palette.len() * 32);
        {
            let mut writer = Writer::new(&mut raw);
            for id in &palette {
                let name = registry
                    .name_of(*id)
                    .ok_or_else(|| corrupted_data(format!("no descriptor for {}", id)))?;
                writer.write_string(name)?;
            }
        }
        raw.extend_from_slice(&body);

        let payload = if self.compress { compress(&raw)? } else { raw };
        let key = chunk.key();
        let header = ChunkHeader {
            magic: CHUNK_MAGIC,
            version: CHUNK_FORMAT_VERSION,
            dimension: key.dimension,
            chunk_pos: key.pos,
            compressed: self.compress,
            palette_len: palette.len() as u32,
            payload_len: payload.len() as u32,
            checksum: checksum(&payload),
        };

        let mut data = bincode::serialize(&header)?;
        data.extend_from_slice(&payload);
        log::trace!(
            "Serialized chunk {:?}: {} palette entries, {} bytes",
            key,
            palette.len(),
            data.len()
        );
        Ok(data)
    }

    /// Deserialize a chunk from bytes
    pub fn deserialize(&self, data: &[u8], registry: &BlockRegistry) -> PersistenceResult<Chunk> {
        let header: ChunkHeader = bincode::deserialize(data)?;
        if header.magic != CHUNK_MAGIC {
            return Err(corrupted_data("Invalid chunk magic"));
        }
        if header.version != CHUNK_FORMAT_VERSION {
            return Err(PersistenceError::VersionMismatch {
                expected: CHUNK_FORMAT_VERSION,
                found: header.version,
            });
        }

        // every palette entry is used by at least one cell
        if header.palette_len as usize > BLOCKS_PER_CHUNK {
            return Err(corrupted_data(format!(
                "palette has {} entries, a chunk holds {} blocks",
                header.palette_len, BLOCKS_PER_CHUNK
            )));
        }

        let header_size = bincode::serialized_size(&header)? as usize;
        let payload = &data[header_size.min(data.len())..];
        if payload.len() != header.payload_len as usize {
            return Err(corrupted_data(format!(
                "payload is {} bytes, header says {}",
                payload.len(),
                header.payload_len
            )));
        }
        if checksum(payload) != header.checksum {
            return Err(corrupted_data("Checksum mismatch"));
        }

        let raw = if header.compressed {
            decompress(payload, MAX_CHUNK_DATA_SIZE)?
        } else {
            payload.to_vec()
        };

        let mut cursor = std::io::Cursor::new(raw.as_slice());
        let mut reader = Reader::new(&mut cursor);

        let mut palette = Vec::with_capacity(header.palette_len as usize);
        for _ in 0..header.palette_len {
            let name = reader.read_string()?;
            let id = registry
                .get_id(&name)
                .ok_or(PersistenceError::UnknownDescriptor(name))?;
            palette.push(id);
        }

        let mut chunk = Chunk::new(ChunkKey::new(header.chunk_pos, header.dimension));
        for index in 0..BLOCKS_PER_CHUNK {
            let palette_index = reader.read_u16()? as usize;
            let id = *palette.get(palette_index).ok_or_else(|| {
                corrupted_data(format!(
                    "palette index {} out of range ({} entries)",
                    palette_index,
                    palette.len()
                ))
            })?;
            let light = LightLevel::unpack(reader.read_u8()?);
            let descriptor = registry
                .get(id)
                .ok_or_else(|| corrupted_data(format!("no descriptor for {}", id)))?;
            let block = Block {
                descriptor: Some(id),
                light,
                data: descriptor.read_block_data(&mut reader)?,
            };
            if !registry.is_good(&block) {
                return Err(PersistenceError::InvalidBlockData {
                    name: descriptor.name().to_string(),
                    reason: "descriptor rejected its block data".to_string(),
                });
            }
            let (x, y, z) = Chunk::local_pos_of(index);
            chunk.set_block(x, y, z, block);
        }

        if (cursor.position() as usize) != raw.len() {
            return Err(corrupted_data("trailing bytes after chunk data"));
        }
        chunk.mark_clean();
        Ok(chunk)
    }
}

fn checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

fn compress(data: &[u8]) -> PersistenceResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PersistenceError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| PersistenceError::CompressionError(e.to_string()))
}

fn decompress(data: &[u8], limit: u64) -> PersistenceResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data).take(limit + 1);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| PersistenceError::CompressionError(e.to_string()))?;
    if out.len() as u64 > limit {
        return Err(corrupted_data(format!(
            "chunk data inflates past {} bytes",
            limit
        )));
    }
    Ok(out)
}
