//! Persistence system for saving and loading worlds
//!
//! Descriptor identity is stored by name, so renaming a block kind breaks old
//! saves. Everything else a descriptor needs goes through its
//! `write_block_data`/`read_block_data` pair over the [`stream`] primitives.

pub mod chunk_serializer;
pub mod stream;
pub mod world_save;

pub use chunk_serializer::ChunkSerializer;
pub use stream::{Reader, Writer};
pub use world_save::WorldSave;

use std::io::Write as _;
use std::path::Path;
use thiserror::Error;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Corrupted data: {0}")]
    CorruptedData(String),

    #[error("Unknown block descriptor '{0}'")]
    UnknownDescriptor(String),

    #[error("Invalid data for block '{name}': {reason}")]
    InvalidBlockData { name: String, reason: String },
}

impl From<bincode::Error> for PersistenceError {
    fn from(err: bincode::Error) -> Self {
        PersistenceError::SerializationError(err.to_string())
    }
}

/// Create a corrupted data error
pub fn corrupted_data(reason: impl Into<String>) -> PersistenceError {
    PersistenceError::CorruptedData(reason.into())
}

/// Write `data` to `path` through a temporary sibling file and a rename, so
/// readers never observe a half-written file
pub fn atomic_write(path: &Path, data: &[u8]) -> PersistenceResult<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| corrupted_data(format!("not a file path: {}", path.display())))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }
    std::fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_replaces_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.bin");

        atomic_write(&path, b"first").expect("write");
        atomic_write(&path, b"second").expect("rewrite");

        assert_eq!(std::fs::read(&path).expect("read"), b"second");
        assert!(!dir.path().join("data.bin.tmp").exists());
    }

    #[test]
    fn test_error_messages() {
        let err = PersistenceError::VersionMismatch { expected: 1, found: 7 };
        assert_eq!(err.to_string(), "Version mismatch: expected 1, found 7");
        let err = PersistenceError::UnknownDescriptor("mod.thing".into());
        assert!(err.to_string().contains("mod.thing"));
    }
}
