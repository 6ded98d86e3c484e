//! Crate-level error type

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use crate::world::WorldPos;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by world mutation, configuration and persistence.
///
/// Signal and attachment computation never produce these; they treat
/// missing data as "no signal" instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Chunk containing {position} is not loaded")]
    ChunkNotLoaded { position: WorldPos },

    #[error("Invalid block for position {position}")]
    InvalidBlock { position: WorldPos },
}
