pub mod blocks;
pub mod config;
pub mod constants;
pub mod error;
pub mod persistence;
pub mod redstone;
pub mod world;

pub use blocks::{builtin_registry, register_builtin_blocks, BuiltinBlocks};
pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use persistence::{PersistenceError, PersistenceResult, WorldSave};
pub use redstone::{calculate_redstone_signal, RedstoneSignal, RedstoneSignalComponent};
pub use world::{
    Block, BlockDescriptor, BlockFace, BlockId, BlockIterator, BlockRegistry, BlockUpdateKind,
    Chunk, ChunkKey, ChunkPos, Dimension, TickStats, VoxelPos, World, WorldLockManager, WorldPos,
};

/// Initialize `env_logger`, honoring `RUST_LOG` and falling back to the
/// configured filter. Calling it more than once is harmless.
pub fn init_logging(config: &EngineConfig) {
    let env = env_logger::Env::default().default_filter_or(config.log_filter.as_str());
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
