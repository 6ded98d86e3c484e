//! World storage and the block-update machinery
//!
//! - **Descriptors**: interned block kinds behind [`BlockDescriptor`], owned by a [`BlockRegistry`]
//! - **Storage**: [`Chunk`]s in a concurrent map, each behind its own mutex
//! - **Access**: [`BlockIterator`] cursors and the [`WorldLockManager`] that holds chunk locks
//! - **Updates**: a tick-keyed [`BlockUpdateQueue`] drained by [`World::tick`]

pub mod block;
pub mod chunk;
pub mod descriptor;
pub mod drops;
pub mod face;
pub mod iterator;
pub mod light;
pub mod lock;
pub mod position;
pub mod registry;
pub mod update;
#[allow(clippy::module_inception)]
pub mod world;

pub use block::{Block, BlockDataRef, BlockId};
pub use chunk::Chunk;
pub use descriptor::{Attachable, BlockDescriptor, RenderLayer};
pub use drops::{DroppedItem, ParticleEmission, ParticleKind};
pub use face::{BlockFace, BlockShape, FaceFlags};
pub use iterator::BlockIterator;
pub use light::{LightLevel, LightProperties};
pub use lock::WorldLockManager;
pub use position::{ChunkKey, ChunkPos, Dimension, VoxelPos, WorldPos};
pub use registry::BlockRegistry;
pub use update::{
    diamond_offsets, BlockUpdate, BlockUpdateKey, BlockUpdateKind, BlockUpdateKinds,
    BlockUpdateQueue,
};
pub use world::{TickStats, World};
