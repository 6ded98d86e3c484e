use crate::constants::core::CHUNK_SIZE;
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension a position lives in. Each dimension has its own chunk space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    Overworld,
    Nether,
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Overworld
    }
}

/// Position of a chunk in the world (chunk coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block position of this chunk's minimum corner
    pub fn min_corner(&self) -> VoxelPos {
        let size = CHUNK_SIZE as i32;
        VoxelPos::new(self.x * size, self.y * size, self.z * size)
    }

    /// Create a new chunk position offset by the given amounts
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Position of a voxel in the world (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the chunk this voxel belongs to
    pub fn to_chunk_pos(&self) -> ChunkPos {
        let size = CHUNK_SIZE as i32;
        ChunkPos::new(
            self.x.div_euclid(size),
            self.y.div_euclid(size),
            self.z.div_euclid(size),
        )
    }

    /// Get local position within chunk
    pub fn to_local_pos(&self) -> (u32, u32, u32) {
        let size = CHUNK_SIZE as i32;
        (
            self.x.rem_euclid(size) as u32,
            self.y.rem_euclid(size) as u32,
            self.z.rem_euclid(size) as u32,
        )
    }

    pub fn as_ivec3(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    pub fn offset_by(&self, delta: IVec3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }
}

impl From<IVec3> for VoxelPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Key of a loaded chunk: chunk coordinates plus dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub dimension: Dimension,
    pub pos: ChunkPos,
}

impl ChunkKey {
    pub fn new(pos: ChunkPos, dimension: Dimension) -> Self {
        Self { dimension, pos }
    }
}

/// A block position together with the dimension it is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldPos {
    pub pos: VoxelPos,
    pub dimension: Dimension,
}

impl WorldPos {
    pub fn new(x: i32, y: i32, z: i32, dimension: Dimension) -> Self {
        Self {
            pos: VoxelPos::new(x, y, z),
            dimension,
        }
    }

    /// Shorthand for an overworld position
    pub fn overworld(x: i32, y: i32, z: i32) -> Self {
        Self::new(x, y, z, Dimension::Overworld)
    }

    pub fn chunk_key(&self) -> ChunkKey {
        ChunkKey::new(self.pos.to_chunk_pos(), self.dimension)
    }

    pub fn offset_by(&self, delta: IVec3) -> Self {
        Self {
            pos: self.pos.offset_by(delta),
            dimension: self.dimension,
        }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) in {:?}",
            self.pos.x, self.pos.y, self.pos.z, self.dimension
        )
    }
}
