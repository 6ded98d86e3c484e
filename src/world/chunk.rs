use crate::constants::core::{BLOCKS_PER_CHUNK, CHUNK_SIZE};
use crate::world::{Block, ChunkKey};

/// A 16³ cube of placed blocks
#[derive(Debug, Clone)]
pub struct Chunk {
    key: ChunkKey,
    blocks: Vec<Block>,
    dirty: bool,
    unloaded: bool,
}

impl Chunk {
    /// Create a chunk filled with air
    pub fn new(key: ChunkKey) -> Self {
        Self {
            key,
            blocks: vec![Block::air(); BLOCKS_PER_CHUNK],
            dirty: true,
            unloaded: false,
        }
    }

    /// Get the chunk key
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    /// Get block at local position; out-of-range coordinates yield the "not good" sentinel
    pub fn get_block(&self, x: u32, y: u32, z: u32) -> Block {
        if x >= CHUNK_SIZE || y >= CHUNK_SIZE || z >= CHUNK_SIZE {
            return Block::not_good();
        }
        self.blocks
            .get(Self::index(x, y, z))
            .cloned()
            .unwrap_or_default()
    }

    /// Set block at local position
    pub fn set_block(&mut self, x: u32, y: u32, z: u32, block: Block) {
        if x >= CHUNK_SIZE || y >= CHUNK_SIZE || z >= CHUNK_SIZE {
            return;
        }
        if let Some(slot) = self.blocks.get_mut(Self::index(x, y, z)) {
            *slot = block;
            self.dirty = true;
        }
    }

    /// Check if chunk changed since it was last saved or meshed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark chunk as clean
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether the chunk was removed from the world while a handle was still held
    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    pub(crate) fn mark_unloaded(&mut self) {
        self.unloaded = true;
    }

    /// All blocks in x-fastest, then z, then y order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Local coordinates of a storage index
    pub fn local_pos_of(index: usize) -> (u32, u32, u32) {
        let size = CHUNK_SIZE as usize;
        let x = index % size;
        let z = (index / size) % size;
        let y = index / (size * size);
        (x as u32, y as u32, z as u32)
    }

    fn index(x: u32, y: u32, z: u32) -> usize {
        debug_assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE,
            "index called with out-of-bounds coordinates: ({}, {}, {})",
            x,
            y,
            z
        );
        (x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BlockId, ChunkPos, Dimension};

    fn chunk() -> Chunk {
        Chunk::new(ChunkKey::new(ChunkPos::new(0, 0, 0), Dimension::Overworld))
    }

    #[test]
    fn test_new_chunk_is_air() {
        let chunk = chunk();
        assert!(chunk.blocks().iter().all(|b| b.descriptor == Some(BlockId::AIR)));
        assert!(chunk.is_dirty());
        assert!(!chunk.is_unloaded());
    }

    #[test]
    fn test_set_and_get_block() {
        let mut chunk = chunk();
        chunk.mark_clean();
        chunk.set_block(3, 4, 5, Block::new(BlockId(7)));

        assert_eq!(chunk.get_block(3, 4, 5).descriptor, Some(BlockId(7)));
        assert!(chunk.is_dirty());
    }

    #[test]
    fn test_out_of_range_is_not_good() {
        let chunk = chunk();
        assert!(!chunk.get_block(CHUNK_SIZE, 0, 0).good());
    }

    #[test]
    fn test_index_round_trip() {
        for index in [0usize, 1, 17, 300, BLOCKS_PER_CHUNK - 1] {
            let (x, y, z) = Chunk::local_pos_of(index);
            assert_eq!(Chunk::index(x, y, z), index);
        }
    }
}
