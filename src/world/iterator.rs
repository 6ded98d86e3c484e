use crate::world::{
    Block, BlockDescriptor, BlockFace, Chunk, ChunkKey, World, WorldLockManager, WorldPos,
};
use glam::IVec3;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cursor over world storage.
///
/// Caches the handle of the chunk it is in, so walking between neighbors in the
/// same chunk skips the chunk map. Reads go through a [`WorldLockManager`].
#[derive(Clone)]
pub struct BlockIterator<'w> {
    world: &'w World,
    position: WorldPos,
    chunk: Option<(ChunkKey, Arc<Mutex<Chunk>>)>,
}

impl<'w> BlockIterator<'w> {
    pub(crate) fn new(world: &'w World, position: WorldPos) -> Self {
        Self {
            world,
            position,
            chunk: None,
        }
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn world(&self) -> &'w World {
        self.world
    }

    /// Move one block in the direction of `face`
    pub fn move_toward(&mut self, face: BlockFace) {
        self.move_by(face.offset());
    }

    /// Move one block against the direction of `face`
    pub fn move_from(&mut self, face: BlockFace) {
        self.move_by(face.opposite().offset());
    }

    pub fn move_by(&mut self, delta: IVec3) {
        self.move_to(self.position.offset_by(delta));
    }

    pub fn move_to(&mut self, position: WorldPos) {
        let key = position.chunk_key();
        if self.chunk.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.chunk = None;
        }
        self.position = position;
    }

    /// Copy of this iterator moved toward `face`
    pub fn neighbor(&self, face: BlockFace) -> Self {
        let mut neighbor = self.clone();
        neighbor.move_toward(face);
        neighbor
    }

    pub(crate) fn chunk_handle(&mut self) -> Option<Arc<Mutex<Chunk>>> {
        if self.chunk.is_none() {
            let key = self.position.chunk_key();
            self.chunk = self.world.chunk_handle(key).map(|handle| (key, handle));
        }
        self.chunk.as_ref().map(|(_, handle)| Arc::clone(handle))
    }

    /// Block at the current position, or the "not good" sentinel if its chunk
    /// is not loaded
    pub fn get(&mut self, lock: &mut WorldLockManager) -> Block {
        let Some(handle) = self.chunk_handle() else {
            return Block::not_good();
        };
        let chunk = lock.lock_chunk(&handle);
        if chunk.is_unloaded() {
            self.chunk = None;
            return Block::not_good();
        }
        let (x, y, z) = self.position.pos.to_local_pos();
        chunk.get_block(x, y, z)
    }

    /// Descriptor of the block at the current position
    pub fn descriptor(&mut self, lock: &mut WorldLockManager) -> Option<&'w dyn BlockDescriptor> {
        let block = self.get(lock);
        self.world.registry().descriptor(&block)
    }
}

impl std::fmt::Debug for BlockIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockIterator")
            .field("position", &self.position)
            .field("chunk_cached", &self.chunk.is_some())
            .finish()
    }
}
