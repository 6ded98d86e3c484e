use crate::config::EngineConfig;
use crate::constants::redstone::UPDATE_RADIUS;
use crate::error::{EngineError, EngineResult};
use crate::world::update::{diamond_offsets, BlockUpdate, BlockUpdateKey, BlockUpdateQueue};
use crate::world::{
    Block, BlockFace, BlockIterator, BlockRegistry, BlockUpdateKind, Chunk, ChunkKey,
    DroppedItem, ParticleEmission, WorldLockManager, WorldPos,
};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Counters for one world tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: u64,
    /// Updates handed to a descriptor's `tick`
    pub delivered: usize,
    /// Due updates dropped because the cell was unloaded or ignores the kind
    pub skipped: usize,
    /// Updates still pending after this tick
    pub remaining: usize,
}

/// Thread-safe block world.
///
/// All methods take `&self`: chunk contents are guarded by per-chunk mutexes
/// acquired through a caller-provided [`WorldLockManager`], the update queue
/// by its own mutex which is never held while chunk locks are taken.
pub struct World {
    registry: Arc<BlockRegistry>,
    chunks: DashMap<ChunkKey, Arc<Mutex<Chunk>>>,
    updates: Mutex<BlockUpdateQueue>,
    dropped_items: Mutex<Vec<DroppedItem>>,
    particles: Mutex<Vec<ParticleEmission>>,
    max_updates_per_tick: usize,
    redstone_delay: u64,
}

impl World {
    pub fn new(registry: Arc<BlockRegistry>, config: &EngineConfig) -> Self {
        log::debug!(
            "Creating world with {} block descriptors, max {} updates per tick",
            registry.len(),
            config.max_updates_per_tick
        );
        Self {
            registry,
            chunks: DashMap::new(),
            updates: Mutex::new(BlockUpdateQueue::new()),
            dropped_items: Mutex::new(Vec::new()),
            particles: Mutex::new(Vec::new()),
            max_updates_per_tick: config.max_updates_per_tick,
            redstone_delay: config.redstone_delay_ticks,
        }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn registry_arc(&self) -> Arc<BlockRegistry> {
        Arc::clone(&self.registry)
    }

    /// Cursor positioned at `position`
    pub fn block_iterator(&self, position: WorldPos) -> BlockIterator<'_> {
        BlockIterator::new(self, position)
    }

    /// Block at `position`, or the "not good" sentinel if unloaded
    pub fn get_block(&self, position: WorldPos, lock: &mut WorldLockManager) -> Block {
        self.block_iterator(position).get(lock)
    }

    // Chunk storage

    /// Load an air-filled chunk. Returns false if the chunk was already loaded.
    pub fn load_empty_chunk(&self, key: ChunkKey) -> bool {
        if self.chunks.contains_key(&key) {
            return false;
        }
        self.insert_chunk(Chunk::new(key));
        true
    }

    /// Insert (or replace) a chunk
    pub fn insert_chunk(&self, chunk: Chunk) {
        let key = chunk.key();
        log::trace!("Loading chunk {:?}", key);
        self.chunks.insert(key, Arc::new(Mutex::new(chunk)));
    }

    /// Remove a chunk from the world. Iterators still holding it will see
    /// the "not good" sentinel from then on.
    pub fn unload_chunk(&self, key: ChunkKey, lock: &mut WorldLockManager) -> bool {
        let Some((_, handle)) = self.chunks.remove(&key) else {
            return false;
        };
        lock.lock_chunk(&handle).mark_unloaded();
        lock.clear();
        log::trace!("Unloaded chunk {:?}", key);
        true
    }

    pub fn is_chunk_loaded(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Keys of all loaded chunks, sorted
    pub fn loaded_chunk_keys(&self) -> Vec<ChunkKey> {
        let mut keys: Vec<ChunkKey> = self.chunks.iter().map(|entry| *entry.key()).collect();
        keys.sort();
        keys
    }

    /// Copy of a loaded chunk's cells
    pub fn chunk_blocks(&self, key: ChunkKey, lock: &mut WorldLockManager) -> Option<Vec<Block>> {
        let handle = self.chunk_handle(key)?;
        let blocks = lock.lock_chunk(&handle).blocks().to_vec();
        Some(blocks)
    }

    pub(crate) fn chunk_handle(&self, key: ChunkKey) -> Option<Arc<Mutex<Chunk>>> {
        self.chunks.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    // Block mutation

    /// Overwrite the block at `bi` without running any descriptor hooks, then
    /// invalidate the neighborhood.
    pub fn set_block(
        &self,
        bi: &BlockIterator<'_>,
        lock: &mut WorldLockManager,
        block: Block,
    ) -> EngineResult<()> {
        let position = bi.position();
        if !self.registry.is_good(&block) {
            return Err(EngineError::InvalidBlock { position });
        }

        let mut bi = bi.clone();
        let handle = bi
            .chunk_handle()
            .ok_or(EngineError::ChunkNotLoaded { position })?;
        let chunk = lock.lock_chunk(&handle);
        if chunk.is_unloaded() {
            return Err(EngineError::ChunkNotLoaded { position });
        }
        let (x, y, z) = position.pos.to_local_pos();
        chunk.set_block(x, y, z, block);

        self.invalidate_around(position);
        Ok(())
    }

    /// Replace the block at `bi`, running the old descriptor's `on_replace` hook first
    pub fn replace_block(
        &self,
        bi: &BlockIterator<'_>,
        lock: &mut WorldLockManager,
        block: Block,
    ) -> EngineResult<()> {
        let mut cursor = bi.clone();
        let old = cursor.get(lock);
        if !old.good() {
            return Err(EngineError::ChunkNotLoaded {
                position: bi.position(),
            });
        }
        if let Some(descriptor) = self.registry.descriptor(&old) {
            descriptor.on_replace(self, &old, bi, lock);
        }
        self.set_block(bi, lock, block)
    }

    /// Place `block` at `bi` if its descriptor allows it there.
    /// Returns false when placement was refused.
    pub fn place_block(
        &self,
        bi: &BlockIterator<'_>,
        lock: &mut WorldLockManager,
        block: Block,
    ) -> EngineResult<bool> {
        let descriptor = self
            .registry
            .descriptor(&block)
            .ok_or(EngineError::InvalidBlock {
                position: bi.position(),
            })?;
        if !descriptor.can_place(&block, bi, lock) {
            log::debug!("Refused to place {} at {}", descriptor.name(), bi.position());
            return Ok(false);
        }
        self.replace_block(bi, lock, block)?;
        Ok(true)
    }

    /// Break the block at `bi`: run its `on_break` hook, then leave air behind
    pub fn break_block(&self, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) -> EngineResult<()> {
        let mut cursor = bi.clone();
        let old = cursor.get(lock);
        let Some(descriptor) = self.registry.descriptor(&old) else {
            return Err(EngineError::ChunkNotLoaded {
                position: bi.position(),
            });
        };
        descriptor.on_break(self, &old, bi, lock);
        self.set_block(bi, lock, Block::with_light(crate::world::BlockId::AIR, old.light))
    }

    /// Queue the updates every block change causes: `UpdateNotify` for the
    /// cell and its face neighbors, `Redstone` for the surrounding diamond.
    fn invalidate_around(&self, position: WorldPos) {
        let notify_delay = self.default_delay(BlockUpdateKind::UpdateNotify);
        let redstone_delay = self.default_delay(BlockUpdateKind::Redstone);
        let mut updates = self.updates.lock();
        updates.add(position, BlockUpdateKind::UpdateNotify, notify_delay);
        for face in BlockFace::ALL {
            updates.add(
                position.offset_by(face.offset()),
                BlockUpdateKind::UpdateNotify,
                notify_delay,
            );
        }
        for offset in diamond_offsets(UPDATE_RADIUS) {
            updates.add(position.offset_by(offset), BlockUpdateKind::Redstone, redstone_delay);
        }
    }

    // Update scheduling

    /// Delay used for `kind` when callers do not pick one
    pub fn default_delay(&self, kind: BlockUpdateKind) -> u64 {
        match kind {
            BlockUpdateKind::Redstone => self.redstone_delay,
            other => other.default_delay(),
        }
    }

    /// Schedule an update; an already pending one for the same key keeps the sooner fire time
    pub fn add_block_update(&self, position: WorldPos, kind: BlockUpdateKind, delay: u64) {
        self.updates.lock().add(position, kind, delay);
    }

    /// Schedule an update, overriding any pending fire time for the same key
    pub fn reschedule_block_update(&self, position: WorldPos, kind: BlockUpdateKind, delay: u64) {
        self.updates.lock().reschedule(position, kind, delay);
    }

    /// Schedule `kind` for every cell within Manhattan distance `radius` of `center`
    pub fn add_block_updates_in_diamond(
        &self,
        center: WorldPos,
        radius: i32,
        kind: BlockUpdateKind,
        delay: u64,
    ) {
        let mut updates = self.updates.lock();
        for offset in diamond_offsets(radius) {
            updates.add(center.offset_by(offset), kind, delay);
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.updates.lock().current_tick()
    }

    pub fn pending_update_count(&self) -> usize {
        self.updates.lock().len()
    }

    /// Pending updates in delivery order
    pub fn pending_updates(&self) -> Vec<BlockUpdateKey> {
        self.updates.lock().pending_keys()
    }

    pub fn scheduled_tick(&self, position: WorldPos, kind: BlockUpdateKind) -> Option<u64> {
        self.updates.lock().scheduled_tick(position, kind)
    }

    /// Deliver updates that are due now without advancing the clock
    pub fn run_due_updates(&self, lock: &mut WorldLockManager) -> TickStats {
        let tick = self.current_tick();
        let mut stats = TickStats {
            tick,
            ..TickStats::default()
        };
        while stats.delivered + stats.skipped < self.max_updates_per_tick {
            // queue lock is released at the end of this statement
            let next = self.updates.lock().pop_due();
            let Some(update) = next else {
                break;
            };
            if self.deliver(update, lock) {
                stats.delivered += 1;
            } else {
                stats.skipped += 1;
            }
        }
        lock.clear();
        stats.remaining = self.pending_update_count();
        stats
    }

    /// Advance the world clock by one tick and deliver everything that came due
    pub fn tick(&self, lock: &mut WorldLockManager) -> TickStats {
        let tick = self.updates.lock().advance();
        let stats = self.run_due_updates(lock);
        log::trace!(
            "Tick {}: delivered {}, skipped {}, {} pending",
            tick,
            stats.delivered,
            stats.skipped,
            stats.remaining
        );
        stats
    }

    /// Deliver due updates, then tick until the queue drains or `max_ticks`
    /// ticks have run. Returns the number of ticks advanced.
    pub fn run_until_idle(&self, lock: &mut WorldLockManager, max_ticks: u64) -> u64 {
        self.run_due_updates(lock);
        let mut ticks = 0;
        while ticks < max_ticks && self.pending_update_count() > 0 {
            self.tick(lock);
            ticks += 1;
        }
        if self.pending_update_count() > 0 {
            log::warn!(
                "World still has {} pending updates after {} ticks",
                self.pending_update_count(),
                ticks
            );
        }
        ticks
    }

    fn deliver(&self, update: BlockUpdate, lock: &mut WorldLockManager) -> bool {
        let mut bi = self.block_iterator(update.position);
        let block = bi.get(lock);
        let Some(descriptor) = self.registry.descriptor(&block) else {
            return false;
        };
        if !descriptor.handled_updates().contains(update.kind) {
            return false;
        }
        log::trace!(
            "Delivering {:?} to {} at {}",
            update.kind,
            descriptor.name(),
            update.position
        );
        descriptor.tick(self, &block, &bi, lock, update.kind);
        true
    }

    // Side channels for the item and particle systems

    pub fn drop_item(&self, position: WorldPos, item: &str, count: u32) {
        log::debug!("Dropping {} x{} at {}", item, count, position);
        self.dropped_items.lock().push(DroppedItem {
            position,
            item: item.to_string(),
            count,
        });
    }

    pub fn take_dropped_items(&self) -> Vec<DroppedItem> {
        std::mem::take(&mut *self.dropped_items.lock())
    }

    pub fn emit_particle(&self, particle: ParticleEmission) {
        self.particles.lock().push(particle);
    }

    pub fn take_particles(&self) -> Vec<ParticleEmission> {
        std::mem::take(&mut *self.particles.lock())
    }

    /// Let the block at `bi` spawn its cosmetic particles
    pub fn animate_block(&self, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) {
        let mut cursor = bi.clone();
        let block = cursor.get(lock);
        if let Some(descriptor) = self.registry.descriptor(&block) {
            if descriptor.generates_particles() {
                descriptor.generate_particles(self, &block, bi, self.current_tick());
            }
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("descriptors", &self.registry.len())
            .field("chunks", &self.chunks.len())
            .field("pending_updates", &self.pending_update_count())
            .finish()
    }
}
