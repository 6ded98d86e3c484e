//! Shared world fixtures for the integration tests

#![allow(dead_code)]

use redstone_engine::blocks::{RedstoneDustState, RedstoneTorchState};
use redstone_engine::{
    builtin_registry, Block, BlockId, BuiltinBlocks, Chunk, ChunkKey, ChunkPos, Dimension,
    EngineConfig, World, WorldLockManager, WorldPos,
};
use std::sync::Arc;

pub const MAX_TICKS: u64 = 500;

/// World with chunks `x, z in -1..=1` at `y = 0` and a stone floor at `y = 0`.
/// Built directly in chunk storage, so no updates are pending.
pub fn flat_world(config: &EngineConfig) -> (World, BuiltinBlocks) {
    let (registry, builtin) = builtin_registry();
    let world = World::new(Arc::new(registry), config);
    for cx in -1..=1 {
        for cz in -1..=1 {
            let mut chunk = Chunk::new(ChunkKey::new(ChunkPos::new(cx, 0, cz), Dimension::Overworld));
            for x in 0..16 {
                for z in 0..16 {
                    chunk.set_block(x, 0, z, Block::new(builtin.stone));
                }
            }
            world.insert_chunk(chunk);
        }
    }
    (world, builtin)
}

pub fn pos(x: i32, y: i32, z: i32) -> WorldPos {
    WorldPos::overworld(x, y, z)
}

/// Place a block through the normal placement path, asserting it was accepted
pub fn place(world: &World, lock: &mut WorldLockManager, at: WorldPos, id: BlockId) {
    let bi = world.block_iterator(at);
    let placed = world
        .place_block(&bi, lock, Block::new(id))
        .expect("chunk is loaded");
    assert!(placed, "placement of {:?} at {} refused", world.registry().name_of(id), at);
}

pub fn dust_state(world: &World, lock: &mut WorldLockManager, at: WorldPos) -> Option<RedstoneDustState> {
    let block = world.get_block(at, lock);
    world.registry().descriptor(&block)?.as_redstone_dust()
}

pub fn dust_strength(world: &World, lock: &mut WorldLockManager, at: WorldPos) -> u8 {
    dust_state(world, lock, at)
        .unwrap_or_else(|| panic!("no dust at {}", at))
        .signal_strength
}

pub fn torch_state(world: &World, lock: &mut WorldLockManager, at: WorldPos) -> Option<RedstoneTorchState> {
    let block = world.get_block(at, lock);
    world.registry().descriptor(&block)?.as_redstone_torch()
}

pub fn settle(world: &World, lock: &mut WorldLockManager) {
    world.run_until_idle(lock, MAX_TICKS);
    assert_eq!(world.pending_update_count(), 0, "world did not settle");
}
