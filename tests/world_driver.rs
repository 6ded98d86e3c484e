//! Tick driver, chunk lifecycle and update scheduling

mod common;

use common::{dust_strength, flat_world, place, pos};
use redstone_engine::{
    Block, BlockUpdateKind, ChunkKey, ChunkPos, Dimension, EngineConfig, EngineError,
    WorldLockManager,
};

#[test]
fn test_tick_respects_update_cap() {
    let config = EngineConfig {
        max_updates_per_tick: 3,
        ..EngineConfig::default()
    };
    let (world, _) = flat_world(&config);
    let mut lock = WorldLockManager::new();

    for x in 0..10 {
        world.add_block_update(pos(x, 5, 0), BlockUpdateKind::General, 1);
    }
    let stats = world.tick(&mut lock);
    assert_eq!(stats.tick, 1);
    assert_eq!(stats.delivered + stats.skipped, 3);
    assert_eq!(stats.remaining, 7);
    assert!(!lock.is_holding_lock());

    let ticks = world.run_until_idle(&mut lock, 10);
    assert_eq!(ticks, 2);
    assert_eq!(world.pending_update_count(), 0);
}

#[test]
fn test_redstone_delay_comes_from_config() {
    let config = EngineConfig {
        redstone_delay_ticks: 5,
        ..EngineConfig::default()
    };
    let (world, builtin) = flat_world(&config);
    let mut lock = WorldLockManager::new();
    assert_eq!(world.default_delay(BlockUpdateKind::Redstone), 5);
    assert_eq!(world.default_delay(BlockUpdateKind::RedstoneDust), 0);

    let cell = world.block_iterator(pos(2, 1, 2));
    world.set_block(&cell, &mut lock, Block::new(builtin.stone)).expect("set");
    assert_eq!(world.scheduled_tick(pos(2, 1, 2), BlockUpdateKind::Redstone), Some(5));
    assert_eq!(world.scheduled_tick(pos(2, 3, 2), BlockUpdateKind::Redstone), Some(5));
    assert_eq!(world.scheduled_tick(pos(2, 1, 2), BlockUpdateKind::UpdateNotify), Some(0));
    assert_eq!(world.scheduled_tick(pos(2, 2, 3), BlockUpdateKind::UpdateNotify), None);
}

#[test]
fn test_add_is_soonest_wins_and_reschedule_overrides() {
    let (world, _) = flat_world(&EngineConfig::default());
    let at = pos(1, 1, 1);

    world.add_block_update(at, BlockUpdateKind::General, 8);
    world.add_block_update(at, BlockUpdateKind::General, 3);
    world.add_block_update(at, BlockUpdateKind::General, 6);
    assert_eq!(world.scheduled_tick(at, BlockUpdateKind::General), Some(3));

    world.reschedule_block_update(at, BlockUpdateKind::General, 9);
    assert_eq!(world.scheduled_tick(at, BlockUpdateKind::General), Some(9));
    assert_eq!(world.pending_update_count(), 1);
}

#[test]
fn test_unloaded_chunks() {
    let (world, builtin) = flat_world(&EngineConfig::default());
    let mut lock = WorldLockManager::new();
    let key = ChunkKey::new(ChunkPos::new(0, 0, 0), Dimension::Overworld);

    place(&world, &mut lock, pos(0, 1, 0), builtin.power_source);
    place(&world, &mut lock, pos(1, 1, 0), builtin.redstone_dust.default_id());
    world.run_until_idle(&mut lock, 100);
    assert_eq!(dust_strength(&world, &mut lock, pos(1, 1, 0)), 15);

    let mut cursor = world.block_iterator(pos(1, 1, 0));
    assert!(cursor.get(&mut lock).good());

    assert!(world.unload_chunk(key, &mut lock));
    assert!(!world.unload_chunk(key, &mut lock));
    assert!(!world.is_chunk_loaded(key));
    assert!(!cursor.get(&mut lock).good());
    assert!(!world.get_block(pos(1, 1, 0), &mut lock).good());

    let err = world
        .set_block(&cursor, &mut lock, Block::new(builtin.stone))
        .expect_err("chunk is gone");
    assert!(matches!(err, EngineError::ChunkNotLoaded { .. }));

    // updates aimed at the unloaded chunk are dropped
    world.add_block_update(pos(1, 1, 0), BlockUpdateKind::Redstone, 0);
    let stats = world.run_due_updates(&mut lock);
    assert_eq!(stats.delivered, 0);

    assert!(world.load_empty_chunk(key));
    assert!(!world.load_empty_chunk(key));
    assert_eq!(world.get_block(pos(1, 1, 0), &mut lock).descriptor, Some(builtin.air));
}

#[test]
fn test_invalid_blocks_are_rejected() {
    let (world, builtin) = flat_world(&EngineConfig::default());
    let mut lock = WorldLockManager::new();
    let cell = world.block_iterator(pos(3, 3, 3));

    let err = world
        .set_block(&cell, &mut lock, Block::not_good())
        .expect_err("sentinel cannot be stored");
    assert!(matches!(err, EngineError::InvalidBlock { .. }));

    let with_data = Block::with_data(builtin.stone, std::sync::Arc::new(5u8));
    assert!(world.set_block(&cell, &mut lock, with_data).is_err());
    assert_eq!(world.pending_update_count(), 0);
}

#[test]
fn test_worlds_are_shareable_between_threads() {
    let (world, builtin) = flat_world(&EngineConfig::default());
    let world = std::sync::Arc::new(world);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let world = std::sync::Arc::clone(&world);
            let stone = builtin.stone;
            std::thread::spawn(move || {
                let mut lock = WorldLockManager::new();
                for z in 0..8 {
                    let cell = world.block_iterator(pos(i * 3, 2, z));
                    world.set_block(&cell, &mut lock, Block::new(stone)).expect("set");
                }
                lock.clear();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let mut lock = WorldLockManager::new();
    for i in 0..4 {
        for z in 0..8 {
            assert_eq!(world.get_block(pos(i * 3, 2, z), &mut lock).descriptor, Some(builtin.stone));
        }
    }
}
