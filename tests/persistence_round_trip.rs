//! Saving a powered circuit and loading it into a fresh world

mod common;

use common::{dust_strength, flat_world, place, pos, settle, torch_state};
use redstone_engine::blocks::{AirBlock, PowerSourceBlock, RedstoneTorchState, StoneBlock};
use redstone_engine::{
    builtin_registry, BlockFace, BlockRegistry, EngineConfig, PersistenceError, World,
    WorldLockManager, WorldSave,
};
use std::sync::Arc;
use tempfile::TempDir;

fn build_circuit(world: &World, lock: &mut WorldLockManager, builtin: &redstone_engine::BuiltinBlocks) {
    place(world, lock, pos(0, 1, 0), builtin.power_source);
    for x in 1..=18 {
        place(world, lock, pos(x, 1, 0), builtin.redstone_dust.default_id());
    }
    place(world, lock, pos(-3, 1, -3), builtin.stone);
    place(
        world,
        lock,
        pos(-3, 1, -2),
        builtin.redstone_torch.get(RedstoneTorchState {
            attached_to: BlockFace::NZ,
            is_on: true,
        }),
    );
    settle(world, lock);
}

#[test]
fn test_world_round_trip() {
    let dir = TempDir::new().expect("Failed to create temporary directory for test");
    let config = EngineConfig::default();

    let (world, builtin) = flat_world(&config);
    let mut lock = WorldLockManager::new();
    build_circuit(&world, &mut lock, &builtin);

    let save = WorldSave::new(dir.path(), config.compress_chunks).expect("open save");
    let saved = save.save_world(&world, &mut lock).expect("save world");
    assert_eq!(saved, world.loaded_chunk_keys().len());

    let (registry, _) = builtin_registry();
    let restored = World::new(Arc::new(registry), &config);
    let loaded = save.load_world(&restored).expect("load world");
    assert_eq!(loaded, saved);
    assert_eq!(restored.loaded_chunk_keys(), world.loaded_chunk_keys());

    let mut restored_lock = WorldLockManager::new();
    for x in 1..=18 {
        assert_eq!(
            dust_strength(&restored, &mut restored_lock, pos(x, 1, 0)),
            dust_strength(&world, &mut lock, pos(x, 1, 0)),
            "dust at x={}",
            x
        );
    }
    assert_eq!(
        torch_state(&restored, &mut restored_lock, pos(-3, 1, -2)).map(|s| s.is_on),
        Some(true)
    );
    for key in world.loaded_chunk_keys() {
        let original = world.chunk_blocks(key, &mut lock).expect("original chunk");
        let copy = restored.chunk_blocks(key, &mut restored_lock).expect("restored chunk");
        assert!(original == copy, "chunk {:?} differs after reload", key);
    }

    // a restored world is already converged
    restored.run_until_idle(&mut restored_lock, 10);
    assert_eq!(restored.pending_update_count(), 0);
}

#[test]
fn test_unknown_descriptor_fails_to_load() {
    let dir = TempDir::new().expect("Failed to create temporary directory for test");
    let config = EngineConfig::default();

    let (world, builtin) = flat_world(&config);
    let mut lock = WorldLockManager::new();
    build_circuit(&world, &mut lock, &builtin);
    let save = WorldSave::new(dir.path(), false).expect("open save");
    save.save_world(&world, &mut lock).expect("save world");

    // registry without any redstone dust or torches
    let mut registry = BlockRegistry::new();
    registry.register(AirBlock);
    registry.register(StoneBlock);
    registry.register(PowerSourceBlock);
    let restored = World::new(Arc::new(registry), &config);

    match save.load_world(&restored) {
        Err(PersistenceError::UnknownDescriptor(name)) => {
            assert!(name.starts_with("builtin.redstone_"), "unexpected name {}", name)
        }
        other => panic!("expected unknown descriptor error, got {:?}", other),
    }
}
