//! Builds a stone floor with a redstone block and a straight dust wire, runs
//! the world until it settles and prints the strength of every wire segment.
//!
//! Usage: redstone_demo [config.toml] [wire_length]

use anyhow::{bail, Context, Result};
use redstone_engine::blocks::RedstoneDustState;
use redstone_engine::{
    builtin_registry, init_logging, Block, ChunkKey, ChunkPos, Dimension, EngineConfig, World,
    WorldLockManager, WorldPos,
};
use std::sync::Arc;

const MAX_TICKS: u64 = 1_000;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path.ends_with(".toml") => {
            EngineConfig::load(&path).with_context(|| format!("loading config from {}", path))?
        }
        Some(other) => bail!("expected a .toml config path, got '{}'", other),
        None => EngineConfig::default(),
    };
    let wire_length: i32 = match args.next() {
        Some(text) => text.parse().with_context(|| format!("invalid wire length '{}'", text))?,
        None => 20,
    };
    if !(1..=15 * 16).contains(&wire_length) {
        bail!("wire length must be between 1 and 240");
    }

    init_logging(&config);
    log::info!("Starting redstone demo with a wire of {} blocks", wire_length);

    let (registry, builtin) = builtin_registry();
    let world = World::new(Arc::new(registry), &config);
    let chunks = (wire_length + 1 + 15) / 16;
    for cx in 0..chunks {
        world.load_empty_chunk(ChunkKey::new(ChunkPos::new(cx, 0, 0), Dimension::Overworld));
    }

    let mut lock = WorldLockManager::new();
    for x in 0..=wire_length {
        let floor = world.block_iterator(WorldPos::overworld(x, 0, 0));
        world.set_block(&floor, &mut lock, Block::new(builtin.stone))?;
    }
    let source = world.block_iterator(WorldPos::overworld(0, 1, 0));
    world.set_block(&source, &mut lock, Block::new(builtin.power_source))?;
    for x in 1..=wire_length {
        let cell = world.block_iterator(WorldPos::overworld(x, 1, 0));
        if !world.place_block(&cell, &mut lock, Block::new(builtin.redstone_dust.default_id()))? {
            bail!("could not place dust at x={}", x);
        }
    }

    let ticks = world.run_until_idle(&mut lock, MAX_TICKS);
    log::info!("World settled after {} ticks", ticks);

    for x in 1..=wire_length {
        let pos = WorldPos::overworld(x, 1, 0);
        let block = world.get_block(pos, &mut lock);
        let state: Option<RedstoneDustState> = world
            .registry()
            .descriptor(&block)
            .and_then(|descriptor| descriptor.as_redstone_dust());
        match state {
            Some(state) => println!("x={:3}  strength={:2}", x, state.signal_strength),
            None => println!("x={:3}  (no dust)", x),
        }
    }
    lock.clear();
    Ok(())
}
