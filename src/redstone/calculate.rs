use crate::redstone::RedstoneSignal;
use crate::world::{BlockFace, BlockIterator, WorldLockManager};

/// Signal arriving at the cell under `bi` from its neighbor toward `direction`.
///
/// Starts with the neighbor's own output on the facing side. If the neighbor
/// conducts, the weakened output of each of its other neighbors (pointing into
/// it) is added, which is how power passes one hop through solid blocks.
/// Unloaded cells contribute nothing.
pub fn calculate_redstone_signal(
    direction: BlockFace,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) -> RedstoneSignal {
    signal_from(direction, bi, lock, true)
}

/// Like [`calculate_redstone_signal`], but power that dust pushes into a
/// conductor is not picked up again. Dust reads other dust only across its
/// own edges, where the strength drops by one.
pub fn calculate_redstone_signal_for_dust(
    direction: BlockFace,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) -> RedstoneSignal {
    signal_from(direction, bi, lock, false)
}

fn signal_from(
    direction: BlockFace,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
    through_dust: bool,
) -> RedstoneSignal {
    let mut neighbor = bi.neighbor(direction);
    let Some(descriptor) = neighbor.descriptor(lock) else {
        return RedstoneSignal::default();
    };

    let mut signal = descriptor.get_redstone_signal(direction.opposite());
    if !descriptor.is_redstone_conductor() {
        return signal;
    }

    for face in BlockFace::ALL {
        if face == direction.opposite() {
            continue;
        }
        let mut source = neighbor.neighbor(face);
        let Some(source_descriptor) = source.descriptor(lock) else {
            continue;
        };
        if !through_dust && source_descriptor.as_redstone_dust().is_some() {
            continue;
        }
        signal |= source_descriptor.get_redstone_signal(face.opposite()).weaken();
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{builtin_registry, RedstoneDustState};
    use crate::world::{Block, Chunk, ChunkKey, ChunkPos, Dimension, World, WorldPos};
    use crate::EngineConfig;
    use std::sync::Arc;

    #[test]
    fn test_dust_power_through_conductor_is_hidden_from_dust() {
        let (registry, builtin) = builtin_registry();
        let powered = builtin.redstone_dust.get(RedstoneDustState {
            signal_strength: 12,
            ..RedstoneDustState::isolated()
        });
        let world = World::new(Arc::new(registry), &EngineConfig::default());
        let mut chunk = Chunk::new(ChunkKey::new(ChunkPos::new(0, 0, 0), Dimension::Overworld));
        // dust on a stone block, queried from the cell beside the block
        chunk.set_block(3, 1, 3, Block::new(builtin.stone));
        chunk.set_block(3, 2, 3, Block::new(powered));
        world.insert_chunk(chunk);
        let mut lock = WorldLockManager::new();

        let bi = world.block_iterator(WorldPos::overworld(4, 1, 3));
        let seen_by_torch = calculate_redstone_signal(BlockFace::NX, &bi, &mut lock);
        assert_eq!(seen_by_torch.weak.strength(), 12);
        assert!(!seen_by_torch.strong.is_connected());

        let seen_by_dust = calculate_redstone_signal_for_dust(BlockFace::NX, &bi, &mut lock);
        assert!(!seen_by_dust.is_powered());
    }

    #[test]
    fn test_other_sources_still_pass_through() {
        let (registry, builtin) = builtin_registry();
        let world = World::new(Arc::new(registry), &EngineConfig::default());
        let mut chunk = Chunk::new(ChunkKey::new(ChunkPos::new(0, 0, 0), Dimension::Overworld));
        chunk.set_block(3, 1, 3, Block::new(builtin.stone));
        chunk.set_block(2, 1, 3, Block::new(builtin.power_source));
        world.insert_chunk(chunk);
        let mut lock = WorldLockManager::new();

        let bi = world.block_iterator(WorldPos::overworld(4, 1, 3));
        let signal = calculate_redstone_signal_for_dust(BlockFace::NX, &bi, &mut lock);
        assert_eq!(signal.weak.strength(), 15);
        assert!(!signal.strong.is_connected());
    }
}
