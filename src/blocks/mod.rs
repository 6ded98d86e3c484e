//! Built-in block kinds

pub mod attached;
mod basic;
mod ladder;
mod redstone_dust;
mod redstone_torch;
mod torch;

pub use attached::{AttachedVariants, SupportState};
pub use basic::{AirBlock, GlassBlock, PowerSourceBlock, StoneBlock};
pub use ladder::LadderBlock;
pub use redstone_dust::{
    calc_orientation_and_signal_strength, DustEdges, EdgeAttachedState, RedstoneDustBlock,
    RedstoneDustState, RedstoneDustTable,
};
pub use redstone_torch::{RedstoneTorchBlock, RedstoneTorchState, RedstoneTorchTable};
pub use torch::TorchBlock;

use crate::world::{BlockId, BlockRegistry};

/// Ids of the built-in block kinds
#[derive(Debug, Clone, Copy)]
pub struct BuiltinBlocks {
    pub air: BlockId,
    pub stone: BlockId,
    pub glass: BlockId,
    pub power_source: BlockId,
    pub torch: AttachedVariants,
    pub ladder: AttachedVariants,
    pub redstone_dust: RedstoneDustTable,
    pub redstone_torch: RedstoneTorchTable,
}

/// Register every built-in block kind into an empty registry
///
/// # Panics
/// Panics if the registry already has entries, since air must get id 0.
pub fn register_builtin_blocks(registry: &mut BlockRegistry) -> BuiltinBlocks {
    assert!(registry.is_empty(), "built-in blocks must be registered first");

    let air = registry.register(AirBlock);
    debug_assert_eq!(air, BlockId::AIR);
    let stone = registry.register(StoneBlock);
    let glass = registry.register(GlassBlock);
    let power_source = registry.register(PowerSourceBlock);
    let torch = TorchBlock::register_all(registry);
    let ladder = LadderBlock::register_all(registry);
    let redstone_dust = RedstoneDustTable::register(registry);
    let redstone_torch = RedstoneTorchTable::register(registry);

    log::info!("Registered {} built-in block descriptors", registry.len());
    BuiltinBlocks {
        air,
        stone,
        glass,
        power_source,
        torch,
        ladder,
        redstone_dust,
        redstone_torch,
    }
}

/// Fresh registry holding just the built-in blocks
pub fn builtin_registry() -> (BlockRegistry, BuiltinBlocks) {
    let mut registry = BlockRegistry::new();
    let builtin = register_builtin_blocks(&mut registry);
    (registry, builtin)
}
