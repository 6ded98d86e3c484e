use crate::blocks::attached;
use crate::blocks::TorchBlock;
use crate::constants::redstone::{MAX_SIGNAL_STRENGTH, TORCH_LIGHT_EMISSION, UPDATE_RADIUS};
use crate::redstone::{calculate_redstone_signal, RedstoneSignal, RedstoneSignalComponent};
use crate::world::{
    Attachable, Block, BlockDescriptor, BlockFace, BlockId, BlockIterator, BlockRegistry,
    BlockShape, BlockUpdateKind, BlockUpdateKinds, FaceFlags, LightProperties, ParticleEmission,
    ParticleKind, RenderLayer, World, WorldLockManager,
};

/// State of a redstone torch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RedstoneTorchState {
    pub attached_to: BlockFace,
    pub is_on: bool,
}

/// Location of the redstone torch descriptors in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedstoneTorchTable {
    base: BlockId,
}

impl RedstoneTorchTable {
    /// Same faces as plain torches, each lit and unlit
    pub const LEN: usize = TorchBlock::FACES.len() * 2;

    pub fn register(registry: &mut BlockRegistry) -> Self {
        let table = Self {
            base: registry.next_id(),
        };
        for attached_to in TorchBlock::FACES {
            for is_on in [false, true] {
                let state = RedstoneTorchState { attached_to, is_on };
                let id = registry.register(RedstoneTorchBlock::new(state, table));
                assert_eq!(id, table.get(state), "torch descriptors must be contiguous");
            }
        }
        table
    }

    /// # Panics
    /// Panics for torches hanging from a ceiling, which are never registered.
    pub fn get(&self, state: RedstoneTorchState) -> BlockId {
        let slot = match TorchBlock::FACES.iter().position(|face| *face == state.attached_to) {
            Some(slot) => slot,
            None => panic!("redstone torches cannot hang from ceilings"),
        };
        BlockId(self.base.0 + (slot * 2 + state.is_on as usize) as u16)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        (self.base.index()..self.base.index() + Self::LEN).contains(&id.index())
    }
}

/// Inverter: lit unless its support is powered
#[derive(Debug)]
pub struct RedstoneTorchBlock {
    name: String,
    state: RedstoneTorchState,
    table: RedstoneTorchTable,
}

impl RedstoneTorchBlock {
    fn new(state: RedstoneTorchState, table: RedstoneTorchTable) -> Self {
        assert!(state.attached_to != BlockFace::PY, "redstone torches cannot hang from ceilings");
        Self {
            name: format!(
                "builtin.redstone_torch(attached_to={},on={})",
                state.attached_to.short_name(),
                state.is_on
            ),
            state,
            table,
        }
    }

    fn update_output(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) {
        let input = calculate_redstone_signal(self.state.attached_to, bi, lock);
        let is_on = !input.is_powered();
        if is_on == self.state.is_on {
            return;
        }

        log::trace!("Redstone torch at {} turned {}", bi.position(), if is_on { "on" } else { "off" });
        let id = self.table.get(RedstoneTorchState { is_on, ..self.state });
        if let Err(e) = world.set_block(bi, lock, Block::with_light(id, block.light)) {
            log::warn!("Failed to switch redstone torch at {}: {}", bi.position(), e);
            return;
        }
        notify_dependents(world, bi);
    }
}

fn notify_dependents(world: &World, bi: &BlockIterator<'_>) {
    world.add_block_updates_in_diamond(
        bi.position(),
        UPDATE_RADIUS,
        BlockUpdateKind::Redstone,
        world.default_delay(BlockUpdateKind::Redstone),
    );
}

impl BlockDescriptor for RedstoneTorchBlock {
    fn name(&self) -> &str {
        &self.name
    }

    fn shape(&self) -> BlockShape {
        BlockShape::Attached(self.state.attached_to)
    }

    fn light_properties(&self) -> LightProperties {
        let transparent = LightProperties::transparent();
        if self.state.is_on {
            transparent.emitting(TORCH_LIGHT_EMISSION)
        } else {
            transparent
        }
    }

    fn occluded_faces(&self) -> FaceFlags {
        FaceFlags::NONE
    }

    fn render_layer(&self) -> RenderLayer {
        RenderLayer::Cutout
    }

    fn handled_updates(&self) -> BlockUpdateKinds {
        BlockUpdateKinds::of(&[BlockUpdateKind::UpdateNotify, BlockUpdateKind::Redstone])
    }

    fn can_place(&self, _block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) -> bool {
        attached::can_place_attached(self, bi, lock)
    }

    fn tick(
        &self,
        world: &World,
        block: &Block,
        bi: &BlockIterator<'_>,
        lock: &mut WorldLockManager,
        kind: BlockUpdateKind,
    ) {
        match kind {
            BlockUpdateKind::UpdateNotify => attached::handle_update_notify(self, world, block, bi, lock),
            BlockUpdateKind::Redstone => self.update_output(world, block, bi, lock),
            _ => {}
        }
    }

    fn dropped_item(&self) -> Option<&str> {
        Some("redstone_torch")
    }

    fn on_break(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) {
        world.drop_item(bi.position(), "redstone_torch", 1);
        notify_dependents(world, bi);
    }

    fn on_replace(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) {
        notify_dependents(world, bi);
    }

    fn get_redstone_signal(&self, output_face: BlockFace) -> RedstoneSignal {
        if output_face == self.state.attached_to {
            return RedstoneSignal::default();
        }
        let strength = if self.state.is_on { MAX_SIGNAL_STRENGTH } else { 0 };
        RedstoneSignal::strong(RedstoneSignalComponent::new(strength))
    }

    fn generates_particles(&self) -> bool {
        self.state.is_on
    }

    fn generate_particles(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _current_tick: u64) {
        if !self.state.is_on {
            return;
        }
        let lean = self.state.attached_to.offset().as_vec3() * -0.27;
        world.emit_particle(ParticleEmission {
            position: bi.position(),
            offset: [0.5 + lean.x, 0.7, 0.5 + lean.z],
            kind: ParticleKind::RedstoneSpark {
                strength: MAX_SIGNAL_STRENGTH,
            },
        });
    }

    fn as_attachable(&self) -> Option<&dyn Attachable> {
        Some(self)
    }

    fn as_redstone_torch(&self) -> Option<RedstoneTorchState> {
        Some(self.state)
    }
}

impl Attachable for RedstoneTorchBlock {
    fn attached_to_face(&self) -> BlockFace {
        self.state.attached_to
    }

    fn on_disattach(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) {
        attached::drop_and_remove(self, world, block, bi, lock);
        notify_dependents(world, bi);
    }
}
