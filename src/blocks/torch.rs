use crate::blocks::attached::{self, AttachedVariants};
use crate::constants::redstone::PLAIN_TORCH_LIGHT_EMISSION;
use crate::world::{
    Attachable, Block, BlockDescriptor, BlockFace, BlockIterator, BlockRegistry, BlockShape,
    BlockUpdateKind, BlockUpdateKinds, FaceFlags, LightProperties, ParticleEmission, ParticleKind,
    RenderLayer, World, WorldLockManager,
};

/// Plain light-emitting torch, attached toward `attached_to`
#[derive(Debug, Clone)]
pub struct TorchBlock {
    name: String,
    attached_to: BlockFace,
}

impl TorchBlock {
    /// Torches stand on floors or hang on walls, never from ceilings
    pub const FACES: [BlockFace; 5] = [
        BlockFace::NX,
        BlockFace::PX,
        BlockFace::NY,
        BlockFace::NZ,
        BlockFace::PZ,
    ];

    pub fn new(attached_to: BlockFace) -> Self {
        assert!(attached_to != BlockFace::PY, "torches cannot hang from ceilings");
        Self {
            name: format!("builtin.torch(attached_to={})", attached_to.short_name()),
            attached_to,
        }
    }

    pub fn register_all(registry: &mut BlockRegistry) -> AttachedVariants {
        let mut variants = AttachedVariants::default();
        for face in Self::FACES {
            variants.insert(face, registry.register(Self::new(face)));
        }
        variants
    }
}

impl BlockDescriptor for TorchBlock {
    fn name(&self) -> &str {
        &self.name
    }

    fn shape(&self) -> BlockShape {
        BlockShape::Attached(self.attached_to)
    }

    fn light_properties(&self) -> LightProperties {
        LightProperties::transparent().emitting(PLAIN_TORCH_LIGHT_EMISSION)
    }

    fn occluded_faces(&self) -> FaceFlags {
        FaceFlags::NONE
    }

    fn render_layer(&self) -> RenderLayer {
        RenderLayer::Cutout
    }

    fn handled_updates(&self) -> BlockUpdateKinds {
        BlockUpdateKinds::of(&[BlockUpdateKind::UpdateNotify])
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
        if kind == BlockUpdateKind::UpdateNotify {
            attached::handle_update_notify(self, world, block, bi, lock);
        }
    }

    fn dropped_item(&self) -> Option<&str> {
        Some("torch")
    }

    fn generates_particles(&self) -> bool {
        true
    }

    fn generate_particles(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _current_tick: u64) {
        // flame sits at the tip, leaning away from the wall
        let lean = self.attached_to.offset().as_vec3() * -0.27;
        world.emit_particle(ParticleEmission {
            position: bi.position(),
            offset: [0.5 + lean.x, 0.7, 0.5 + lean.z],
            kind: ParticleKind::Flame,
        });
    }

    fn as_attachable(&self) -> Option<&dyn Attachable> {
        Some(self)
    }
}

impl Attachable for TorchBlock {
    fn attached_to_face(&self) -> BlockFace {
        self.attached_to
    }

    fn on_disattach(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) {
        attached::drop_and_remove(self, world, block, bi, lock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_skips_ceiling() {
        let mut registry = BlockRegistry::new();
        let variants = TorchBlock::register_all(&mut registry);

        assert_eq!(registry.len(), 5);
        assert!(variants.get(BlockFace::PY).is_none());
        let floor = variants.get(BlockFace::NY).and_then(|id| registry.name_of(id));
        assert_eq!(floor, Some("builtin.torch(attached_to=ny)"));
    }

    #[test]
    #[should_panic(expected = "ceilings")]
    fn test_ceiling_torch_panics() {
        TorchBlock::new(BlockFace::PY);
    }
}
