use crate::blocks::attached::{self, AttachedVariants};
use crate::world::{
    Attachable, Block, BlockDescriptor, BlockFace, BlockIterator, BlockRegistry, BlockShape,
    BlockUpdateKind, BlockUpdateKinds, FaceFlags, LightProperties, RenderLayer, World,
    WorldLockManager,
};

/// Ladder hanging on a wall toward `attached_to`
#[derive(Debug, Clone)]
pub struct LadderBlock {
    name: String,
    attached_to: BlockFace,
}

impl LadderBlock {
    pub fn new(attached_to: BlockFace) -> Self {
        assert!(attached_to.is_horizontal(), "ladders hang on walls only");
        Self {
            name: format!("builtin.ladder(attached_to={})", attached_to.short_name()),
            attached_to,
        }
    }

    pub fn register_all(registry: &mut BlockRegistry) -> AttachedVariants {
        let mut variants = AttachedVariants::default();
        for face in BlockFace::HORIZONTAL {
            variants.insert(face, registry.register(Self::new(face)));
        }
        variants
    }
}

impl BlockDescriptor for LadderBlock {
    fn name(&self) -> &str {
        &self.name
    }

    fn shape(&self) -> BlockShape {
        BlockShape::Attached(self.attached_to)
    }

    fn light_properties(&self) -> LightProperties {
        LightProperties::transparent()
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
        Some("ladder")
    }

    fn as_attachable(&self) -> Option<&dyn Attachable> {
        Some(self)
    }
}

impl Attachable for LadderBlock {
    fn attached_to_face(&self) -> BlockFace {
        self.attached_to
    }

    fn on_disattach(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) {
        attached::drop_and_remove(self, world, block, bi, lock);
    }
}
