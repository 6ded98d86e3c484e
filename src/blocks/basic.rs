use crate::redstone::{RedstoneSignal, RedstoneSignalComponent};
use crate::constants::redstone::MAX_SIGNAL_STRENGTH;
use crate::world::{
    Block, BlockDescriptor, BlockFace, BlockShape, FaceFlags, LightProperties, RenderLayer,
};

/// Empty space
#[derive(Debug, Clone)]
pub struct AirBlock;

impl AirBlock {
    pub const NAME: &'static str = "builtin.air";
}

impl BlockDescriptor for AirBlock {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn shape(&self) -> BlockShape {
        BlockShape::Empty
    }

    fn light_properties(&self) -> LightProperties {
        LightProperties::transparent()
    }

    fn occluded_faces(&self) -> FaceFlags {
        FaceFlags::NONE
    }

    fn render_layer(&self) -> RenderLayer {
        RenderLayer::None
    }
}

/// Solid stone: conducts signals and supports anything attached to it
#[derive(Debug, Clone)]
pub struct StoneBlock;

impl StoneBlock {
    pub const NAME: &'static str = "builtin.stone";
}

impl BlockDescriptor for StoneBlock {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_attach_block(&self, _block: &Block, _attaching_face: BlockFace, _attaching: &dyn BlockDescriptor) -> bool {
        true
    }

    fn dropped_item(&self) -> Option<&str> {
        Some("stone")
    }

    fn is_redstone_conductor(&self) -> bool {
        true
    }

    fn cuts_redstone_dust(&self) -> bool {
        true
    }
}

/// Glass: full but transparent. Does not conduct and only holds things
/// standing on top of it.
#[derive(Debug, Clone)]
pub struct GlassBlock;

impl GlassBlock {
    pub const NAME: &'static str = "builtin.glass";
}

impl BlockDescriptor for GlassBlock {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn light_properties(&self) -> LightProperties {
        LightProperties::transparent()
    }

    fn occluded_faces(&self) -> FaceFlags {
        FaceFlags::NONE
    }

    fn render_layer(&self) -> RenderLayer {
        RenderLayer::Translucent
    }

    fn can_attach_block(&self, _block: &Block, attaching_face: BlockFace, _attaching: &dyn BlockDescriptor) -> bool {
        attaching_face == BlockFace::PY
    }
}

/// Block of redstone: a constant direct power source
#[derive(Debug, Clone)]
pub struct PowerSourceBlock;

impl PowerSourceBlock {
    pub const NAME: &'static str = "builtin.redstone_block";
}

impl BlockDescriptor for PowerSourceBlock {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_attach_block(&self, _block: &Block, _attaching_face: BlockFace, _attaching: &dyn BlockDescriptor) -> bool {
        true
    }

    fn dropped_item(&self) -> Option<&str> {
        Some("redstone_block")
    }

    fn get_redstone_signal(&self, _output_face: BlockFace) -> RedstoneSignal {
        RedstoneSignal::strong(RedstoneSignalComponent::new(MAX_SIGNAL_STRENGTH))
    }

    fn cuts_redstone_dust(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glass_supports_top_only() {
        let block = Block::air();
        for face in BlockFace::ALL {
            assert_eq!(GlassBlock.can_attach_block(&block, face, &StoneBlock), face == BlockFace::PY);
            assert!(StoneBlock.can_attach_block(&block, face, &GlassBlock));
            assert!(!AirBlock.can_attach_block(&block, face, &StoneBlock));
        }
    }

    #[test]
    fn test_power_source_is_strong_everywhere() {
        for face in BlockFace::ALL {
            let signal = PowerSourceBlock.get_redstone_signal(face);
            assert_eq!(signal.strong.strength(), MAX_SIGNAL_STRENGTH);
            assert_eq!(signal.weak.strength(), MAX_SIGNAL_STRENGTH);
        }
        assert_eq!(StoneBlock.get_redstone_signal(BlockFace::PX), RedstoneSignal::default());
    }

    #[test]
    fn test_conductors() {
        assert!(StoneBlock.is_redstone_conductor());
        assert!(!GlassBlock.is_redstone_conductor());
        assert!(!PowerSourceBlock.is_redstone_conductor());
        assert!(!AirBlock.cuts_redstone_dust());
    }
}
