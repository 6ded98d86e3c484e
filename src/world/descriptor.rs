//! The block descriptor dispatch contract
//!
//! A descriptor is an immutable, interned block *kind*. The world and the tick
//! driver only ever talk to `dyn BlockDescriptor`; concrete kinds expose extra
//! behavior through the capability queries at the bottom of the trait instead
//! of being downcast.

use crate::blocks::{RedstoneDustState, RedstoneTorchState};
use crate::persistence::{PersistenceResult, Reader, Writer};
use crate::redstone::RedstoneSignal;
use crate::world::{
    Block, BlockDataRef, BlockFace, BlockIterator, BlockShape, BlockUpdateKind, BlockUpdateKinds,
    FaceFlags, LightProperties, World, WorldLockManager,
};
use std::fmt;

/// Which render pass a block is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderLayer {
    /// Not drawn at all
    None,
    Opaque,
    /// Alpha-tested cutouts (torches, ladders, dust)
    Cutout,
    Translucent,
}

/// Trait that all block kinds must implement
pub trait BlockDescriptor: Send + Sync + fmt::Debug {
    /// Unique name, also the key used when saving worlds
    fn name(&self) -> &str;

    fn shape(&self) -> BlockShape {
        BlockShape::Full
    }

    fn light_properties(&self) -> LightProperties {
        LightProperties::opaque()
    }

    /// Faces that hide the neighboring block's touching face
    fn occluded_faces(&self) -> FaceFlags {
        FaceFlags::ALL
    }

    fn render_layer(&self) -> RenderLayer {
        RenderLayer::Opaque
    }

    /// Update kinds delivered to [`tick`](Self::tick)
    fn handled_updates(&self) -> BlockUpdateKinds {
        BlockUpdateKinds::empty()
    }

    /// Whether `block` (an instance of this kind) can support a neighbor that
    /// touches it on `attaching_face`. Pure, no side effects.
    fn can_attach_block(
        &self,
        _block: &Block,
        _attaching_face: BlockFace,
        _attaching: &dyn BlockDescriptor,
    ) -> bool {
        false
    }

    /// Whether `block` may be placed at `bi`
    fn can_place(&self, _block: &Block, _bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) -> bool {
        true
    }

    /// Handle one delivered update. Must be a no-op when nothing changed.
    fn tick(
        &self,
        _world: &World,
        _block: &Block,
        _bi: &BlockIterator<'_>,
        _lock: &mut WorldLockManager,
        _kind: BlockUpdateKind,
    ) {
    }

    /// Item dropped when the block is broken
    fn dropped_item(&self) -> Option<&str> {
        None
    }

    /// Called once when the block is broken. The world places air afterwards.
    fn on_break(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) {
        if let Some(item) = self.dropped_item() {
            world.drop_item(bi.position(), item, 1);
        }
    }

    /// Called once when the block is overwritten by another block
    fn on_replace(&self, _world: &World, _block: &Block, _bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) {}

    /// Signal this block presents on `output_face`. Pure, no side effects.
    fn get_redstone_signal(&self, _output_face: BlockFace) -> RedstoneSignal {
        RedstoneSignal::default()
    }

    /// Whether signals can pass one hop through this block
    fn is_redstone_conductor(&self) -> bool {
        false
    }

    /// Whether this block breaks dust connections that climb past it
    fn cuts_redstone_dust(&self) -> bool {
        false
    }

    fn generates_particles(&self) -> bool {
        false
    }

    fn generate_particles(&self, _world: &World, _block: &Block, _bi: &BlockIterator<'_>, _current_tick: u64) {}

    fn write_block_data(&self, _block: &Block, _writer: &mut Writer<'_>) -> PersistenceResult<()> {
        Ok(())
    }

    fn read_block_data(&self, _reader: &mut Reader<'_>) -> PersistenceResult<Option<BlockDataRef>> {
        Ok(None)
    }

    /// Whether `data` is acceptable instance data for this kind
    fn is_block_data_valid(&self, data: Option<&BlockDataRef>) -> bool {
        data.is_none()
    }

    // Capability queries

    fn as_attachable(&self) -> Option<&dyn Attachable> {
        None
    }

    fn as_redstone_dust(&self) -> Option<RedstoneDustState> {
        None
    }

    fn as_redstone_torch(&self) -> Option<RedstoneTorchState> {
        None
    }
}

/// Blocks that must stay attached to a supporting neighbor
pub trait Attachable: BlockDescriptor {
    /// Direction from this block towards its support
    fn attached_to_face(&self) -> BlockFace;

    /// Called exactly once when the support disappears
    fn on_disattach(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager);
}
