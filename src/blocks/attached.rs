//! Shared behavior of blocks that hang off a supporting neighbor

use crate::world::{
    Attachable, Block, BlockFace, BlockId, BlockIterator, World, WorldLockManager,
};

/// Result of checking an attached block's support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportState {
    /// Support is loaded and accepts the block
    Attached,
    /// Support is loaded and refuses the block
    Detached,
    /// Support is not loaded
    Unknown,
}

/// Ask the block toward `attached_to_face` whether it holds `attachable`
pub fn support_state<A: Attachable>(
    attachable: &A,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) -> SupportState {
    let face = attachable.attached_to_face();
    let mut support = bi.neighbor(face);
    let support_block = support.get(lock);
    let Some(descriptor) = bi.world().registry().descriptor(&support_block) else {
        return SupportState::Unknown;
    };
    if descriptor.can_attach_block(&support_block, face.opposite(), attachable) {
        SupportState::Attached
    } else {
        SupportState::Detached
    }
}

/// Whether an already placed block keeps its place. Unknown support counts as attached.
pub fn is_attached<A: Attachable>(attachable: &A, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) -> bool {
    support_state(attachable, bi, lock) != SupportState::Detached
}

/// Whether a new block may be placed. Unknown support refuses placement.
pub fn can_place_attached<A: Attachable>(
    attachable: &A,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) -> bool {
    support_state(attachable, bi, lock) == SupportState::Attached
}

/// `UpdateNotify` handler: detach when the support is definitely gone
pub fn handle_update_notify<A: Attachable>(
    attachable: &A,
    world: &World,
    block: &Block,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) {
    if !is_attached(attachable, bi, lock) {
        log::debug!("{} at {} lost its support", attachable.name(), bi.position());
        attachable.on_disattach(world, block, bi, lock);
    }
}

/// Usual detach behavior: drop the item and leave air behind
pub fn drop_and_remove<A: Attachable>(
    attachable: &A,
    world: &World,
    block: &Block,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) {
    if let Some(item) = attachable.dropped_item() {
        world.drop_item(bi.position(), item, 1);
    }
    if let Err(e) = world.set_block(bi, lock, Block::with_light(BlockId::AIR, block.light)) {
        log::warn!("Failed to remove detached {} at {}: {}", attachable.name(), bi.position(), e);
    }
}

/// Ids of one attached block kind, one per support face
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachedVariants {
    ids: [Option<BlockId>; 6],
}

impl AttachedVariants {
    pub(crate) fn insert(&mut self, face: BlockFace, id: BlockId) {
        self.ids[face.index()] = Some(id);
    }

    /// Variant attached toward `face`, if the kind can hang that way
    pub fn get(&self, face: BlockFace) -> Option<BlockId> {
        self.ids[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockFace, BlockId)> + '_ {
        BlockFace::ALL
            .into_iter()
            .filter_map(|face| self.get(face).map(|id| (face, id)))
    }
}
