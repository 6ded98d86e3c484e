use crate::world::LightLevel;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Index of a block descriptor in the [`BlockRegistry`](crate::world::BlockRegistry).
///
/// Descriptors are interned: two placed blocks are in the same state exactly
/// when they carry the same `BlockId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    /// Air is always registered first
    pub const AIR: BlockId = BlockId(0);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0)
    }
}

/// Block-specific heap data (chest contents, sign text, ...)
pub type BlockDataRef = Arc<dyn Any + Send + Sync>;

/// A placed block: which descriptor occupies the cell, its lighting, and
/// optional per-instance data. All behavior lives in the descriptor.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub descriptor: Option<BlockId>,
    pub light: LightLevel,
    pub data: Option<BlockDataRef>,
}

impl Block {
    pub fn new(descriptor: BlockId) -> Self {
        Self {
            descriptor: Some(descriptor),
            light: LightLevel::dark(),
            data: None,
        }
    }

    pub fn with_light(descriptor: BlockId, light: LightLevel) -> Self {
        Self {
            descriptor: Some(descriptor),
            light,
            data: None,
        }
    }

    pub fn with_data(descriptor: BlockId, data: BlockDataRef) -> Self {
        Self {
            descriptor: Some(descriptor),
            light: LightLevel::dark(),
            data: Some(data),
        }
    }

    pub fn air() -> Self {
        Self::new(BlockId::AIR)
    }

    /// The "not good" sentinel returned for cells outside loaded storage
    pub fn not_good() -> Self {
        Self::default()
    }

    /// Whether this block refers to a descriptor at all
    pub fn good(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Typed view of the block-specific data
    pub fn data_as<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|data| data.downcast_ref::<T>())
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        let same_data = match (&self.data, &other.data) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.descriptor == other.descriptor && self.light == other.light && same_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_constants() {
        assert_eq!(BlockId::AIR, BlockId(0));
        assert_eq!(BlockId::default(), BlockId::AIR);
    }

    #[test]
    fn test_not_good_sentinel() {
        assert!(!Block::not_good().good());
        assert!(Block::air().good());
    }

    #[test]
    fn test_block_data_downcast() {
        let block = Block::with_data(BlockId(3), Arc::new(42u32));
        assert_eq!(block.data_as::<u32>(), Some(&42));
        assert_eq!(block.data_as::<String>(), None);
    }

    #[test]
    fn test_block_equality_uses_data_identity() {
        let data: BlockDataRef = Arc::new(7u8);
        let a = Block::with_data(BlockId(1), data.clone());
        let b = Block::with_data(BlockId(1), data);
        let c = Block::with_data(BlockId(1), Arc::new(7u8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
