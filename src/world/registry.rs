use super::{Block, BlockDescriptor, BlockId};
use rustc_hash::FxHashMap;

/// Registry that owns every block descriptor.
///
/// Descriptors are stored in an arena and addressed by [`BlockId`]; everything
/// else holds ids, never descriptors. Build one per process (or per test) and
/// share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    descriptors: Vec<Box<dyn BlockDescriptor>>,
    name_to_id: FxHashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Create an empty registry. Use
    /// [`register_builtin_blocks`](crate::blocks::register_builtin_blocks) to
    /// fill it with the engine's block kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next registered descriptor will receive
    pub fn next_id(&self) -> BlockId {
        BlockId(self.descriptors.len() as u16)
    }

    /// Register a new block kind
    ///
    /// # Panics
    /// Panics on duplicate names or when the id space is exhausted; both are
    /// bugs in descriptor construction.
    pub fn register<B: BlockDescriptor + 'static>(&mut self, descriptor: B) -> BlockId {
        assert!(
            self.descriptors.len() < u16::MAX as usize,
            "Too many block descriptors registered (max {})",
            u16::MAX
        );
        let name = descriptor.name().to_string();
        assert!(
            !self.name_to_id.contains_key(&name),
            "Block descriptor '{}' registered twice",
            name
        );

        let id = self.next_id();
        log::trace!("Registered block '{}' with ID {}", name, id.0);
        self.descriptors.push(Box::new(descriptor));
        self.name_to_id.insert(name, id);
        id
    }

    /// Get a descriptor by ID
    pub fn get(&self, id: BlockId) -> Option<&dyn BlockDescriptor> {
        self.descriptors.get(id.index()).map(|d| d.as_ref())
    }

    /// Descriptor of a placed block; `None` for the "not good" sentinel
    pub fn descriptor(&self, block: &Block) -> Option<&dyn BlockDescriptor> {
        block.descriptor.and_then(|id| self.get(id))
    }

    /// Get a block ID by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Name of a registered descriptor
    pub fn name_of(&self, id: BlockId) -> Option<&str> {
        self.get(id).map(|d| d.name())
    }

    /// A block is good when it names a registered descriptor that accepts its data
    pub fn is_good(&self, block: &Block) -> bool {
        self.descriptor(block)
            .is_some_and(|d| d.is_block_data_valid(block.data.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &dyn BlockDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (BlockId(i as u16), d.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Named(&'static str);

    impl BlockDescriptor for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut registry = BlockRegistry::new();
        let a = registry.register(Named("test.a"));
        let b = registry.register(Named("test.b"));

        assert_eq!(a, BlockId(0));
        assert_eq!(b, BlockId(1));
        assert_eq!(registry.get_id("test.b"), Some(b));
        assert_eq!(registry.name_of(a), Some("test.a"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_names_panic() {
        let mut registry = BlockRegistry::new();
        registry.register(Named("test.a"));
        registry.register(Named("test.a"));
    }

    #[test]
    fn test_is_good_checks_data() {
        let mut registry = BlockRegistry::new();
        let id = registry.register(Named("test.a"));

        assert!(registry.is_good(&Block::new(id)));
        assert!(!registry.is_good(&Block::with_data(id, Arc::new(1u8))));
        assert!(!registry.is_good(&Block::not_good()));
        assert!(!registry.is_good(&Block::new(BlockId(99))));
    }
}
