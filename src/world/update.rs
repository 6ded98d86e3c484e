//! Delayed block update scheduling
//!
//! Updates are keyed by `(position, kind)`. Scheduling the same key again
//! before it fires coalesces into a single pending update.

use crate::constants::updates::{
    GENERAL_DELAY, LIGHTING_DELAY, REDSTONE_DELAY, REDSTONE_DUST_DELAY, UPDATE_NOTIFY_DELAY,
};
use crate::world::WorldPos;
use glam::IVec3;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Kind of a scheduled block update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockUpdateKind {
    /// Light around this cell must be recomputed
    Lighting,
    /// A neighbor changed; attached blocks re-check their support
    UpdateNotify,
    /// Signal sources around this cell may have changed
    Redstone,
    /// Fast-path recalculation for redstone dust
    RedstoneDust,
    /// Block-specific scheduled behavior
    General,
}

impl BlockUpdateKind {
    pub const ALL: [BlockUpdateKind; 5] = [
        BlockUpdateKind::Lighting,
        BlockUpdateKind::UpdateNotify,
        BlockUpdateKind::Redstone,
        BlockUpdateKind::RedstoneDust,
        BlockUpdateKind::General,
    ];

    /// Built-in delay in ticks. `Redstone` can be overridden by config.
    pub fn default_delay(&self) -> u64 {
        match self {
            BlockUpdateKind::Lighting => LIGHTING_DELAY,
            BlockUpdateKind::UpdateNotify => UPDATE_NOTIFY_DELAY,
            BlockUpdateKind::Redstone => REDSTONE_DELAY,
            BlockUpdateKind::RedstoneDust => REDSTONE_DUST_DELAY,
            BlockUpdateKind::General => GENERAL_DELAY,
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Set of update kinds a block descriptor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockUpdateKinds(u8);

impl BlockUpdateKinds {
    pub const fn empty() -> Self {
        BlockUpdateKinds(0)
    }

    pub fn of(kinds: &[BlockUpdateKind]) -> Self {
        kinds.iter().fold(Self::empty(), |set, kind| set.with(*kind))
    }

    pub fn with(self, kind: BlockUpdateKind) -> Self {
        BlockUpdateKinds(self.0 | kind.bit())
    }

    pub fn contains(&self, kind: BlockUpdateKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Identity of a pending update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockUpdateKey {
    pub position: WorldPos,
    pub kind: BlockUpdateKind,
}

/// An update that has come due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockUpdate {
    pub position: WorldPos,
    pub kind: BlockUpdateKind,
    pub fire_tick: u64,
}

/// Pending updates ordered by `(fire tick, insertion order)`
#[derive(Debug, Default)]
pub struct BlockUpdateQueue {
    current_tick: u64,
    next_sequence: u64,
    pending: FxHashMap<BlockUpdateKey, (u64, u64)>,
    order: BTreeMap<(u64, u64), BlockUpdateKey>,
}

impl BlockUpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Advance the clock by one tick, returning the new tick
    pub fn advance(&mut self) -> u64 {
        self.current_tick += 1;
        self.current_tick
    }

    /// Schedule an update `delay` ticks from now.
    ///
    /// If the same key is already pending, the sooner of the two fire times wins.
    /// Returns whether the queue changed.
    pub fn add(&mut self, position: WorldPos, kind: BlockUpdateKind, delay: u64) -> bool {
        let key = BlockUpdateKey { position, kind };
        let fire_tick = self.current_tick.saturating_add(delay);
        if let Some(&(existing_fire, _)) = self.pending.get(&key) {
            if existing_fire <= fire_tick {
                return false;
            }
        }
        self.insert(key, fire_tick);
        true
    }

    /// Schedule an update `delay` ticks from now, replacing any pending fire time
    pub fn reschedule(&mut self, position: WorldPos, kind: BlockUpdateKind, delay: u64) {
        let key = BlockUpdateKey { position, kind };
        let fire_tick = self.current_tick.saturating_add(delay);
        self.insert(key, fire_tick);
    }

    /// Drop a pending update, if any
    pub fn cancel(&mut self, position: WorldPos, kind: BlockUpdateKind) -> bool {
        let key = BlockUpdateKey { position, kind };
        match self.pending.remove(&key) {
            Some(slot) => {
                self.order.remove(&slot);
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, key: BlockUpdateKey, fire_tick: u64) {
        if let Some(old_slot) = self.pending.remove(&key) {
            self.order.remove(&old_slot);
        }
        let slot = (fire_tick, self.next_sequence);
        self.next_sequence += 1;
        self.pending.insert(key, slot);
        self.order.insert(slot, key);
    }

    /// Remove and return the earliest update due at or before the current tick
    pub fn pop_due(&mut self) -> Option<BlockUpdate> {
        let (&(fire_tick, _), _) = self.order.first_key_value()?;
        if fire_tick > self.current_tick {
            return None;
        }
        let ((fire_tick, _), key) = self.order.pop_first()?;
        self.pending.remove(&key);
        Some(BlockUpdate {
            position: key.position,
            kind: key.kind,
            fire_tick,
        })
    }

    /// Fire tick of a pending update
    pub fn scheduled_tick(&self, position: WorldPos, kind: BlockUpdateKind) -> Option<u64> {
        self.pending
            .get(&BlockUpdateKey { position, kind })
            .map(|&(fire_tick, _)| fire_tick)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Snapshot of all pending keys in delivery order
    pub fn pending_keys(&self) -> Vec<BlockUpdateKey> {
        self.order.values().copied().collect()
    }
}

/// Offsets `(dx, dy, dz)` with `|dx| + |dy| + |dz| <= radius`
pub fn diamond_offsets(radius: i32) -> impl Iterator<Item = IVec3> {
    (-radius..=radius).flat_map(move |dx| {
        (-radius..=radius).flat_map(move |dy| {
            (-radius..=radius).filter_map(move |dz| {
                (dx.abs() + dy.abs() + dz.abs() <= radius).then(|| IVec3::new(dx, dy, dz))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32) -> WorldPos {
        WorldPos::overworld(x, 0, 0)
    }

    #[test]
    fn test_update_kinds_bitset() {
        let kinds = BlockUpdateKinds::of(&[BlockUpdateKind::Redstone, BlockUpdateKind::UpdateNotify]);
        assert!(kinds.contains(BlockUpdateKind::Redstone));
        assert!(kinds.contains(BlockUpdateKind::UpdateNotify));
        assert!(!kinds.contains(BlockUpdateKind::RedstoneDust));
        assert!(!kinds.contains(BlockUpdateKind::General));
        assert!(BlockUpdateKinds::empty().is_empty());

        let all = BlockUpdateKinds::of(&BlockUpdateKind::ALL);
        assert!(BlockUpdateKind::ALL.iter().all(|kind| all.contains(*kind)));
    }

    #[test]
    fn test_add_coalesces_soonest_wins() {
        let mut queue = BlockUpdateQueue::new();
        assert!(queue.add(pos(0), BlockUpdateKind::Redstone, 5));
        assert!(queue.add(pos(0), BlockUpdateKind::Redstone, 2));
        assert!(!queue.add(pos(0), BlockUpdateKind::Redstone, 9));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.scheduled_tick(pos(0), BlockUpdateKind::Redstone), Some(2));
    }

    #[test]
    fn test_reschedule_replaces_fire_time() {
        let mut queue = BlockUpdateQueue::new();
        queue.add(pos(0), BlockUpdateKind::Redstone, 2);
        queue.reschedule(pos(0), BlockUpdateKind::Redstone, 7);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.scheduled_tick(pos(0), BlockUpdateKind::Redstone), Some(7));
    }

    #[test]
    fn test_different_kinds_do_not_coalesce() {
        let mut queue = BlockUpdateQueue::new();
        queue.add(pos(0), BlockUpdateKind::Redstone, 2);
        queue.add(pos(0), BlockUpdateKind::RedstoneDust, 0);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pop_due_respects_clock_and_order() {
        let mut queue = BlockUpdateQueue::new();
        queue.add(pos(1), BlockUpdateKind::Redstone, 1);
        queue.add(pos(2), BlockUpdateKind::UpdateNotify, 0);
        queue.add(pos(3), BlockUpdateKind::UpdateNotify, 0);

        let first = queue.pop_due().map(|u| u.position);
        let second = queue.pop_due().map(|u| u.position);
        assert_eq!(first, Some(pos(2)));
        assert_eq!(second, Some(pos(3)));
        assert!(queue.pop_due().is_none());

        queue.advance();
        let due = queue.pop_due();
        assert_eq!(due.map(|u| (u.position, u.fire_tick)), Some((pos(1), 1)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = BlockUpdateQueue::new();
        queue.add(pos(0), BlockUpdateKind::Redstone, 3);
        assert!(queue.cancel(pos(0), BlockUpdateKind::Redstone));
        assert!(!queue.cancel(pos(0), BlockUpdateKind::Redstone));
        assert!(queue.is_empty());
        assert!(queue.pending_keys().is_empty());
    }

    #[test]
    fn test_diamond_has_25_cells() {
        let offsets: Vec<IVec3> = diamond_offsets(2).collect();
        assert_eq!(offsets.len(), 25);
        assert!(offsets.iter().all(|o| o.x.abs() + o.y.abs() + o.z.abs() <= 2));
        assert!(offsets.contains(&IVec3::ZERO));
        assert!(!offsets.contains(&IVec3::new(1, 1, 1)));
        assert_eq!(diamond_offsets(0).count(), 1);
        assert_eq!(diamond_offsets(1).count(), 7);
    }
}
