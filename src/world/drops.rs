use crate::world::WorldPos;

/// Item spilled into the world when a block is broken or detaches.
///
/// The world only records drops; spawning item entities belongs to the
/// entity system, which drains them with [`World::take_dropped_items`](crate::world::World::take_dropped_items).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedItem {
    pub position: WorldPos,
    pub item: String,
    pub count: u32,
}

/// Cosmetic particle kinds produced by blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Red spark over powered dust, brighter for stronger signals
    RedstoneSpark { strength: u8 },
    /// Flame over a lit torch
    Flame,
}

/// A particle a block asked to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleEmission {
    pub position: WorldPos,
    /// Offset inside the block cell, each axis in 0..1
    pub offset: [f32; 3],
    pub kind: ParticleKind,
}
