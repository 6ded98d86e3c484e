//! Redstone dust: wire that connects to neighbors and carries decaying signal
//!
//! Every `(strength, nx, px, nz, pz)` combination is registered up front as its
//! own descriptor, laid out contiguously in the registry. A recalculation
//! therefore ends in a table lookup, and "did anything change" is a single id
//! comparison.

use crate::blocks::attached;
use crate::constants::redstone::{MAX_SIGNAL_STRENGTH, SIGNAL_STRENGTH_COUNT, UPDATE_RADIUS};
use crate::redstone::{calculate_redstone_signal_for_dust, RedstoneSignal, RedstoneSignalComponent};
use crate::world::{
    Attachable, Block, BlockDescriptor, BlockFace, BlockId, BlockIterator, BlockRegistry,
    BlockShape, BlockUpdateKind, BlockUpdateKinds, FaceFlags, LightProperties, ParticleEmission,
    ParticleKind, RenderLayer, World, WorldLockManager,
};
use std::fmt;

/// How dust connects across one horizontal edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum EdgeAttachedState {
    #[default]
    None,
    /// Runs along the floor to the neighbor
    Bottom,
    /// Also climbs the neighbor's side to dust on top of it
    BottomAndTop,
}

impl EdgeAttachedState {
    pub const ALL: [EdgeAttachedState; 3] = [
        EdgeAttachedState::None,
        EdgeAttachedState::Bottom,
        EdgeAttachedState::BottomAndTop,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            EdgeAttachedState::None => "none",
            EdgeAttachedState::Bottom => "bottom",
            EdgeAttachedState::BottomAndTop => "bottom_and_top",
        }
    }
}

/// Edge states of the four horizontal sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DustEdges {
    pub nx: EdgeAttachedState,
    pub px: EdgeAttachedState,
    pub nz: EdgeAttachedState,
    pub pz: EdgeAttachedState,
}

impl DustEdges {
    /// Edge toward `face`; vertical faces never connect
    pub fn get(&self, face: BlockFace) -> EdgeAttachedState {
        match face {
            BlockFace::NX => self.nx,
            BlockFace::PX => self.px,
            BlockFace::NZ => self.nz,
            BlockFace::PZ => self.pz,
            BlockFace::NY | BlockFace::PY => EdgeAttachedState::None,
        }
    }

    pub fn set(&mut self, face: BlockFace, state: EdgeAttachedState) {
        match face {
            BlockFace::NX => self.nx = state,
            BlockFace::PX => self.px = state,
            BlockFace::NZ => self.nz = state,
            BlockFace::PZ => self.pz = state,
            BlockFace::NY | BlockFace::PY => {
                debug_assert!(state == EdgeAttachedState::None, "dust has no vertical edges")
            }
        }
    }
}

/// Full state of a dust cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RedstoneDustState {
    pub signal_strength: u8,
    pub edges: DustEdges,
}

impl RedstoneDustState {
    /// Number of distinct dust states
    pub const COUNT: usize = SIGNAL_STRENGTH_COUNT * 3 * 3 * 3 * 3;

    pub fn new(signal_strength: u8, edges: DustEdges) -> Self {
        assert!(
            signal_strength <= MAX_SIGNAL_STRENGTH,
            "dust signal strength {} out of range",
            signal_strength
        );
        Self {
            signal_strength,
            edges,
        }
    }

    /// Unpowered dot with no connections
    pub fn isolated() -> Self {
        Self::default()
    }

    fn table_index(&self) -> usize {
        let e = &self.edges;
        (((self.signal_strength as usize * 3 + e.nx.index()) * 3 + e.px.index()) * 3 + e.nz.index()) * 3
            + e.pz.index()
    }

    fn from_table_index(index: usize) -> Self {
        let edge = |i: usize| EdgeAttachedState::ALL[i % 3];
        Self {
            signal_strength: (index / 81) as u8,
            edges: DustEdges {
                nx: edge(index / 27),
                px: edge(index / 9),
                nz: edge(index / 3),
                pz: edge(index),
            },
        }
    }

    /// Every state, in table order
    pub fn all() -> impl Iterator<Item = RedstoneDustState> {
        (0..Self::COUNT).map(Self::from_table_index)
    }
}

impl fmt::Display for RedstoneDustState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "strength={},nx={},px={},nz={},pz={}",
            self.signal_strength,
            self.edges.nx.short_name(),
            self.edges.px.short_name(),
            self.edges.nz.short_name(),
            self.edges.pz.short_name()
        )
    }
}

/// Location of the dust descriptors in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedstoneDustTable {
    base: BlockId,
}

impl RedstoneDustTable {
    /// Register one descriptor per dust state
    pub fn register(registry: &mut BlockRegistry) -> Self {
        let table = Self {
            base: registry.next_id(),
        };
        assert!(
            table.base.index() + RedstoneDustState::COUNT <= u16::MAX as usize,
            "not enough block ids left for redstone dust"
        );
        for state in RedstoneDustState::all() {
            let id = registry.register(RedstoneDustBlock::new(state, table));
            assert_eq!(id, table.get(state), "dust descriptors must be contiguous");
        }
        log::debug!(
            "Registered {} redstone dust states starting at {}",
            RedstoneDustState::COUNT,
            table.base
        );
        table
    }

    /// Descriptor id for `state`
    ///
    /// # Panics
    /// Panics if the strength is out of range.
    pub fn get(&self, state: RedstoneDustState) -> BlockId {
        assert!(
            state.signal_strength <= MAX_SIGNAL_STRENGTH,
            "dust signal strength {} out of range",
            state.signal_strength
        );
        BlockId(self.base.0 + state.table_index() as u16)
    }

    /// Id of the unpowered, unconnected dot
    pub fn default_id(&self) -> BlockId {
        self.get(RedstoneDustState::isolated())
    }

    pub fn contains(&self, id: BlockId) -> bool {
        (self.base.index()..self.base.index() + RedstoneDustState::COUNT).contains(&id.index())
    }
}

/// One interned dust state
#[derive(Debug)]
pub struct RedstoneDustBlock {
    name: String,
    state: RedstoneDustState,
    table: RedstoneDustTable,
}

impl RedstoneDustBlock {
    fn new(state: RedstoneDustState, table: RedstoneDustTable) -> Self {
        Self {
            name: format!("builtin.redstone_dust({})", state),
            state,
            table,
        }
    }

    pub fn state(&self) -> RedstoneDustState {
        self.state
    }

    /// Recompute and apply this cell's state. Returns whether it changed.
    fn update_signal(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) -> bool {
        let state = calc_orientation_and_signal_strength(bi, lock);
        let id = self.table.get(state);
        if block.descriptor == Some(id) {
            return false;
        }

        log::trace!("Dust at {} changed: {} -> {}", bi.position(), self.state, state);
        if let Err(e) = world.set_block(bi, lock, Block::with_light(id, block.light)) {
            log::warn!("Failed to update dust at {}: {}", bi.position(), e);
            return false;
        }
        notify_dependents(world, bi);
        true
    }
}

/// Queue recalculation of everything whose signal may depend on this cell
fn notify_dependents(world: &World, bi: &BlockIterator<'_>) {
    let center = bi.position();
    world.add_block_updates_in_diamond(
        center,
        UPDATE_RADIUS,
        BlockUpdateKind::Redstone,
        world.default_delay(BlockUpdateKind::Redstone),
    );
    world.add_block_updates_in_diamond(center, UPDATE_RADIUS, BlockUpdateKind::RedstoneDust, 0);
}

impl BlockDescriptor for RedstoneDustBlock {
    fn name(&self) -> &str {
        &self.name
    }

    fn shape(&self) -> BlockShape {
        BlockShape::Flat
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
        BlockUpdateKinds::of(&[
            BlockUpdateKind::UpdateNotify,
            BlockUpdateKind::Redstone,
            BlockUpdateKind::RedstoneDust,
        ])
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
            BlockUpdateKind::Redstone | BlockUpdateKind::RedstoneDust => {
                self.update_signal(world, block, bi, lock);
            }
            BlockUpdateKind::Lighting | BlockUpdateKind::General => {}
        }
    }

    fn dropped_item(&self) -> Option<&str> {
        Some("redstone")
    }

    fn on_break(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) {
        world.drop_item(bi.position(), "redstone", 1);
        notify_dependents(world, bi);
    }

    fn on_replace(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, _lock: &mut WorldLockManager) {
        notify_dependents(world, bi);
    }

    /// Direct power into the supporting block, indirect power sideways
    /// through connected edges, nothing upward.
    fn get_redstone_signal(&self, output_face: BlockFace) -> RedstoneSignal {
        let component = RedstoneSignalComponent::new(self.state.signal_strength);
        match output_face {
            BlockFace::NY => RedstoneSignal::strong(component),
            BlockFace::PY => RedstoneSignal::default(),
            face if self.state.edges.get(face) != EdgeAttachedState::None => RedstoneSignal::weak(component),
            _ => RedstoneSignal::default(),
        }
    }

    fn generates_particles(&self) -> bool {
        self.state.signal_strength > 0
    }

    fn generate_particles(&self, world: &World, _block: &Block, bi: &BlockIterator<'_>, current_tick: u64) {
        if self.state.signal_strength == 0 {
            return;
        }
        let jitter = |salt: u64| ((current_tick.wrapping_mul(31).wrapping_add(salt) % 10) as f32) / 10.0;
        world.emit_particle(ParticleEmission {
            position: bi.position(),
            offset: [jitter(3), 0.0625, jitter(7)],
            kind: ParticleKind::RedstoneSpark {
                strength: self.state.signal_strength,
            },
        });
    }

    fn as_attachable(&self) -> Option<&dyn Attachable> {
        Some(self)
    }

    fn as_redstone_dust(&self) -> Option<RedstoneDustState> {
        Some(self.state)
    }
}

impl Attachable for RedstoneDustBlock {
    fn attached_to_face(&self) -> BlockFace {
        BlockFace::NY
    }

    fn on_disattach(&self, world: &World, block: &Block, bi: &BlockIterator<'_>, lock: &mut WorldLockManager) {
        attached::drop_and_remove(self, world, block, bi, lock);
        notify_dependents(world, bi);
    }
}

fn cuts_redstone_dust(mut bi: BlockIterator<'_>, lock: &mut WorldLockManager) -> bool {
    bi.descriptor(lock).is_some_and(|d| d.cuts_redstone_dust())
}

fn dust_strength(mut bi: BlockIterator<'_>, lock: &mut WorldLockManager) -> Option<u8> {
    bi.descriptor(lock)
        .and_then(|d| d.as_redstone_dust())
        .map(|state| state.signal_strength)
}

/// Compute the state dust at `bi` should be in
pub fn calc_orientation_and_signal_strength(
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
) -> RedstoneDustState {
    let above_cuts = cuts_redstone_dust(bi.neighbor(BlockFace::PY), lock);

    let mut edges = DustEdges::default();
    let mut strength = 0;
    for face in BlockFace::HORIZONTAL {
        let (side_strength, edge) = calc_orientation_and_signal_strength_side(face, bi, lock, above_cuts);
        edges.set(face, edge);
        strength = strength.max(side_strength);
    }
    for face in [BlockFace::NY, BlockFace::PY] {
        strength = strength.max(calculate_redstone_signal_for_dust(face, bi, lock).weak.strength());
    }

    RedstoneDustState::new(strength, edges)
}

fn calc_orientation_and_signal_strength_side(
    face: BlockFace,
    bi: &BlockIterator<'_>,
    lock: &mut WorldLockManager,
    above_cuts: bool,
) -> (u8, EdgeAttachedState) {
    let signal = calculate_redstone_signal_for_dust(face, bi, lock);
    let neighbor = bi.neighbor(face);

    let mut edge = EdgeAttachedState::None;
    let mut strength;
    if let Some(neighbor_strength) = dust_strength(neighbor.clone(), lock) {
        strength = neighbor_strength.saturating_sub(1);
        edge = EdgeAttachedState::Bottom;
    } else {
        strength = signal.weak.strength();
        if !cuts_redstone_dust(neighbor.clone(), lock) {
            if let Some(below) = dust_strength(neighbor.neighbor(BlockFace::NY), lock) {
                strength = strength.max(below.saturating_sub(1));
                edge = EdgeAttachedState::Bottom;
            }
        }
    }

    if signal.weak.is_connected() {
        edge = edge.max(EdgeAttachedState::Bottom);
    }

    if !above_cuts {
        if let Some(above) = dust_strength(neighbor.neighbor(BlockFace::PY), lock) {
            strength = strength.max(above.saturating_sub(1));
            edge = EdgeAttachedState::BottomAndTop;
        }
    }

    (strength, edge)
}
