use crate::constants::redstone::MAX_SIGNAL_STRENGTH;
use std::ops::{BitOr, BitOrAssign};

/// One component of a redstone signal.
///
/// An unconnected component always has strength 0 and is distinct from a
/// connected component of strength 0: the latter still makes dust turn
/// towards its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RedstoneSignalComponent {
    strength: u8,
    is_connected: bool,
}

impl RedstoneSignalComponent {
    /// Connected component of the given strength
    ///
    /// # Panics
    /// Panics if `strength` exceeds [`MAX_SIGNAL_STRENGTH`].
    pub fn new(strength: u8) -> Self {
        assert!(
            strength <= MAX_SIGNAL_STRENGTH,
            "signal strength {} out of range",
            strength
        );
        Self {
            strength,
            is_connected: true,
        }
    }

    pub const fn unconnected() -> Self {
        Self {
            strength: 0,
            is_connected: false,
        }
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    /// Same as `self | other`
    pub fn combine(self, other: Self) -> Self {
        self | other
    }
}

impl BitOr for RedstoneSignalComponent {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            strength: self.strength.max(rhs.strength),
            is_connected: self.is_connected || rhs.is_connected,
        }
    }
}

impl BitOrAssign for RedstoneSignalComponent {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// A `(weak, strong)` signal pair. Weak always includes strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RedstoneSignal {
    pub weak: RedstoneSignalComponent,
    pub strong: RedstoneSignalComponent,
}

impl RedstoneSignal {
    pub fn new(weak: RedstoneSignalComponent, strong: RedstoneSignalComponent) -> Self {
        Self {
            weak: weak | strong,
            strong,
        }
    }

    /// Direct power: both components carry `component`
    pub fn strong(component: RedstoneSignalComponent) -> Self {
        Self::new(component, component)
    }

    /// Indirect power only
    pub fn weak(component: RedstoneSignalComponent) -> Self {
        Self::new(component, RedstoneSignalComponent::unconnected())
    }

    /// One hop through a conductor: the strong part becomes weak and the
    /// strong part is cleared. Power that was only weak does not pass.
    pub fn weaken(self) -> Self {
        Self::weak(self.strong)
    }

    pub fn is_powered(&self) -> bool {
        self.weak.strength > 0
    }
}

impl BitOr for RedstoneSignal {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::new(self.weak | rhs.weak, self.strong | rhs.strong)
    }
}

impl BitOrAssign for RedstoneSignal {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
