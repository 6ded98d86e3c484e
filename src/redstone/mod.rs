//! Redstone signal model
//!
//! Signals are `(weak, strong)` pairs of saturating components. Block kinds
//! report what they emit per face; [`calculate_redstone_signal`] resolves what
//! a cell receives from one direction, including one hop through a conductor.

mod calculate;
mod signal;

pub use calculate::{calculate_redstone_signal, calculate_redstone_signal_for_dust};
pub use signal::{RedstoneSignal, RedstoneSignalComponent};
