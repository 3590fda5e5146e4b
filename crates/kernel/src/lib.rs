//! Grid Kernel: authoritative cell state and synchronous generation stepping.
//!
//! # Invariants
//! - Grid dimensions never change after construction.
//! - Neighbor lookup wraps around both axes; it never indexes out of bounds.
//! - A generation is evaluated against one snapshot of `alive` values and
//!   committed afterwards, never in place.
//! - Construction is deterministic for a given seed.

pub mod cell;
pub mod grid;
pub mod patterns;
pub mod rules;

pub use cell::Cell;
pub use grid::{Grid, KernelError};
pub use patterns::Pattern;
