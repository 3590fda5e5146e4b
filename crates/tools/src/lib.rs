//! Developer Tooling: grid inspector and cycle detection.
//!
//! # Invariants
//! - Tools only read grid state; they never advance or edit it.

mod cycle;
mod inspector;

pub use cycle::CycleDetector;
pub use inspector::{CellInfo, GridInspector, GridSummary};
