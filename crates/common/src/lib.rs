//! Shared types and configuration for the lifegrid workspace.
//!
//! # Invariants
//! - Coordinates are `(x, y)` with `x` in `[0, rows)` and `y` in `[0, columns)`.
//! - A validated [`SimConfig`] always describes a non-empty grid.

pub mod config;
pub mod types;

pub use config::{ConfigError, ConfigOverrides, SimConfig};
pub use types::{CellCoord, GridDims};
