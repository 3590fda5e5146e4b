//! wgpu render backend for the lifegrid simulator.
//!
//! Draws every live cell as one instance of a unit quad, placed in
//! normalized device coordinates by [`lifegrid_render::cell_quad`].
//!
//! # Invariants
//! - The backend never sees grid state, only per-frame cell quads.
//! - Instance data is rebuilt every frame; nothing is cached per cell.

mod gpu;
mod shaders;

pub use gpu::CellRenderer;
