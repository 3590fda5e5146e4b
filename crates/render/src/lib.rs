//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate grid state; they only see live coordinates.
//! - Graphics resources are owned by the renderer and keyed by coordinate,
//!   never stored on cells.
//! - Grid cells tile the `[-1, 1]` viewport exactly.

mod renderer;
mod text;
mod viewport;

pub use renderer::{GraphicsInitError, Renderer, render_grid};
pub use text::TextRenderer;
pub use viewport::{CellQuad, cell_quad};
