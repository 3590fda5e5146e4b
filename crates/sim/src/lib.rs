//! Simulation Loop: fixed-rate generation ticks driving a renderer.
//!
//! # Invariants
//! - Exactly one generation advance per tick, then exactly one frame.
//! - The close signal is checked before every tick.
//! - One thread owns the grid; ticks never overlap.
//! - Ticks are paced against deadlines, so draw time shortens the wait
//!   instead of adding to it.

mod sim_loop;
mod timer;

pub use sim_loop::{LoopState, LoopStats, SimError, SimulationLoop, StopReason};
pub use timer::TickTimer;
