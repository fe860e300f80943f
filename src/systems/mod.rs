//! Application systems
//!
//! Host-side drivers around the physics world.

mod harness;
mod simulation;

pub use harness::{Harness, HarnessError, HarnessReport};
pub use simulation::SimulationSystem;
