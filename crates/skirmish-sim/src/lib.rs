//! Simulation engine for SKIRMISH.
//!
//! Owns the unit table and navigation grid, turns pointer input into drag
//! selection and move orders, and steps every unit once per tick.

pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod selection;
pub mod systems;
pub mod units;

pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
