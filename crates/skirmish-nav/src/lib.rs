//! Navigation grid for SKIRMISH.
//!
//! A fixed uniform grid over the ground plane, centred on the world origin.
//! Provides world/cell transforms, 8-neighbour enumeration and the
//! greedy step score used by the tick engine.

pub use skirmish_core as core;

pub mod grid;

pub use grid::{CellIndex, GridError, NavCell, NavGrid, NEIGHBOR_OFFSETS};
