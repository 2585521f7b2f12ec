//! Player and host commands sent to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, in arrival order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::UnitRef;

/// All possible inputs to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Pointer ---
    /// The pointer ray hit the ground plane at `ground`.
    PointerMoved { ground: Vec3 },
    /// Primary button pressed (starts a drag if none is active).
    PrimaryDown,
    /// Primary button released (ends the drag).
    PrimaryUp,
    /// Secondary button clicked (orders selected units to the pointer).
    SecondaryClick,

    // --- Orders ---
    /// Clear the waypoint of every selected unit.
    HaltSelected,

    // --- Unit lifetime ---
    /// Create a unit at ground coordinates (x, z).
    SpawnUnit { x: f32, z: f32, health: i32 },
    /// Remove a unit. Stale handles are ignored.
    RemoveUnit { unit: UnitRef },
}
