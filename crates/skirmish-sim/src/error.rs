//! Error kinds raised by the simulation. None of them is fatal: the tick engine
//! logs and skips, or leaves the pending state in place for the next tick.

use thiserror::Error;

use skirmish_core::types::UnitRef;
use skirmish_nav::GridError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("stale unit reference {0}")]
    StaleReference(UnitRef),
    #[error("waypoint ({x:.2}, {z:.2}) of {unit} is off the navigation grid")]
    OffGridWaypoint { unit: UnitRef, x: f32, z: f32 },
    #[error("unit {unit} at ({x:.2}, {z:.2}) is off the navigation grid")]
    OffGridUnit { unit: UnitRef, x: f32, z: f32 },
    #[error("ray is parallel to the ground plane")]
    DegenerateRay,
    #[error("drag rectangle has zero extent")]
    DegenerateDragQuad,
    #[error(transparent)]
    Grid(#[from] GridError),
}
