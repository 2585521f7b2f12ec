//! Enumerations used across the simulation.

use serde::{Deserialize, Serialize};

/// How a unit with a pending waypoint chooses its next step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationPolicy {
    /// Step toward the best-scoring neighbouring grid cell (one-step lookahead).
    #[default]
    GridGreedy,
    /// Head straight for the waypoint; undo any step that comes within the
    /// collision radius of another unit.
    StraightLine,
}

/// Per-tick state of a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitState {
    /// No pending waypoint.
    Idle,
    /// Waypoint set and at least `ARRIVAL_RADIUS` away.
    Navigating,
    /// Waypoint set and within `ARRIVAL_RADIUS`; cleared on the next update.
    Arrived,
}

impl NavigationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationPolicy::GridGreedy => "grid_greedy",
            NavigationPolicy::StraightLine => "straight_line",
        }
    }
}
