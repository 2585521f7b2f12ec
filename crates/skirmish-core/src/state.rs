//! Per-tick outputs: the render snapshot handed to the renderer and the tick report.

use serde::{Deserialize, Serialize};

use crate::constants::QUAD_VERTEX_FLOATS;
use crate::types::{SimTime, UnitRef};

/// Owned copy of everything the renderer draws after a completed tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub time: SimTime,
    /// Number of unit slots (instance count), including deleted ones.
    pub unit_count: usize,
    /// xyz per slot.
    pub positions: Vec<f32>,
    /// Radians per slot.
    pub headings: Vec<f32>,
    /// RGBA per slot.
    pub tints: Vec<f32>,
    /// Selection quad, four xyz vertices.
    pub selection_quad: [f32; QUAD_VERTEX_FLOATS],
    /// Whether the selection quad should be drawn.
    pub dragging: bool,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Units whose position changed.
    pub moved: u32,
    /// Units that reached their waypoint this tick.
    pub arrived: Vec<UnitRef>,
    /// Units held in place because they or their waypoint are off the grid.
    pub frozen: Vec<UnitRef>,
    /// References that failed validation and were skipped.
    pub stale_skipped: u32,
    /// Units currently selected.
    pub selected: u32,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.moved == 0 && self.arrived.is_empty() && self.frozen.is_empty()
    }
}
