//! Snapshot system: copies the render mirror and selection quad out for the renderer.
//!
//! Read-only; never modifies the unit table.

use skirmish_core::constants::QUAD_VERTEX_FLOATS;
use skirmish_core::state::RenderSnapshot;
use skirmish_core::types::SimTime;

use crate::selection::SelectionController;
use crate::units::UnitTable;

/// Borrowed view of what the renderer draws, valid until the next tick.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub unit_count: usize,
    pub positions: &'a [f32],
    pub headings: &'a [f32],
    pub tints: &'a [f32],
    pub selection_quad: &'a [f32; QUAD_VERTEX_FLOATS],
    /// Draw the quad only while this is set.
    pub dragging: bool,
}

impl RenderView<'_> {
    pub fn to_snapshot(&self, time: SimTime) -> RenderSnapshot {
        RenderSnapshot {
            time,
            unit_count: self.unit_count,
            positions: self.positions.to_vec(),
            headings: self.headings.to_vec(),
            tints: self.tints.to_vec(),
            selection_quad: *self.selection_quad,
            dragging: self.dragging,
        }
    }
}

pub fn view<'a>(units: &'a UnitTable, selection: &'a SelectionController) -> RenderView<'a> {
    let mirror = units.mirror();
    RenderView {
        unit_count: mirror.len(),
        positions: mirror.positions(),
        headings: mirror.headings(),
        tints: mirror.tints(),
        selection_quad: selection.quad(),
        dragging: selection.is_dragging(),
    }
}

/// Build an owned snapshot of the current state.
pub fn build_snapshot(
    units: &UnitTable,
    selection: &SelectionController,
    time: &SimTime,
) -> RenderSnapshot {
    view(units, selection).to_snapshot(*time)
}
