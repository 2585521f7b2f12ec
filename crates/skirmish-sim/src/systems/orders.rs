//! Drag-selection marking and move-order assignment for one slot.

use glam::Vec3;

use skirmish_core::constants::{DEFAULT_TINT, SELECTED_TINT};
use skirmish_core::types::Waypoint;

use crate::selection::DragSelection;
use crate::units::UnitTable;

/// Select or deselect the unit in slot `idx` by its ground position, and tint
/// it to match. Deleted slots are left untouched. Returns whether it is selected.
pub fn apply_drag(units: &mut UnitTable, idx: usize, drag: &DragSelection) -> bool {
    let (slots, mirror) = units.parts_mut();
    let Some(unit) = slots.get_mut(idx) else {
        return false;
    };
    if unit.slot.deleted {
        return false;
    }

    let p = mirror.position(idx);
    let inside = drag.contains(Vec3::new(p.x, 0.0, p.z));
    unit.selected = inside;
    mirror.set_tint(idx, if inside { SELECTED_TINT } else { DEFAULT_TINT });
    inside
}

/// Send the unit in slot `idx` to `point` if it is live and selected.
pub fn issue_order(units: &mut UnitTable, idx: usize, point: Vec3) -> bool {
    let (slots, _) = units.parts_mut();
    match slots.get_mut(idx) {
        Some(unit) if !unit.slot.deleted && unit.selected => {
            unit.waypoint = Waypoint::at(point);
            true
        }
        _ => false,
    }
}
