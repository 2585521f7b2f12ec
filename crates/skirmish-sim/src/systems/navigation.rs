//! Waypoint following: turns a unit's pending waypoint into a heading and a
//! one-tick position step.
//!
//! Two policies are available. `GridGreedy` steps toward the neighbouring grid
//! cell that scores best against the waypoint's cell. `StraightLine` heads
//! directly for the waypoint and undoes any step that would bring the unit
//! within the collision radius of another live unit.

use glam::{Quat, Vec3};

use skirmish_core::constants::FORWARD;
use skirmish_core::enums::{NavigationPolicy, UnitState};
use skirmish_core::types::{Unit, UnitRef};
use skirmish_nav::NavGrid;

use crate::error::SimError;
use crate::units::{RenderMirror, UnitTable};

/// Navigation settings shared by every unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavParams {
    pub policy: NavigationPolicy,
    /// Only used by `StraightLine`.
    pub collision_radius: f32,
}

/// Result of one unit's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No pending waypoint.
    Idle,
    /// Within arrival range; the waypoint has been cleared.
    Arrived,
    /// Advanced one step.
    Moved,
    /// Turned toward the waypoint but the step was rejected (straight-line only).
    Blocked,
}

/// Planar bearing from `from` to `to`, both `(x, z)`, in the renderer's convention.
pub fn heading_between(from: (f32, f32), to: (f32, f32)) -> f32 {
    -(to.0 - from.0).atan2(to.1 - from.1)
}

/// Unit direction a model faces at `heading`.
pub fn direction_from_heading(heading: f32) -> Vec3 {
    // The renderer multiplies row vectors by the model rotation, which turns
    // the forward axis by -heading about +Y.
    Quat::from_rotation_y(-heading) * FORWARD
}

/// Heading toward the best neighbouring cell on the way to `target`.
///
/// Inside the waypoint's own cell no neighbour scores better, so the unit
/// steers straight at the waypoint for the final approach.
pub fn grid_heading(
    grid: &NavGrid,
    unit_ref: UnitRef,
    position: Vec3,
    target: Vec3,
) -> Result<f32, SimError> {
    let to = grid
        .real_to_cell(target.x, target.z)
        .ok_or(SimError::OffGridWaypoint {
            unit: unit_ref,
            x: target.x,
            z: target.z,
        })?;
    let from = grid
        .real_to_cell(position.x, position.z)
        .ok_or(SimError::OffGridUnit {
            unit: unit_ref,
            x: position.x,
            z: position.z,
        })?;

    let direct = heading_between((position.x, position.z), (target.x, target.z));
    if from == to {
        return Ok(direct);
    }
    let Some(next) = grid.best_step(from, to) else {
        return Ok(direct);
    };
    Ok(heading_between(grid.cell_to_real(from), grid.cell_to_real(next)))
}

/// Advance one unit by one tick.
///
/// Fails with `StaleReference` if `unit_ref` does not validate, and with an
/// off-grid error (leaving the unit and its waypoint untouched) under
/// `GridGreedy` when either end of the path has no cell.
pub fn update_unit(
    units: &mut UnitTable,
    grid: &NavGrid,
    params: &NavParams,
    unit_ref: UnitRef,
) -> Result<StepOutcome, SimError> {
    let unit = *units.get(unit_ref)?;
    let idx = unit_ref.slot();
    let (slots, mirror) = units.parts_mut();
    let position = mirror.position(idx);

    match unit.state(position) {
        UnitState::Idle => Ok(StepOutcome::Idle),
        UnitState::Arrived => {
            slots[idx].waypoint.clear();
            Ok(StepOutcome::Arrived)
        }
        UnitState::Navigating => {
            let target = unit.waypoint.point;
            let heading = match params.policy {
                NavigationPolicy::GridGreedy => grid_heading(grid, unit_ref, position, target)?,
                NavigationPolicy::StraightLine => {
                    heading_between((position.x, position.z), (target.x, target.z))
                }
            };

            let step = direction_from_heading(heading) * unit.speed;
            slots[idx].direction = step;
            mirror.set_heading(idx, heading);

            let next = position + step;
            if params.policy == NavigationPolicy::StraightLine
                && collides(slots, mirror, idx, next, params.collision_radius)
            {
                return Ok(StepOutcome::Blocked);
            }
            mirror.set_position(idx, next);
            Ok(StepOutcome::Moved)
        }
    }
}

/// Whether `position` lies within `radius` of any live unit other than `idx`.
fn collides(slots: &[Unit], mirror: &RenderMirror, idx: usize, position: Vec3, radius: f32) -> bool {
    slots
        .iter()
        .enumerate()
        .filter(|&(j, u)| j != idx && !u.slot.deleted)
        .any(|(j, _)| mirror.position(j).distance(position) < radius)
}
