//! Generational unit table with a struct-of-arrays render mirror.
//!
//! Slots are never removed from the backing arrays; a removed unit's slot is
//! flagged deleted and reclaimed by the next `create`, with its generation
//! bumped so handles issued before the removal stop validating.

use glam::Vec3;
use rand::Rng;
use tracing::trace;

use skirmish_core::constants::DEFAULT_TINT;
use skirmish_core::types::{Unit, UnitRef, Waypoint};

use crate::error::SimError;

/// Flat per-slot arrays the renderer uploads verbatim.
/// Slot `i` owns `positions[3i..3i+3]`, `headings[i]` and `tints[4i..4i+4]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMirror {
    positions: Vec<f32>,
    headings: Vec<f32>,
    tints: Vec<f32>,
}

impl RenderMirror {
    fn push(&mut self, position: Vec3, heading: f32, tint: [f32; 4]) {
        self.positions.extend_from_slice(&position.to_array());
        self.headings.push(heading);
        self.tints.extend_from_slice(&tint);
    }

    /// Number of slots mirrored.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn headings(&self) -> &[f32] {
        &self.headings
    }

    pub fn tints(&self) -> &[f32] {
        &self.tints
    }

    pub fn position(&self, idx: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[3 * idx..3 * idx + 3])
    }

    pub fn set_position(&mut self, idx: usize, position: Vec3) {
        self.positions[3 * idx..3 * idx + 3].copy_from_slice(&position.to_array());
    }

    pub fn heading(&self, idx: usize) -> f32 {
        self.headings[idx]
    }

    pub fn set_heading(&mut self, idx: usize, heading: f32) {
        self.headings[idx] = heading;
    }

    pub fn tint(&self, idx: usize) -> [f32; 4] {
        let mut out = [0.0; 4];
        out.copy_from_slice(&self.tints[4 * idx..4 * idx + 4]);
        out
    }

    pub fn set_tint(&mut self, idx: usize, tint: [f32; 4]) {
        self.tints[4 * idx..4 * idx + 4].copy_from_slice(&tint);
    }
}

/// Unit slots plus their render mirror, always the same length.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: Vec<Unit>,
    mirror: RenderMirror,
    speed: f32,
}

impl UnitTable {
    /// Create an empty table whose units move `speed` world units per tick.
    pub fn new(speed: f32) -> Self {
        Self {
            units: Vec::new(),
            mirror: RenderMirror::default(),
            speed,
        }
    }

    /// Create a unit on the ground at `(x, z)`, reusing the first deleted slot if any.
    /// The heading is a random whole number of degrees in `[0, 360)`.
    pub fn create<R: Rng + ?Sized>(&mut self, x: f32, z: f32, health: i32, rng: &mut R) -> UnitRef {
        let heading = (rng.gen_range(0..360u32) as f32).to_radians();
        let position = Vec3::new(x, 0.0, z);

        if let Some(idx) = self.units.iter().position(Unit::is_deleted) {
            let generation = self.units[idx].slot.generation.wrapping_add(1);
            let mut unit = Unit::new(health, self.speed);
            unit.slot.generation = generation;
            self.units[idx] = unit;

            self.mirror.set_position(idx, position);
            self.mirror.set_heading(idx, heading);
            self.mirror.set_tint(idx, DEFAULT_TINT);

            let unit_ref = UnitRef::new(idx as u32, generation);
            trace!(unit = %unit_ref, "reused unit slot");
            return unit_ref;
        }

        let idx = self.units.len();
        self.units.push(Unit::new(health, self.speed));
        self.mirror.push(position, heading, DEFAULT_TINT);

        let unit_ref = UnitRef::new(idx as u32, 0);
        trace!(unit = %unit_ref, "appended unit slot");
        unit_ref
    }

    /// True iff `unit_ref` addresses a live unit of the same generation.
    pub fn validate(&self, unit_ref: UnitRef) -> bool {
        self.units
            .get(unit_ref.slot())
            .is_some_and(|u| !u.slot.deleted && u.slot.generation == unit_ref.generation)
    }

    /// Mark the unit deleted. The slot stays allocated for reuse.
    pub fn remove(&mut self, unit_ref: UnitRef) -> Result<(), SimError> {
        let unit = self.get_mut(unit_ref)?;
        unit.slot.deleted = true;
        unit.selected = false;
        unit.waypoint.clear();
        trace!(unit = %unit_ref, "removed unit");
        Ok(())
    }

    pub fn get(&self, unit_ref: UnitRef) -> Result<&Unit, SimError> {
        if !self.validate(unit_ref) {
            return Err(SimError::StaleReference(unit_ref));
        }
        Ok(&self.units[unit_ref.slot()])
    }

    pub fn get_mut(&mut self, unit_ref: UnitRef) -> Result<&mut Unit, SimError> {
        if !self.validate(unit_ref) {
            return Err(SimError::StaleReference(unit_ref));
        }
        Ok(&mut self.units[unit_ref.slot()])
    }

    /// World position of a live unit.
    pub fn position(&self, unit_ref: UnitRef) -> Result<Vec3, SimError> {
        self.get(unit_ref)?;
        Ok(self.mirror.position(unit_ref.slot()))
    }

    /// Give a live unit a new destination.
    pub fn set_waypoint(&mut self, unit_ref: UnitRef, point: Vec3) -> Result<(), SimError> {
        self.get_mut(unit_ref)?.waypoint = Waypoint::at(point);
        Ok(())
    }

    /// Cancel a live unit's pending order.
    pub fn cancel_order(&mut self, unit_ref: UnitRef) -> Result<(), SimError> {
        self.get_mut(unit_ref)?.waypoint.clear();
        Ok(())
    }

    pub fn set_health(&mut self, unit_ref: UnitRef, health: i32) -> Result<(), SimError> {
        self.get_mut(unit_ref)?.health = health;
        Ok(())
    }

    /// Handle for whatever currently occupies slot `idx`, deleted or not.
    pub fn reference_at(&self, idx: usize) -> Option<UnitRef> {
        self.units
            .get(idx)
            .map(|u| UnitRef::new(idx as u32, u.slot.generation))
    }

    /// Handles of all live units, in slot order.
    pub fn live_refs(&self) -> impl Iterator<Item = UnitRef> + '_ {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| !u.slot.deleted)
            .map(|(i, u)| UnitRef::new(i as u32, u.slot.generation))
    }

    /// Number of slots, including deleted ones.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.units.iter().filter(|u| !u.slot.deleted).count()
    }

    pub fn selected_count(&self) -> usize {
        self.units
            .iter()
            .filter(|u| !u.slot.deleted && u.selected)
            .count()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn mirror(&self) -> &RenderMirror {
        &self.mirror
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Slots and mirror borrowed together, for the per-tick systems.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Unit], &mut RenderMirror) {
        (&mut self.units, &mut self.mirror)
    }
}
