//! Fundamental handle, unit and time types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{ARRIVAL_RADIUS, DEFAULT_UNIT_SPEED};
use crate::enums::UnitState;

/// Storage tag for one unit slot.
///
/// `generation` increments every time the slot is recycled, so a handle issued
/// before the recycle no longer matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub generation: u32,
    pub deleted: bool,
}

/// Non-owning handle to a unit. Always validated against the unit table before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRef {
    pub generation: u32,
    pub index: u32,
}

impl UnitRef {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { generation, index }
    }

    /// Slot position in the backing arrays.
    pub fn slot(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for UnitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U{}g{}", self.index, self.generation)
    }
}

/// Pending destination of a unit. `set == false` means "no order".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub point: Vec3,
    pub set: bool,
}

impl Waypoint {
    pub fn at(point: Vec3) -> Self {
        Self { point, set: true }
    }

    /// The destination, if an order is pending.
    pub fn target(&self) -> Option<Vec3> {
        self.set.then_some(self.point)
    }

    /// Cancel the order. The last point is kept for inspection.
    pub fn clear(&mut self) {
        self.set = false;
    }
}

/// One simulated tank. Spatial state lives in the render mirror, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub slot: Slot,
    pub health: i32,
    /// Last step taken (already scaled by `speed`).
    pub direction: Vec3,
    pub speed: f32,
    pub selected: bool,
    pub waypoint: Waypoint,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            slot: Slot::default(),
            health: 0,
            direction: Vec3::ZERO,
            speed: DEFAULT_UNIT_SPEED,
            selected: false,
            waypoint: Waypoint::default(),
        }
    }
}

impl Unit {
    pub fn new(health: i32, speed: f32) -> Self {
        Self {
            health,
            speed,
            ..Self::default()
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.slot.deleted
    }

    /// Classify the unit given its current world position.
    pub fn state(&self, position: Vec3) -> UnitState {
        match self.waypoint.target() {
            None => UnitState::Idle,
            Some(point) if position.distance(point) < ARRIVAL_RADIUS => UnitState::Arrived,
            Some(_) => UnitState::Navigating,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
