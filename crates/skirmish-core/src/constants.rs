//! Simulation constants and tuning parameters.

use glam::Vec3;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Minimum wall-clock gap between two ticks, in whole milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 1000 / TICK_RATE as u64;

// --- Units ---

/// Distance per tick a unit covers when no speed is configured.
pub const DEFAULT_UNIT_SPEED: f32 = 0.1;

/// A unit closer than this to its waypoint has arrived.
pub const ARRIVAL_RADIUS: f32 = 1.0;

/// Minimum separation enforced by the straight-line policy.
pub const DEFAULT_COLLISION_RADIUS: f32 = 5.0;

/// Canonical forward axis of an unrotated unit model.
pub const FORWARD: Vec3 = Vec3::Z;

/// Tint of an unselected unit (RGBA).
pub const DEFAULT_TINT: [f32; 4] = [0.3, 0.1, 0.1, 1.0];

/// Tint of a unit inside the drag rectangle (RGBA).
pub const SELECTED_TINT: [f32; 4] = [0.1, 0.3, 0.1, 1.0];

// --- Navigation grid ---

/// Grid columns.
pub const GRID_WIDTH: u32 = 300;

/// Grid rows.
pub const GRID_HEIGHT: u32 = 300;

/// World-space edge length of one cell.
pub const GRID_CELL_SIZE: f32 = 2.0;

// --- Selection quad ---

/// Floats in the selection quad buffer (4 vertices × xyz).
pub const QUAD_VERTEX_FLOATS: usize = 12;

/// Triangle indices for drawing the selection quad.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

// --- Opening layout ---

/// Tanks placed by `spawn_line` at startup.
pub const INITIAL_LINE_COUNT: usize = 10;

/// X coordinate of the first tank in the opening line.
pub const INITIAL_LINE_START_X: f32 = -30.0;

/// Gap between neighbouring tanks in the opening line.
pub const INITIAL_LINE_SPACING: f32 = 8.0;

/// Health of each tank in the opening line.
pub const INITIAL_LINE_HEALTH: i32 = 0;
