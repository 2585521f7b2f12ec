//! Simulation engine: owns the unit table, navigation grid and pointer state,
//! applies queued commands and steps every unit once per tick. Headless, so
//! the same seed and command stream always produce the same snapshots.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use skirmish_core::commands::PlayerCommand;
use skirmish_core::constants::{
    DEFAULT_COLLISION_RADIUS, DEFAULT_UNIT_SPEED, GRID_CELL_SIZE, GRID_HEIGHT, GRID_WIDTH,
    INITIAL_LINE_HEALTH, INITIAL_LINE_SPACING, INITIAL_LINE_START_X,
};
use skirmish_core::enums::NavigationPolicy;
use skirmish_core::state::{RenderSnapshot, TickReport};
use skirmish_core::types::{SimTime, Unit, UnitRef};
use skirmish_nav::NavGrid;

use crate::error::SimError;
use crate::frame::FrameGate;
use crate::geometry::ray_ground_plane_intersection;
use crate::selection::SelectionController;
use crate::systems;
use crate::systems::navigation::{NavParams, StepOutcome};
use crate::systems::snapshot::RenderView;
use crate::units::UnitTable;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for spawn headings. Same seed = same simulation.
    pub seed: u64,
    /// Distance per tick for every unit.
    pub unit_speed: f32,
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: f32,
    pub policy: NavigationPolicy,
    /// Minimum separation under `NavigationPolicy::StraightLine`.
    pub collision_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            unit_speed: DEFAULT_UNIT_SPEED,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: GRID_CELL_SIZE,
            policy: NavigationPolicy::default(),
            collision_radius: DEFAULT_COLLISION_RADIUS,
        }
    }
}

/// The simulation engine. Owns all unit and pointer state.
pub struct SimulationEngine {
    config: SimConfig,
    units: UnitTable,
    grid: NavGrid,
    selection: SelectionController,
    nav: NavParams,
    time: SimTime,
    rng: ChaCha8Rng,
    gate: FrameGate,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create an engine with an empty battlefield.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let grid = NavGrid::new(config.grid_width, config.grid_height, config.cell_size)?;
        Ok(Self {
            units: UnitTable::new(config.unit_speed),
            grid,
            selection: SelectionController::new(),
            nav: NavParams {
                policy: config.policy,
                collision_radius: config.collision_radius,
            },
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            gate: FrameGate::default(),
            command_queue: VecDeque::new(),
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickReport {
        self.process_commands();

        let mut report = TickReport {
            tick: self.time.tick,
            ..TickReport::default()
        };

        let drag = self.selection.drag();
        if drag.is_some() {
            self.selection.rebuild_quad();
        }
        let order = self.selection.take_order();
        if let Some(point) = order {
            self.check_order_target(point);
        }

        for idx in 0..self.units.len() {
            let Some(unit_ref) = self.units.reference_at(idx) else {
                continue;
            };
            match systems::navigation::update_unit(&mut self.units, &self.grid, &self.nav, unit_ref)
            {
                Ok(StepOutcome::Moved) => report.moved += 1,
                Ok(StepOutcome::Arrived) => {
                    debug!(unit = %unit_ref, "arrived at waypoint");
                    report.arrived.push(unit_ref);
                }
                Ok(StepOutcome::Idle | StepOutcome::Blocked) => {}
                Err(err @ (SimError::OffGridWaypoint { .. } | SimError::OffGridUnit { .. })) => {
                    debug!(%err, "holding unit in place");
                    report.frozen.push(unit_ref);
                }
                Err(err) => {
                    debug!(%err, "skipping slot");
                    report.stale_skipped += 1;
                    continue;
                }
            }

            if let Some(drag) = &drag {
                systems::orders::apply_drag(&mut self.units, idx, drag);
            } else if let Some(point) = order {
                systems::orders::issue_order(&mut self.units, idx, point);
            }
        }

        self.time.advance();
        report.selected = self.units.selected_count() as u32;
        report
    }

    /// Tick only if the frame gate allows it at `now`.
    pub fn tick_if_due(&mut self, now: Duration) -> Option<TickReport> {
        self.gate.ready(now).then(|| self.tick())
    }

    /// Create a unit on the ground at `(x, z)`.
    pub fn spawn(&mut self, x: f32, z: f32, health: i32) -> UnitRef {
        let unit_ref = self.units.create(x, z, health, &mut self.rng);
        debug!(unit = %unit_ref, x, z, "spawned unit");
        unit_ref
    }

    /// Lay out `count` tanks in a row along the x axis, the opening battlefield.
    pub fn spawn_line(&mut self, count: usize) -> Vec<UnitRef> {
        (0..count)
            .map(|i| {
                let x = INITIAL_LINE_START_X + i as f32 * INITIAL_LINE_SPACING;
                self.spawn(x, 0.0, INITIAL_LINE_HEALTH)
            })
            .collect()
    }

    pub fn remove(&mut self, unit_ref: UnitRef) -> Result<(), SimError> {
        self.units.remove(unit_ref)?;
        debug!(unit = %unit_ref, "removed unit");
        Ok(())
    }

    pub fn validate(&self, unit_ref: UnitRef) -> bool {
        self.units.validate(unit_ref)
    }

    pub fn unit(&self, unit_ref: UnitRef) -> Result<&Unit, SimError> {
        self.units.get(unit_ref)
    }

    pub fn position(&self, unit_ref: UnitRef) -> Result<Vec3, SimError> {
        self.units.position(unit_ref)
    }

    pub fn heading(&self, unit_ref: UnitRef) -> Result<f32, SimError> {
        self.units.get(unit_ref)?;
        Ok(self.units.mirror().heading(unit_ref.slot()))
    }

    /// Send one unit to `point`, bypassing selection.
    pub fn order(&mut self, unit_ref: UnitRef, point: Vec3) -> Result<(), SimError> {
        self.units.set_waypoint(unit_ref, point)?;
        self.check_order_target(point);
        Ok(())
    }

    pub fn cancel_order(&mut self, unit_ref: UnitRef) -> Result<(), SimError> {
        self.units.cancel_order(unit_ref)
    }

    pub fn set_health(&mut self, unit_ref: UnitRef, health: i32) -> Result<(), SimError> {
        self.units.set_health(unit_ref, health)
    }

    /// Clear the waypoint of every selected unit. Returns how many were halted.
    pub fn halt_selected(&mut self) -> usize {
        let selected: Vec<UnitRef> = self
            .units
            .live_refs()
            .filter(|r| self.units.get(*r).is_ok_and(|u| u.selected))
            .collect();
        for &unit_ref in &selected {
            // Refs were just listed as live.
            let _ = self.units.cancel_order(unit_ref);
        }
        selected.len()
    }

    /// Cast the pointer ray onto the ground and queue the resulting pointer move.
    /// A ray parallel to the ground leaves the pointer where it was.
    pub fn aim_pointer(&mut self, origin: Vec3, direction: Vec3) -> Result<Vec3, SimError> {
        let ground = ray_ground_plane_intersection(direction, origin)?;
        self.queue_command(PlayerCommand::PointerMoved { ground });
        Ok(ground)
    }

    /// Read-only view of the render arrays, valid until the next mutation.
    pub fn render_view(&self) -> RenderView<'_> {
        systems::snapshot::view(&self.units, &self.selection)
    }

    /// Owned copy of the render arrays.
    pub fn snapshot(&self) -> RenderSnapshot {
        systems::snapshot::build_snapshot(&self.units, &self.selection, &self.time)
    }

    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Mutable grid access, for editing discomfort between ticks.
    pub fn grid_mut(&mut self) -> &mut NavGrid {
        &mut self.grid
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pending_commands(&self) -> usize {
        self.command_queue.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PointerMoved { ground } => self.selection.pointer_moved(ground),
            PlayerCommand::PrimaryDown => self.selection.primary_down(),
            PlayerCommand::PrimaryUp => self.selection.primary_up(),
            PlayerCommand::SecondaryClick => self.selection.secondary_click(),
            PlayerCommand::HaltSelected => {
                let halted = self.halt_selected();
                debug!(halted, "halted selected units");
            }
            PlayerCommand::SpawnUnit { x, z, health } => {
                self.spawn(x, z, health);
            }
            PlayerCommand::RemoveUnit { unit } => {
                if let Err(err) = self.remove(unit) {
                    debug!(%err, "ignoring remove");
                }
            }
        }
    }

    /// Grid navigation cannot reach a waypoint outside the grid; say so once
    /// when the order is given rather than on every frozen tick.
    fn check_order_target(&self, point: Vec3) {
        if self.nav.policy == NavigationPolicy::GridGreedy
            && self.grid.real_to_cell(point.x, point.z).is_none()
        {
            warn!(x = point.x, z = point.z, "order target is off the navigation grid");
        }
    }
}
