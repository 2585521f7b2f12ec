use std::thread;
use std::time::Duration;

use glam::Vec3;
use tracing::{info, warn};

use skirmish_app::camera::Camera;
use skirmish_app::error::AppError;
use skirmish_app::game_loop::{spawn_game_loop, GameLoopHandle};
use skirmish_app::settings::Settings;
use skirmish_app::state::{latest, new_shared_snapshot};
use skirmish_core::commands::PlayerCommand;
use skirmish_core::constants::INITIAL_LINE_COUNT;
use skirmish_sim::SimulationEngine;

/// Pause between scripted inputs, long enough for a few ticks to run.
const STEP: Duration = Duration::from_millis(100);

fn main() -> Result<(), AppError> {
    init_tracing();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    info!(?settings, "Starting SKIRMISH headless demo");

    let camera = Camera::from_settings(&settings);
    let mut engine = SimulationEngine::new(settings.sim_config())?;
    let line = engine.spawn_line(INITIAL_LINE_COUNT);

    let shared = new_shared_snapshot();
    let handle = spawn_game_loop(engine, shared.clone())?;

    // Box the left half of the line, then send it forward.
    drag_select(
        &handle,
        &camera,
        Vec3::new(-34.0, 0.0, -4.0),
        Vec3::new(5.0, 0.0, 4.0),
    );
    point_at(&handle, &camera, Vec3::new(-10.0, 0.0, -20.0));
    handle.send(PlayerCommand::SecondaryClick);
    thread::sleep(Duration::from_secs(3));

    if let Some(snapshot) = latest(&shared) {
        info!(
            tick = snapshot.time.tick,
            units = snapshot.unit_count,
            "final snapshot"
        );
    }

    let engine = handle.shutdown()?;
    for unit_ref in line {
        let unit = engine.unit(unit_ref)?;
        let position = engine.position(unit_ref)?;
        info!(
            unit = %unit_ref,
            selected = unit.selected,
            moving = unit.waypoint.set,
            x = position.x,
            z = position.z,
            "unit"
        );
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Move the pointer over a ground point by picking through the pixel it projects to.
fn point_at(handle: &GameLoopHandle, camera: &Camera, ground: Vec3) {
    let Some(ndc) = camera.world_to_ndc(ground) else {
        warn!(%ground, "point is behind the camera");
        return;
    };
    let pixel = camera.ndc_to_window(ndc);
    match camera.pick_ground(pixel.x, pixel.y) {
        Ok(hit) => {
            handle.send(PlayerCommand::PointerMoved { ground: hit });
        }
        Err(err) => warn!(%err, "pointer ray missed the ground"),
    }
    thread::sleep(STEP);
}

fn drag_select(handle: &GameLoopHandle, camera: &Camera, from: Vec3, to: Vec3) {
    point_at(handle, camera, from);
    handle.send(PlayerCommand::PrimaryDown);
    thread::sleep(STEP);
    point_at(handle, camera, to);
    handle.send(PlayerCommand::PrimaryUp);
    thread::sleep(STEP);
}
