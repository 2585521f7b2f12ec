//! Tests for the tick engine: determinism, command handling, selection and orders.

use glam::Vec3;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::constants::{DEFAULT_TINT, INITIAL_LINE_COUNT, SELECTED_TINT};
use skirmish_core::enums::NavigationPolicy;

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::SimError;

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default()).unwrap()
}

fn drag(engine: &mut SimulationEngine, from: Vec3, to: Vec3) {
    engine.queue_commands([
        PlayerCommand::PointerMoved { ground: from },
        PlayerCommand::PrimaryDown,
        PlayerCommand::PointerMoved { ground: to },
    ]);
}

// ---- Construction ----

#[test]
fn test_invalid_grid_config_is_rejected() {
    let result = SimulationEngine::new(SimConfig {
        grid_width: 0,
        ..Default::default()
    });
    assert!(matches!(result, Err(SimError::Grid(_))));
}

#[test]
fn test_spawn_line_layout() {
    let mut engine = engine();
    let refs = engine.spawn_line(INITIAL_LINE_COUNT);
    assert_eq!(refs.len(), 10);
    for (i, r) in refs.iter().enumerate() {
        let p = engine.position(*r).unwrap();
        assert_eq!(p, Vec3::new(-30.0 + 8.0 * i as f32, 0.0, 0.0));
    }
    assert_eq!(engine.render_view().unit_count, 10);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();
    let mut b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();

    for engine in [&mut a, &mut b] {
        engine.spawn_line(INITIAL_LINE_COUNT);
        drag(engine, Vec3::new(-40.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 5.0));
        engine.queue_commands([
            PlayerCommand::PrimaryUp,
            PlayerCommand::PointerMoved {
                ground: Vec3::new(20.0, 0.0, 30.0),
            },
            PlayerCommand::SecondaryClick,
        ]);
    }

    for _ in 0..300 {
        let report_a = a.tick();
        let report_b = b.tick();
        assert_eq!(report_a, report_b);
        let json_a = serde_json::to_string(&a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();
    a.spawn_line(INITIAL_LINE_COUNT);
    b.spawn_line(INITIAL_LINE_COUNT);
    assert_ne!(a.snapshot().headings, b.snapshot().headings);
}

// ---- Commands ----

#[test]
fn test_commands_apply_at_tick_boundary() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::SpawnUnit {
        x: 1.0,
        z: 2.0,
        health: 5,
    });
    assert_eq!(engine.units().len(), 0);
    assert_eq!(engine.pending_commands(), 1);
    engine.tick();
    assert_eq!(engine.units().len(), 1);
    assert_eq!(engine.pending_commands(), 0);
}

#[test]
fn test_remove_command_ignores_stale_reference() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 1);
    engine.queue_commands([
        PlayerCommand::RemoveUnit { unit: r },
        PlayerCommand::RemoveUnit { unit: r },
    ]);
    engine.tick();
    assert!(!engine.validate(r));
}

#[test]
fn test_aim_pointer_queues_ground_hit() {
    let mut engine = engine();
    let hit = engine
        .aim_pointer(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 1.0))
        .unwrap();
    assert!((hit - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    engine.tick();
    assert_eq!(engine.selection().pointer(), hit);
}

#[test]
fn test_parallel_ray_leaves_pointer_alone() {
    let mut engine = engine();
    assert_eq!(
        engine.aim_pointer(Vec3::new(0.0, 10.0, 0.0), Vec3::X),
        Err(SimError::DegenerateRay)
    );
    assert_eq!(engine.pending_commands(), 0);
}

// ---- Selection ----

#[test]
fn test_drag_selects_and_tints() {
    let mut engine = engine();
    let inside = engine.spawn(0.0, 0.0, 1);
    let outside = engine.spawn(10.0, 10.0, 1);
    drag(&mut engine, Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));

    let report = engine.tick();
    assert_eq!(report.selected, 1);
    assert!(engine.unit(inside).unwrap().selected);
    assert!(!engine.unit(outside).unwrap().selected);
    let view = engine.render_view();
    assert!(view.dragging);
    assert_eq!(&view.tints[0..4], &SELECTED_TINT);
    assert_eq!(&view.tints[4..8], &DEFAULT_TINT);
}

#[test]
fn test_selection_freezes_after_drag_ends() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 1);
    drag(&mut engine, Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
    engine.tick();
    engine.queue_commands([
        PlayerCommand::PrimaryUp,
        PlayerCommand::PointerMoved {
            ground: Vec3::new(50.0, 0.0, 50.0),
        },
    ]);
    engine.tick();
    assert!(engine.unit(r).unwrap().selected);
    assert!(!engine.render_view().dragging);
}

#[test]
fn test_secondary_click_orders_selected_units() {
    let mut engine = engine();
    let chosen = engine.spawn(0.0, 0.0, 1);
    let other = engine.spawn(20.0, 0.0, 1);
    drag(&mut engine, Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
    engine.tick();

    let target = Vec3::new(0.0, 0.0, 30.0);
    engine.queue_commands([
        PlayerCommand::PrimaryUp,
        PlayerCommand::PointerMoved { ground: target },
        PlayerCommand::SecondaryClick,
    ]);
    engine.tick();
    assert_eq!(engine.unit(chosen).unwrap().waypoint.target(), Some(target));
    assert_eq!(engine.unit(other).unwrap().waypoint.target(), None);

    // Moves from the next tick on.
    let report = engine.tick();
    assert_eq!(report.moved, 1);
}

#[test]
fn test_order_while_dragging_is_dropped() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 1);
    drag(&mut engine, Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
    engine.queue_command(PlayerCommand::SecondaryClick);
    engine.tick();
    engine.queue_command(PlayerCommand::PrimaryUp);
    engine.tick();
    assert!(engine.unit(r).unwrap().selected);
    assert!(!engine.unit(r).unwrap().waypoint.set);
}

#[test]
fn test_halt_selected_clears_orders() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 1);
    let idle = engine.spawn(30.0, 0.0, 1);
    drag(&mut engine, Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
    engine.tick();
    engine.queue_command(PlayerCommand::PrimaryUp);
    engine.tick();
    engine.order(r, Vec3::new(40.0, 0.0, 0.0)).unwrap();
    engine.order(idle, Vec3::new(40.0, 0.0, 0.0)).unwrap();

    engine.queue_command(PlayerCommand::HaltSelected);
    engine.tick();
    assert!(!engine.unit(r).unwrap().waypoint.set);
    assert!(engine.unit(idle).unwrap().waypoint.set);
}

// ---- Orders and health ----

#[test]
fn test_cancel_order_stops_unit() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 1);
    engine.order(r, Vec3::new(40.0, 0.0, 0.0)).unwrap();
    engine.tick();
    let after_one = engine.position(r).unwrap();
    engine.cancel_order(r).unwrap();
    let report = engine.tick();
    assert_eq!(report.moved, 0);
    assert_eq!(engine.position(r).unwrap(), after_one);
}

#[test]
fn test_set_health_and_stale_handles() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 100);
    engine.set_health(r, 40).unwrap();
    assert_eq!(engine.unit(r).unwrap().health, 40);
    engine.remove(r).unwrap();
    assert_eq!(engine.set_health(r, 1), Err(SimError::StaleReference(r)));
    assert_eq!(
        engine.order(r, Vec3::ZERO),
        Err(SimError::StaleReference(r))
    );
    assert_eq!(engine.cancel_order(r), Err(SimError::StaleReference(r)));
}

#[test]
fn test_heading_follows_movement() {
    let mut engine = engine();
    let r = engine.spawn(0.0, 0.0, 1);
    engine.order(r, Vec3::new(0.0, 0.0, 20.0)).unwrap();
    engine.tick();
    assert!(engine.heading(r).unwrap().abs() < 1e-6);
}

// ---- Frame gate ----

#[test]
fn test_tick_if_due_respects_interval() {
    use std::time::Duration;
    let mut engine = engine();
    assert!(engine.tick_if_due(Duration::from_millis(0)).is_some());
    assert!(engine.tick_if_due(Duration::from_millis(5)).is_none());
    assert!(engine.tick_if_due(Duration::from_millis(16)).is_some());
    assert_eq!(engine.time().tick, 2);
}

// ---- Policy ----

#[test]
fn test_policy_comes_from_config() {
    let engine = SimulationEngine::new(SimConfig {
        policy: NavigationPolicy::StraightLine,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(engine.config().policy, NavigationPolicy::StraightLine);
}

#[test]
fn test_config_json_defaults_missing_fields() {
    let config: SimConfig = serde_json::from_str(r#"{"seed": 9, "unit_speed": 0.5}"#).unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.unit_speed, 0.5);
    assert_eq!(config.grid_width, SimConfig::default().grid_width);
}
