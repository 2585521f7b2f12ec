//! End-to-end battlefield scenarios driven through the public engine API.

use glam::Vec3;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::enums::NavigationPolicy;
use skirmish_sim::{SimConfig, SimError, SimulationEngine};

fn engine_with(config: SimConfig) -> SimulationEngine {
    SimulationEngine::new(config).expect("valid config")
}

#[test]
fn grid_greedy_unit_reaches_waypoint_and_stops() {
    let mut engine = engine_with(SimConfig {
        grid_width: 300,
        grid_height: 300,
        cell_size: 2.0,
        unit_speed: 0.1,
        ..Default::default()
    });
    let unit = engine.spawn(0.0, 0.0, 100);
    let target = Vec3::new(8.0, 0.0, 0.0);
    engine.order(unit, target).unwrap();

    let mut last = engine.position(unit).unwrap().distance(target);
    let mut arrived_at = None;
    for _ in 0..500 {
        let report = engine.tick();
        let now = engine.position(unit).unwrap().distance(target);
        assert!(now <= last + 1e-5, "distance went up: {last} -> {now}");
        last = now;
        if report.arrived.contains(&unit) {
            arrived_at = Some(report.tick);
            break;
        }
    }

    assert!(arrived_at.is_some(), "unit never arrived");
    assert!(last < 1.0);
    assert!(!engine.unit(unit).unwrap().waypoint.set);

    // Stays put afterwards.
    let resting = engine.position(unit).unwrap();
    for _ in 0..10 {
        let report = engine.tick();
        assert!(report.is_quiet());
    }
    assert_eq!(engine.position(unit).unwrap(), resting);
}

#[test]
fn recycled_slot_keeps_index_with_new_generation() {
    let mut engine = engine_with(SimConfig::default());
    let refs: Vec<_> = (0..10).map(|i| engine.spawn(i as f32, 0.0, 1)).collect();
    let removed = refs[4];
    engine.remove(removed).unwrap();

    let fresh = engine.spawn(0.0, 0.0, 1);
    assert_eq!(fresh.index, removed.index);
    assert_ne!(fresh.generation, removed.generation);
    assert!(engine.validate(fresh));
    assert!(!engine.validate(removed));
    assert_eq!(engine.units().len(), 10);
}

#[test]
fn drag_box_selects_only_units_inside() {
    let mut engine = engine_with(SimConfig::default());
    let near = engine.spawn(0.0, 0.0, 1);
    let far = engine.spawn(10.0, 10.0, 1);
    engine.queue_commands([
        PlayerCommand::PointerMoved {
            ground: Vec3::new(-5.0, 0.0, -5.0),
        },
        PlayerCommand::PrimaryDown,
        PlayerCommand::PointerMoved {
            ground: Vec3::new(5.0, 0.0, 5.0),
        },
    ]);
    engine.tick();

    assert!(engine.unit(near).unwrap().selected);
    assert!(!engine.unit(far).unwrap().selected);
    assert_eq!(
        engine.render_view().selection_quad,
        &[-5.0, 0.0, -5.0, -5.0, 0.0, 5.0, 5.0, 0.0, 5.0, 5.0, 0.0, -5.0]
    );
}

#[test]
fn off_grid_waypoint_freezes_unit_until_replaced() {
    let mut engine = engine_with(SimConfig::default());
    let unit = engine.spawn(0.0, 0.0, 1);
    engine.order(unit, Vec3::new(1000.0, 0.0, 0.0)).unwrap();

    for _ in 0..5 {
        let report = engine.tick();
        assert_eq!(report.frozen, vec![unit]);
        assert_eq!(report.moved, 0);
    }
    assert_eq!(engine.position(unit).unwrap(), Vec3::ZERO);
    assert!(engine.unit(unit).unwrap().waypoint.set);

    engine.order(unit, Vec3::new(10.0, 0.0, 0.0)).unwrap();
    let report = engine.tick();
    assert!(report.frozen.is_empty());
    assert_eq!(report.moved, 1);
}

#[test]
fn removed_units_are_skipped_each_tick() {
    let mut engine = engine_with(SimConfig::default());
    let a = engine.spawn(0.0, 0.0, 1);
    let b = engine.spawn(5.0, 0.0, 1);
    engine.order(a, Vec3::new(20.0, 0.0, 0.0)).unwrap();
    engine.order(b, Vec3::new(20.0, 0.0, 0.0)).unwrap();
    engine.remove(b).unwrap();

    let frozen_b = engine.render_view().positions[3..6].to_vec();
    let report = engine.tick();
    assert_eq!(report.stale_skipped, 1);
    assert_eq!(report.moved, 1);
    assert_eq!(&engine.render_view().positions[3..6], frozen_b.as_slice());
    assert_eq!(engine.position(b), Err(SimError::StaleReference(b)));
}

#[test]
fn straight_line_policy_stops_short_of_other_units() {
    let mut engine = engine_with(SimConfig {
        policy: NavigationPolicy::StraightLine,
        unit_speed: 0.5,
        collision_radius: 5.0,
        ..Default::default()
    });
    let mover = engine.spawn(0.0, 0.0, 1);
    let wall = engine.spawn(20.0, 0.0, 0);
    engine.order(mover, Vec3::new(20.0, 0.0, 0.0)).unwrap();

    for _ in 0..200 {
        engine.tick();
    }
    let gap = engine
        .position(mover)
        .unwrap()
        .distance(engine.position(wall).unwrap());
    assert!(gap >= 5.0, "gap {gap}");
    assert!(gap <= 5.5 + 1e-3, "gap {gap}");
    assert!(engine.unit(mover).unwrap().waypoint.set);
}

#[test]
fn straight_line_policy_crosses_grid_edge() {
    let mut engine = engine_with(SimConfig {
        policy: NavigationPolicy::StraightLine,
        grid_width: 4,
        grid_height: 4,
        ..Default::default()
    });
    let unit = engine.spawn(0.0, 0.0, 1);
    // The grid spans [-4, 4) on each axis.
    engine.order(unit, Vec3::new(0.0, 0.0, 6.0)).unwrap();
    for _ in 0..100 {
        engine.tick();
    }
    assert!(!engine.unit(unit).unwrap().waypoint.set);
    assert!(engine.position(unit).unwrap().z > 5.0);
}

#[test]
fn cancelled_order_leaves_unit_idle() {
    let mut engine = engine_with(SimConfig::default());
    let unit = engine.spawn(0.0, 0.0, 1);
    engine.order(unit, Vec3::new(30.0, 0.0, 30.0)).unwrap();
    for _ in 0..10 {
        engine.tick();
    }
    engine.cancel_order(unit).unwrap();
    let held = engine.position(unit).unwrap();
    for _ in 0..10 {
        assert!(engine.tick().is_quiet());
    }
    assert_eq!(engine.position(unit).unwrap(), held);
}
