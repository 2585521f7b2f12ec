//! SKIRMISH headless host.
//!
//! Loads settings, casts pointer rays through the camera, and drives the
//! simulation engine from a game-loop thread.

pub mod camera;
pub mod error;
pub mod game_loop;
pub mod settings;
pub mod state;

pub use skirmish_core as core;
