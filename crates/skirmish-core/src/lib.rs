//! Core types and definitions for the SKIRMISH simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! unit handles, commands, render snapshots and constants.
//! It has no dependency on any windowing or rendering framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod state;
pub mod types;

pub use glam;
