//! Per-tick systems operating on the unit table.
//!
//! Systems are free functions over borrowed state; they own nothing. The
//! engine calls them once per slot, in slot order, so each unit is read and
//! written within its own step.

pub mod navigation;
pub mod orders;
pub mod snapshot;
