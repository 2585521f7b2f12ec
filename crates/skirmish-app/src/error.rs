//! Host-level errors.

use std::path::PathBuf;

use thiserror::Error;

use skirmish_sim::SimError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings keyword `{keyword}` is missing a value")]
    MissingValue { keyword: &'static str },
    #[error("settings keyword `{keyword}` has invalid value `{value}`")]
    InvalidValue { keyword: &'static str, value: String },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("failed to spawn game loop thread: {0}")]
    Thread(#[source] std::io::Error),
    #[error("game loop thread panicked")]
    LoopPanicked,
}
