//! Host settings.
//!
//! Two on-disk formats are accepted. A `.json` file is read with serde; any
//! other file uses the whitespace keyword format:
//!
//! ```text
//! clearColor 0.2 0.2 0.2 1.0
//! cameraPos 0 60 20
//! tankSpeed 0.1
//! windowSize 1280 1280
//! ```
//!
//! Unrecognised keywords are skipped. Keywords that are absent keep their defaults.

use std::path::Path;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use skirmish_core::constants::DEFAULT_UNIT_SPEED;
use skirmish_sim::SimConfig;

use crate::error::SettingsError;

const CLEAR_COLOR: &str = "clearColor";
const CAMERA_POS: &str = "cameraPos";
const TANK_SPEED: &str = "tankSpeed";
const WINDOW_SIZE: &str = "windowSize";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub clear_color: [f32; 4],
    pub camera_pos: Vec3,
    pub tank_speed: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.2, 1.0],
            camera_pos: Vec3::new(0.0, 60.0, 20.0),
            tank_speed: DEFAULT_UNIT_SPEED,
            window_width: 1280,
            window_height: 1280,
        }
    }
}

impl Settings {
    /// Read settings from `path`, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        debug!(path = %path.display(), is_json, "loading settings");
        if is_json {
            Ok(serde_json::from_str(&text)?)
        } else {
            Self::parse_keywords(&text)
        }
    }

    /// Parse the keyword format, starting from defaults.
    pub fn parse_keywords(text: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        let mut tokens = text.split_whitespace();
        while let Some(keyword) = tokens.next() {
            match keyword {
                CLEAR_COLOR => {
                    for c in settings.clear_color.iter_mut() {
                        *c = next_value(&mut tokens, CLEAR_COLOR)?;
                    }
                }
                CAMERA_POS => {
                    let x = next_value(&mut tokens, CAMERA_POS)?;
                    let y = next_value(&mut tokens, CAMERA_POS)?;
                    let z = next_value(&mut tokens, CAMERA_POS)?;
                    settings.camera_pos = Vec3::new(x, y, z);
                }
                TANK_SPEED => settings.tank_speed = next_value(&mut tokens, TANK_SPEED)?,
                WINDOW_SIZE => {
                    settings.window_width = next_value(&mut tokens, WINDOW_SIZE)?;
                    settings.window_height = next_value(&mut tokens, WINDOW_SIZE)?;
                }
                other => trace!(keyword = other, "skipping unknown settings keyword"),
            }
        }
        Ok(settings)
    }

    /// Simulation configuration implied by these settings.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            unit_speed: self.tank_speed,
            ..SimConfig::default()
        }
    }
}

fn next_value<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    keyword: &'static str,
) -> Result<T, SettingsError> {
    let raw = tokens.next().ok_or(SettingsError::MissingValue { keyword })?;
    raw.parse().map_err(|_| SettingsError::InvalidValue {
        keyword,
        value: raw.to_string(),
    })
}
