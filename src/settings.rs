//! # Settings Module
//!
//! ## Purpose
//! Persistent reactor options stored as JSON. A missing file yields the defaults, so a
//! fresh working directory needs no configuration.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "energy": true,
//!   "chemistry": true,
//!   "pressure": null,
//!   "volume": 1.0,
//!   "fd_scale": 1.0,
//!   "dense_volume_correction": false
//! }
//! ```
//!
//! | Key | Meaning | Default |
//! |-----|---------|---------|
//! | `energy` | solve the energy equation | `true` |
//! | `chemistry` | evaluate bulk chemistry | `true` |
//! | `pressure` | pressure imposed at initialization, Pa; `null` keeps the phase's | `null` |
//! | `volume` | initial volume, m³ | `1.0` |
//! | `fd_scale` | multiplier of the finite-difference temperature step | `1.0` |
//! | `dense_volume_correction` | emit the volume term for chemistry entries without a kinetic derivative | `false` |
use crate::ReactorsZeroD::errors::ReactorError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorSettings {
    pub energy: bool,
    pub chemistry: bool,
    pub pressure: Option<f64>,
    pub volume: f64,
    pub fd_scale: f64,
    pub dense_volume_correction: bool,
}

impl Default for ReactorSettings {
    fn default() -> Self {
        Self {
            energy: true,
            chemistry: true,
            pressure: None,
            volume: 1.0,
            fd_scale: 1.0,
            dense_volume_correction: false,
        }
    }
}

impl ReactorSettings {
    /// Reads settings from `path`; defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReactorError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: ReactorSettings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReactorError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
