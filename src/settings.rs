//! Game settings and preferences
//!
//! Read from a JSON file. Every field is optional in the file; anything
//! missing takes its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_PARTICLES, STAR_COUNT};
use crate::sim::SimConfig;

/// File looked for in the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = "space-adventure.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Frames to run before exiting (0 = until quit)
    pub max_frames: u64,
    /// Let the demo AI fly the ship
    pub autopilot: bool,

    // === Visual Effects ===
    /// Particle effects (muzzle flash, debris, sparkles)
    pub particles: bool,
    /// Particle cap
    pub max_particles: usize,
    /// Background stars
    pub star_count: usize,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Logging ===
    /// Frames between HUD lines in the info log (0 = never)
    pub hud_log_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_frames: 3600,
            autopilot: true,

            particles: true,
            max_particles: MAX_PARTICLES,
            star_count: STAR_COUNT,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            hud_log_interval: 300,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// The simulation-facing subset
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            star_count: self.star_count,
            max_particles: self.max_particles(),
        }
    }

    /// Clamp out-of-range values into place
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if it exists, otherwise use defaults. A broken file
    /// is reported and replaced by defaults rather than stopping the game.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
