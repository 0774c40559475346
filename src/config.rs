//! Engine configuration.
//!
//! Values come from `PUSHGRID_`-prefixed environment variables, falling back to the compile-time defaults in
//! [`crate::constants`]. For example `PUSHGRID_INTERPOLATION_RATE=12` or `PUSHGRID_LEVEL_PATH=levels/two.txt`.

use std::path::PathBuf;

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::{DEFAULT_INTERPOLATION_RATE, DEFAULT_SETTLE_FRAMES};
use crate::error::ConfigError;
use crate::interpolation::InterpolationMode;

/// Environment variable prefix for every engine setting.
pub const ENV_PREFIX: &str = "PUSHGRID_";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Fraction of the remaining distance covered per second by visual positions.
    #[serde(default = "default_interpolation_rate")]
    pub interpolation_rate: f32,
    /// Clamp the per-frame easing factor so visuals never overshoot.
    #[serde(default = "default_clamp_interpolation")]
    pub clamp_interpolation: bool,
    /// Level layout file; the built-in level is used when unset.
    #[serde(default)]
    pub level_path: Option<PathBuf>,
    /// Frames the headless driver runs after the last scripted input.
    #[serde(default = "default_settle_frames")]
    pub settle_frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interpolation_rate: default_interpolation_rate(),
            clamp_interpolation: default_clamp_interpolation(),
            level_path: None,
            settle_frames: default_settle_frames(),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Extracts and validates a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: EngineConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.interpolation_rate.is_finite() || self.interpolation_rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "interpolation_rate must be a finite, non-negative number, got {}",
                self.interpolation_rate
            )));
        }
        Ok(())
    }

    pub fn interpolation_mode(&self) -> InterpolationMode {
        if self.clamp_interpolation {
            InterpolationMode::Clamped
        } else {
            InterpolationMode::Unclamped
        }
    }
}

fn default_interpolation_rate() -> f32 {
    DEFAULT_INTERPOLATION_RATE
}

fn default_clamp_interpolation() -> bool {
    true
}

fn default_settle_frames() -> u32 {
    DEFAULT_SETTLE_FRAMES
}
