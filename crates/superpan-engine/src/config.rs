use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use superpan_dsp::PanLaw;
use thiserror::Error;

/// Static settings for a panner instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PannerConfig {
    /// Time a gain change takes to reach its target.
    pub ramp_seconds: f32,
    /// Gain both channels start from when a stream starts.
    pub startup_gain: f32,
    pub initial_pan: f32,
    pub initial_law: PanLaw,
}

impl Default for PannerConfig {
    fn default() -> Self {
        Self {
            ramp_seconds: Self::DEFAULT_RAMP_SECONDS,
            startup_gain: Self::DEFAULT_STARTUP_GAIN,
            initial_pan: 0.0,
            initial_law: PanLaw::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid panner configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("ramp time {0} s must be finite and non-negative")]
    InvalidRamp(f32),
    #[error("startup gain {0} is outside 0.0..=1.0")]
    StartupGainOutOfRange(f32),
    #[error("initial pan {0} is outside -1.0..=1.0")]
    PanOutOfRange(f32),
}

impl PannerConfig {
    pub const DEFAULT_RAMP_SECONDS: f32 = 0.05;
    pub const DEFAULT_STARTUP_GAIN: f32 = 0.5;

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config = Self::from_json_str(&data)?;
        tracing::debug!(path = %path.display(), ?config, "loaded panner configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ramp_seconds.is_finite() || self.ramp_seconds < 0.0 {
            return Err(ConfigError::InvalidRamp(self.ramp_seconds));
        }
        if !(0.0..=1.0).contains(&self.startup_gain) {
            return Err(ConfigError::StartupGainOutOfRange(self.startup_gain));
        }
        if !(-1.0..=1.0).contains(&self.initial_pan) {
            return Err(ConfigError::PanOutOfRange(self.initial_pan));
        }
        Ok(())
    }
}
