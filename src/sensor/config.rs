//! Sensor and run configuration.

use crate::recognizer::WipeTuning;
use crate::signal::{BAND_PROPORTION, SAMPLE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the frame source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub fps: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 240,
            fps: 60,
        }
    }
}

impl SensorConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    ///
    /// The image must be tall enough that the central brightness band yields
    /// at least one row per downsampled slot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if ((self.height as f32 * BAND_PROPORTION) as usize) < SAMPLE_COUNT {
            return Err(ConfigError::ImageTooShort {
                height: self.height,
            });
        }
        if self.fps == 0 || self.fps > 240 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    #[error("image height {height} too short for brightness downsampling")]
    ImageTooShort { height: u32 },
    #[error("invalid frame rate (must be 1-240 fps)")]
    InvalidFrameRate,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub tuning: WipeTuning,
    #[serde(default)]
    pub run: RunConfig,
}

/// Demo run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of frames to process.
    pub frame_count: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { frame_count: 120 }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.sensor.validate()?;
        Ok(config)
    }
}
