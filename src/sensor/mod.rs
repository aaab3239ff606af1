//! Sensor input and frame handling.
//!
//! This module provides the frame/image data types delivered by the
//! hand-tracking sensor and a trait-based abstraction over the sensor
//! itself, with a mock implementation for testing and demos.

mod config;
mod frame;
mod source;

pub use config::{ConfigError, FileConfig, RunConfig, SensorConfig};
pub use frame::{Frame, SensorImage};
pub use source::{FrameSource, MockSensor, SensorError};
