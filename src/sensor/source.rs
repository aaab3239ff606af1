//! Sensor abstraction for frame delivery.
//!
//! The recognizer is driven by frames from a hand-tracking sensor. This
//! module provides a trait-based abstraction over the sensor SDK, allowing
//! for both real sensor input and mock implementations for testing.

use super::{Frame, SensorConfig, SensorImage};
use thiserror::Error;

/// Errors that can occur during sensor operations.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor device not found: {0}")]
    DeviceNotFound(String),
    #[error("failed to open sensor: {0}")]
    OpenFailed(String),
    #[error("failed to configure sensor: {0}")]
    ConfigFailed(String),
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
    #[error("sensor not initialized")]
    NotInitialized,
}

/// Trait for frame sources.
///
/// This abstraction allows swapping between real sensor hardware
/// and mock implementations for testing.
pub trait FrameSource {
    /// Opens and initializes the sensor with the given configuration.
    fn open(&mut self, config: &SensorConfig) -> Result<(), SensorError>;

    /// Captures a single frame.
    fn capture(&mut self) -> Result<Frame, SensorError>;

    /// Checks if the sensor is currently open.
    fn is_open(&self) -> bool;

    /// Closes the sensor and releases resources.
    fn close(&mut self);
}

/// Mock sensor that synthesizes stereo frames for testing and demos.
///
/// Paints a horizontal bright band into both images of each frame. The band's
/// vertical center is settable between captures, so callers can script a
/// sweep across the field of view.
#[derive(Debug, Default)]
pub struct MockSensor {
    config: Option<SensorConfig>,
    timestamp_us: i64,
    /// Band as (normalized vertical center, normalized half-extent),
    /// or `None` for an all-dark frame.
    band: Option<(f32, f32)>,
}

impl MockSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bright band painted into subsequent frames.
    ///
    /// `center` and `half_extent` are normalized to image height
    /// (0 = top row, 1 = bottom row).
    pub fn set_band(&mut self, center: f32, half_extent: f32) {
        self.band = Some((center, half_extent));
    }

    /// Clears the band; subsequent frames are entirely dark.
    pub fn clear_band(&mut self) {
        self.band = None;
    }

    fn paint_image(&self, config: &SensorConfig) -> SensorImage {
        let (width, height) = (config.width as usize, config.height as usize);
        let mut pixels = vec![0u8; width * height];

        if let Some((center, half_extent)) = self.band {
            for y in 0..height {
                let pos = y as f32 / (height - 1).max(1) as f32;
                if (pos - center).abs() <= half_extent {
                    pixels[y * width..(y + 1) * width].fill(255);
                }
            }
        }

        SensorImage::new(pixels, config.width, config.height)
    }
}

impl FrameSource for MockSensor {
    fn open(&mut self, config: &SensorConfig) -> Result<(), SensorError> {
        config
            .validate()
            .map_err(|e| SensorError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.timestamp_us = 0;
        tracing::info!("MockSensor opened with config: {:?}", config);
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, SensorError> {
        let config = self.config.clone().ok_or(SensorError::NotInitialized)?;

        let images = vec![self.paint_image(&config), self.paint_image(&config)];
        let frame = Frame::new(self.timestamp_us, images);

        self.timestamp_us += 1_000_000 / i64::from(config.fps);
        Ok(frame)
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockSensor closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sensor_lifecycle() {
        let mut sensor = MockSensor::new();
        let config = SensorConfig::default();

        assert!(!sensor.is_open());
        sensor.open(&config).unwrap();
        assert!(sensor.is_open());

        let frame = sensor.capture().unwrap();
        assert!(frame.has_stereo_pair());

        sensor.close();
        assert!(!sensor.is_open());
    }

    #[test]
    fn test_capture_before_open_fails() {
        let mut sensor = MockSensor::new();
        assert!(matches!(
            sensor.capture(),
            Err(SensorError::NotInitialized)
        ));
    }

    #[test]
    fn test_timestamps_monotonic() {
        let mut sensor = MockSensor::new();
        sensor.open(&SensorConfig::default()).unwrap();

        let a = sensor.capture().unwrap();
        let b = sensor.capture().unwrap();
        assert!(b.timestamp_us() > a.timestamp_us());
    }

    #[test]
    fn test_band_paints_bright_rows() {
        let mut sensor = MockSensor::new();
        sensor.open(&SensorConfig::default()).unwrap();
        sensor.set_band(0.5, 0.1);

        let frame = sensor.capture().unwrap();
        let image = &frame.images()[0];
        let mid = image.height() / 2;

        assert_eq!(image.pixel(0, mid), 255);
        assert_eq!(image.pixel(0, 0), 0);
    }
}
