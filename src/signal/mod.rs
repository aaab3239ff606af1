//! Brightness signal extraction.
//!
//! This module turns a stereo image pair into the scalar activation signal
//! the recognizer runs on: per-row brightness over the central vertical band,
//! average-pooled into a fixed number of slots, then thresholded into a
//! mass/centroid pair.

mod brightness;
mod downsample;
mod mass;

pub use brightness::{compute_brightness, BAND_PROPORTION, COLUMN_SAMPLES};
pub use downsample::{downsample, PeakTracker, SAMPLE_COUNT};
pub use mass::{MassSignal, WipeDirection, ACTIVATION_THRESHOLD};

use crate::sensor::SensorImage;

/// Runs the full per-frame signal pipeline.
///
/// Owns the running brightness maxima, which persist across frames for the
/// lifetime of the extractor.
#[derive(Debug, Default)]
pub struct SignalExtractor {
    peaks: PeakTracker,
}

impl SignalExtractor {
    pub fn new() -> Self {
        Self {
            peaks: PeakTracker::new(),
        }
    }

    /// Processes one frame's images into a mass/centroid signal.
    ///
    /// Returns `None` when the images cannot produce a usable profile (fewer
    /// than two valid images, or an image too short to downsample); the
    /// caller must skip the frame without advancing any gesture state.
    pub fn process(&mut self, images: &[SensorImage]) -> Option<MassSignal> {
        let profile = compute_brightness(images)?;
        if profile.len() < SAMPLE_COUNT {
            return None;
        }

        let downsampled = downsample(&profile);
        self.peaks.update(&downsampled);
        Some(MassSignal::compute(&downsampled))
    }

    /// Returns the running per-slot brightness maxima.
    pub fn peaks(&self) -> &PeakTracker {
        &self.peaks
    }
}
