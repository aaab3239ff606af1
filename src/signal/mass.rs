//! Mass and centroid of the active brightness region.
//!
//! The downsampled profile is thresholded into a binary activation mask;
//! its mass (active fraction) and centroid (weighted mean position) are the
//! signal the wipe recognizer's state machine runs on.

use super::SAMPLE_COUNT;
use serde::{Deserialize, Serialize};

/// Brightness above which a downsampled slot counts as active.
pub const ACTIVATION_THRESHOLD: f32 = 0.8;

/// Below this raw mass the centroid is left untouched.
const MASS_EPSILON: f32 = 1e-6;

/// Direction of a wipe sweep across the field of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WipeDirection {
    /// Sweeping toward the top of the frame.
    Up,
    /// Sweeping toward the bottom of the frame.
    Down,
}

/// Per-frame activation signal.
///
/// `centroid` is only meaningful when `mass` is above zero; callers must not
/// consult it otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MassSignal {
    /// Fraction of downsampled slots above the activation threshold, in [0, 1].
    pub mass: f32,
    /// Activation-weighted mean position (0 = top, 1 = bottom).
    pub centroid: f32,
}

impl MassSignal {
    /// Thresholds a downsampled profile and computes its mass and centroid.
    pub fn compute(downsampled: &[f32; SAMPLE_COUNT]) -> Self {
        let mut raw_mass = 0.0f32;
        let mut raw_centroid = 0.0f32;
        for (i, &value) in downsampled.iter().enumerate() {
            if value > ACTIVATION_THRESHOLD {
                let position = i as f32 / (SAMPLE_COUNT - 1) as f32;
                raw_mass += 1.0;
                raw_centroid += position;
            }
        }

        let mut centroid = 0.0;
        if raw_mass > MASS_EPSILON {
            centroid = raw_centroid / raw_mass;
        }
        Self {
            mass: raw_mass / SAMPLE_COUNT as f32,
            centroid,
        }
    }

    /// Top edge of the active region, modeled as an interval of width `mass`
    /// centered at the centroid.
    #[inline]
    pub fn up_edge(&self) -> f32 {
        self.centroid - 0.5 * self.mass
    }

    /// Bottom edge of the active region.
    #[inline]
    pub fn down_edge(&self) -> f32 {
        self.centroid + 0.5 * self.mass
    }

    /// How far the leading edge has swept across the frame for the given
    /// direction, in [0, 1], increasing as the gesture progresses.
    pub fn tracking_value(&self, direction: WipeDirection) -> f32 {
        match direction {
            WipeDirection::Up => 1.0 - self.up_edge(),
            WipeDirection::Down => self.down_edge(),
        }
    }
}
