//! Empirically tuned thresholds for the wipe recognizer.

use serde::{Deserialize, Serialize};

/// Named tuning constants for [`SystemWipeRecognizer`].
///
/// The defaults are the empirically tuned production values; changing them
/// changes recognition behavior, so alternate sets should only be used for
/// experimentation and tests.
///
/// [`SystemWipeRecognizer`]: super::SystemWipeRecognizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WipeTuning {
    /// Coarse mass gate: below this, no hand/arm is considered present.
    pub presence_mass: f32,
    /// Finer mass gate required to begin recognizing a gesture.
    pub activation_mass: f32,
    /// A gesture only begins while its leading edge is still within this
    /// much of its starting edge, so a hand already mid-frame never
    /// triggers.
    pub start_upper_bound: f32,
    /// Fraction of the remaining distance to the far edge that counts as
    /// completion, tolerating sweeps that stop short of the edge.
    pub completion_fraction: f32,
    /// Cooldown after a completed gesture before the recognizer rearms, in
    /// seconds.
    pub cooldown_secs: f64,
}

impl Default for WipeTuning {
    fn default() -> Self {
        Self {
            presence_mass: 0.1,
            activation_mass: 0.25,
            start_upper_bound: 0.5,
            completion_fraction: 0.75,
            cooldown_secs: 0.3,
        }
    }
}

impl WipeTuning {
    /// Creates a permissive tuning that triggers on weaker signals
    /// (for testing).
    pub fn permissive() -> Self {
        Self {
            presence_mass: 0.05,
            activation_mass: 0.15,
            start_upper_bound: 0.6,
            completion_fraction: 0.6,
            cooldown_secs: 0.1,
        }
    }
}
