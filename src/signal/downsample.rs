//! Average-pooling of a brightness profile into a fixed number of slots.

/// Number of slots in a downsampled brightness profile.
pub const SAMPLE_COUNT: usize = 30;

/// Downsamples a brightness profile to `SAMPLE_COUNT` slots.
///
/// Partitions the profile into contiguous groups by linearly interpolating
/// `SAMPLE_COUNT + 1` boundary indices across its length, then averages each
/// group. Groups may differ in size by one element when the length is not
/// evenly divisible; every element is covered exactly once.
///
/// The profile must hold at least `SAMPLE_COUNT` elements.
pub fn downsample(profile: &[f32]) -> [f32; SAMPLE_COUNT] {
    debug_assert!(
        profile.len() >= SAMPLE_COUNT,
        "profile shorter than SAMPLE_COUNT"
    );

    let len = profile.len();
    let mut out = [0.0f32; SAMPLE_COUNT];
    for (i, slot) in out.iter_mut().enumerate() {
        let begin = i * len / SAMPLE_COUNT;
        let end = (i + 1) * len / SAMPLE_COUNT;
        let group = &profile[begin..end];
        *slot = group.iter().sum::<f32>() / group.len() as f32;
    }
    out
}

/// Running per-slot maximum of downsampled brightness.
///
/// Lives for the lifetime of the recognizer and is updated every frame. The
/// peaks feed a brightness-normalization step that is currently inactive;
/// the bookkeeping is kept so the normalization can be enabled without
/// changing the per-frame data flow.
#[derive(Debug, Clone)]
pub struct PeakTracker {
    peaks: [f32; SAMPLE_COUNT],
}

impl PeakTracker {
    pub fn new() -> Self {
        Self {
            peaks: [0.0; SAMPLE_COUNT],
        }
    }

    /// Folds a freshly downsampled profile into the running maxima.
    pub fn update(&mut self, downsampled: &[f32; SAMPLE_COUNT]) {
        for (peak, &value) in self.peaks.iter_mut().zip(downsampled) {
            *peak = peak.max(value);
        }
    }

    /// Returns the running per-slot maxima.
    pub fn peaks(&self) -> &[f32; SAMPLE_COUNT] {
        &self.peaks
    }
}

impl Default for PeakTracker {
    fn default() -> Self {
        Self::new()
    }
}
