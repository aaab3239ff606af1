//! System wipe recognizer.
//!
//! Turns the per-frame mass/centroid signal into a discrete up/down wipe
//! gesture with Begin/Update/Complete status and continuous progress. The
//! recognizer is a four-state machine: wait for any mass, wait for the
//! activation threshold near a starting edge, track the sweep, then cool
//! down after completion.

use super::WipeTuning;
use crate::machine::{Event, StateHandler, StateMachine};
use crate::sensor::Frame;
use crate::signal::{MassSignal, SignalExtractor, WipeDirection, SAMPLE_COUNT};

/// Recognition status reported once per processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeStatus {
    /// No gesture in progress.
    NotActive,
    /// A wipe was just detected; progress starts at zero.
    Begin,
    /// The wipe is in progress.
    Update,
    /// The wipe reached completion this frame.
    Complete,
    /// Reserved for consumers that distinguish an abandoned gesture from
    /// plain inactivity; this revision reports mass loss as `NotActive`.
    Abort,
}

impl Default for WipeStatus {
    fn default() -> Self {
        Self::NotActive
    }
}

/// Per-frame recognizer output.
///
/// `direction` and `progress` are only meaningful when `status` is not
/// [`WipeStatus::NotActive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemWipe {
    /// Recognition status for this frame.
    pub status: WipeStatus,
    /// Direction of the detected wipe.
    pub direction: WipeDirection,
    /// Gesture progress in [0, 1].
    pub progress: f32,
}

impl Default for SystemWipe {
    fn default() -> Self {
        Self {
            status: WipeStatus::NotActive,
            direction: WipeDirection::Down,
            progress: 0.0,
        }
    }
}

/// Recognizer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeState {
    /// No mass signal at all; the cheap pre-filter state.
    WaitingForAnyMassSignal,
    /// Some mass present; waiting for it to grow past the activation gate
    /// while still near a starting edge.
    WaitingForMassActivationThreshold,
    /// Tracking an active sweep.
    RecognizingGesture,
    /// Cooldown after a completed gesture.
    Timeout,
}

/// External input dispatched to the recognizer's states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WipeInput {
    /// One sensor frame's signal is ready in the core.
    Frame,
}

/// Working state shared by the recognizer's state handlers.
///
/// Split out from the recognizer so the state machine and its handler can be
/// borrowed independently during a `run` call.
#[derive(Debug)]
struct WipeCore {
    tuning: WipeTuning,
    extractor: SignalExtractor,
    /// Current frame time in seconds, from the frame's microsecond clock.
    current_time: f64,
    /// Signal computed from the current frame.
    signal: MassSignal,
    /// Direction chosen when the activation gate was passed.
    direction: WipeDirection,
    /// Frame time at which the activation gate was entered (diagnostic).
    gate_entry_time: f64,
    /// Tracking values captured on entering the gate (diagnostic, not
    /// decision input).
    gate_up_tracking: f32,
    gate_down_tracking: f32,
    /// Tracking value at gesture begin.
    begin_tracking_value: f32,
    /// Tracking value that counts as completion.
    complete_tracking_value: f32,
    /// Frame time after which the cooldown ends.
    timeout_deadline: f64,
    /// Output slot for the current `process` call.
    output: SystemWipe,
}

impl WipeCore {
    fn new(tuning: WipeTuning) -> Self {
        Self {
            tuning,
            extractor: SignalExtractor::new(),
            current_time: 0.0,
            signal: MassSignal::default(),
            direction: WipeDirection::Down,
            gate_entry_time: 0.0,
            gate_up_tracking: 0.0,
            gate_down_tracking: 0.0,
            begin_tracking_value: 0.0,
            complete_tracking_value: 1.0,
            timeout_deadline: 0.0,
            output: SystemWipe::default(),
        }
    }

    /// Maps a tracking value onto gesture progress in [0, 1].
    fn progress_of(&self, tracking_value: f32) -> f32 {
        let span = self.complete_tracking_value - self.begin_tracking_value;
        ((tracking_value - self.begin_tracking_value) / span).clamp(0.0, 1.0)
    }

    /// Decides whether the activation gate has been passed.
    ///
    /// Runs both on entering `WaitingForMassActivationThreshold` and on every
    /// frame in it, so a strong signal near an edge is recognized the moment
    /// it appears. The gesture must still be near its starting edge; a hand
    /// already mid-frame never triggers.
    fn evaluate_activation(&mut self) -> Option<WipeState> {
        if self.signal.mass < self.tuning.presence_mass {
            return Some(WipeState::WaitingForAnyMassSignal);
        }

        let up_tracking = self.signal.tracking_value(WipeDirection::Up);
        let down_tracking = self.signal.tracking_value(WipeDirection::Down);
        if self.signal.mass >= self.tuning.activation_mass
            && (up_tracking <= self.tuning.start_upper_bound
                || down_tracking <= self.tuning.start_upper_bound)
        {
            self.direction = if down_tracking <= self.tuning.start_upper_bound {
                WipeDirection::Down
            } else {
                WipeDirection::Up
            };
            tracing::debug!(
                direction = ?self.direction,
                mass = self.signal.mass,
                gate_entered_at = self.gate_entry_time,
                gate_up = self.gate_up_tracking,
                gate_down = self.gate_down_tracking,
                "activation threshold passed"
            );
            return Some(WipeState::RecognizingGesture);
        }
        None
    }
}

impl StateHandler for WipeCore {
    type State = WipeState;
    type Input = WipeInput;

    fn on_event(&mut self, state: WipeState, event: Event<WipeInput>) -> Option<WipeState> {
        match state {
            WipeState::WaitingForAnyMassSignal => match event {
                Event::Signal(WipeInput::Frame) => {
                    if self.signal.mass >= self.tuning.presence_mass {
                        Some(WipeState::WaitingForMassActivationThreshold)
                    } else {
                        None
                    }
                }
                Event::Enter | Event::Exit => None,
            },

            WipeState::WaitingForMassActivationThreshold => match event {
                Event::Enter => {
                    self.gate_entry_time = self.current_time;
                    self.gate_up_tracking = self.signal.tracking_value(WipeDirection::Up);
                    self.gate_down_tracking = self.signal.tracking_value(WipeDirection::Down);
                    tracing::trace!(
                        time = self.gate_entry_time,
                        up = self.gate_up_tracking,
                        down = self.gate_down_tracking,
                        "mass signal appeared"
                    );
                    // The frame that brought us here is evaluated
                    // immediately, not deferred to the next frame.
                    self.evaluate_activation()
                }
                Event::Signal(WipeInput::Frame) => self.evaluate_activation(),
                Event::Exit => None,
            },

            WipeState::RecognizingGesture => match event {
                Event::Enter => {
                    let begin = self.signal.tracking_value(self.direction);
                    self.begin_tracking_value = begin;
                    self.complete_tracking_value =
                        begin + self.tuning.completion_fraction * (1.0 - begin);
                    self.output = SystemWipe {
                        status: WipeStatus::Begin,
                        direction: self.direction,
                        progress: 0.0,
                    };
                    tracing::debug!(
                        direction = ?self.direction,
                        begin = self.begin_tracking_value,
                        complete = self.complete_tracking_value,
                        "wipe began"
                    );
                    None
                }
                Event::Signal(WipeInput::Frame) => {
                    if self.signal.mass < self.tuning.presence_mass {
                        // Lost the signal; abandon the gesture without
                        // reporting anything this frame.
                        tracing::debug!("mass signal lost, abandoning wipe");
                        return Some(WipeState::WaitingForAnyMassSignal);
                    }

                    let progress = self.progress_of(self.signal.tracking_value(self.direction));
                    self.output = SystemWipe {
                        status: WipeStatus::Update,
                        direction: self.direction,
                        progress,
                    };
                    if progress >= 1.0 {
                        self.output.status = WipeStatus::Complete;
                        self.timeout_deadline = self.current_time + self.tuning.cooldown_secs;
                        tracing::debug!(direction = ?self.direction, "wipe complete");
                        return Some(WipeState::Timeout);
                    }
                    None
                }
                Event::Exit => None,
            },

            WipeState::Timeout => match event {
                Event::Signal(WipeInput::Frame) => {
                    if self.current_time >= self.timeout_deadline {
                        Some(WipeState::WaitingForAnyMassSignal)
                    } else {
                        None
                    }
                }
                Event::Enter | Event::Exit => None,
            },
        }
    }
}

/// Recognizes the system-wipe gesture over a stream of sensor frames.
///
/// Drive with one [`process`](Self::process) call per frame, in
/// non-decreasing timestamp order, from a single thread. The recognizer owns
/// all of its working state; frames are only borrowed for the duration of a
/// call.
pub struct SystemWipeRecognizer {
    machine: StateMachine<WipeState>,
    core: WipeCore,
}

impl SystemWipeRecognizer {
    /// Creates a recognizer with the production tuning.
    pub fn new() -> Self {
        Self::with_tuning(WipeTuning::default())
    }

    /// Creates a recognizer with custom tuning.
    pub fn with_tuning(tuning: WipeTuning) -> Self {
        let mut core = WipeCore::new(tuning);
        let mut machine = StateMachine::new(WipeState::WaitingForAnyMassSignal);
        machine.start(&mut core);
        Self { machine, core }
    }

    /// Processes one frame and reports the gesture status.
    ///
    /// Frames without a usable stereo image pair are skipped entirely: the
    /// default [`WipeStatus::NotActive`] output is returned and the state
    /// machine does not advance. This is an expected condition, not an
    /// error.
    pub fn process(&mut self, frame: &Frame) -> SystemWipe {
        self.core.output = SystemWipe::default();

        let signal = match self.core.extractor.process(frame.images()) {
            Some(signal) => signal,
            None => {
                tracing::trace!(
                    timestamp_us = frame.timestamp_us(),
                    "frame lacks a usable image pair, skipping"
                );
                return self.core.output;
            }
        };

        self.core.current_time = frame.timestamp_secs();
        self.core.signal = signal;
        tracing::trace!(
            mass = signal.mass,
            centroid = signal.centroid,
            "frame signal"
        );

        self.machine.run(WipeInput::Frame, &mut self.core);
        self.core.output
    }

    /// Returns the recognizer's current state.
    pub fn state(&self) -> WipeState {
        self.machine.current()
    }

    /// Returns the running per-slot brightness maxima (diagnostic).
    pub fn brightness_peaks(&self) -> &[f32; SAMPLE_COUNT] {
        self.core.extractor.peaks().peaks()
    }

    /// Returns the tuning in effect.
    pub fn tuning(&self) -> &WipeTuning {
        &self.core.tuning
    }
}

impl Default for SystemWipeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SystemWipeRecognizer {
    fn drop(&mut self) {
        self.machine.finish(&mut self.core);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorImage;

    const WIDTH: u32 = 64;
    const HEIGHT: u32 = 240;
    // The central band covers rows 30..210; each downsampled slot averages
    // six of those rows.
    const BAND_START: u32 = 30;
    const ROWS_PER_SLOT: u32 = 6;

    fn image_with_slots(slots: std::ops::Range<u32>) -> SensorImage {
        let mut pixels = vec![0u8; (WIDTH * HEIGHT) as usize];
        for slot in slots {
            let first_row = BAND_START + slot * ROWS_PER_SLOT;
            for y in first_row..first_row + ROWS_PER_SLOT {
                let start = (y * WIDTH) as usize;
                pixels[start..start + WIDTH as usize].fill(255);
            }
        }
        SensorImage::new(pixels, WIDTH, HEIGHT)
    }

    fn frame_with_slots(timestamp_us: i64, slots: std::ops::Range<u32>) -> Frame {
        Frame::new(
            timestamp_us,
            vec![image_with_slots(slots.clone()), image_with_slots(slots)],
        )
    }

    fn dark_frame(timestamp_us: i64) -> Frame {
        frame_with_slots(timestamp_us, 0..0)
    }

    #[test]
    fn test_dark_frames_stay_not_active() {
        let mut recognizer = SystemWipeRecognizer::new();
        for i in 0..5 {
            let wipe = recognizer.process(&dark_frame(i * 16_667));
            assert_eq!(wipe.status, WipeStatus::NotActive);
        }
        assert_eq!(recognizer.state(), WipeState::WaitingForAnyMassSignal);
    }

    #[test]
    fn test_edge_band_begins_down_wipe() {
        let mut recognizer = SystemWipeRecognizer::new();

        // Nine slots active at the starting edge: mass 0.3, leading edge
        // well inside the start bound.
        let wipe = recognizer.process(&frame_with_slots(0, 0..9));
        assert_eq!(wipe.status, WipeStatus::Begin);
        assert_eq!(wipe.direction, WipeDirection::Down);
        assert_eq!(wipe.progress, 0.0);
        assert_eq!(recognizer.state(), WipeState::RecognizingGesture);
    }

    #[test]
    fn test_opposite_edge_begins_up_wipe() {
        let mut recognizer = SystemWipeRecognizer::new();

        let wipe = recognizer.process(&frame_with_slots(0, 21..30));
        assert_eq!(wipe.status, WipeStatus::Begin);
        assert_eq!(wipe.direction, WipeDirection::Up);
    }

    #[test]
    fn test_mid_frame_band_does_not_trigger() {
        let mut recognizer = SystemWipeRecognizer::new();

        // Mass 0.3 centered mid-frame: both tracking values above the start
        // bound, so the gate never opens.
        for i in 0..4 {
            let wipe = recognizer.process(&frame_with_slots(i * 16_667, 10..19));
            assert_eq!(wipe.status, WipeStatus::NotActive);
        }
        assert_eq!(
            recognizer.state(),
            WipeState::WaitingForMassActivationThreshold
        );
    }

    #[test]
    fn test_weak_mass_waits_at_activation_gate() {
        let mut recognizer = SystemWipeRecognizer::new();

        // Four slots: mass 0.13, past the presence gate but short of
        // activation.
        let wipe = recognizer.process(&frame_with_slots(0, 0..4));
        assert_eq!(wipe.status, WipeStatus::NotActive);
        assert_eq!(
            recognizer.state(),
            WipeState::WaitingForMassActivationThreshold
        );
    }

    #[test]
    fn test_invalid_frame_does_not_advance_machine() {
        let mut recognizer = SystemWipeRecognizer::new();

        recognizer.process(&frame_with_slots(0, 0..4));
        assert_eq!(
            recognizer.state(),
            WipeState::WaitingForMassActivationThreshold
        );

        // Single-image frame: skipped outright.
        let invalid = Frame::new(16_667, vec![image_with_slots(0..9)]);
        let wipe = recognizer.process(&invalid);
        assert_eq!(wipe.status, WipeStatus::NotActive);
        assert_eq!(
            recognizer.state(),
            WipeState::WaitingForMassActivationThreshold
        );
    }

    #[test]
    fn test_sweep_updates_and_completes() {
        let mut recognizer = SystemWipeRecognizer::new();

        let begin = recognizer.process(&frame_with_slots(0, 0..9));
        assert_eq!(begin.status, WipeStatus::Begin);

        let update = recognizer.process(&frame_with_slots(16_667, 10..19));
        assert_eq!(update.status, WipeStatus::Update);
        assert!(update.progress > 0.0 && update.progress < 1.0);

        let complete = recognizer.process(&frame_with_slots(33_334, 21..30));
        assert_eq!(complete.status, WipeStatus::Complete);
        assert_eq!(complete.progress, 1.0);
        assert_eq!(recognizer.state(), WipeState::Timeout);
    }

    #[test]
    fn test_mass_loss_abandons_gesture_silently() {
        let mut recognizer = SystemWipeRecognizer::new();

        recognizer.process(&frame_with_slots(0, 0..9));
        assert_eq!(recognizer.state(), WipeState::RecognizingGesture);

        let wipe = recognizer.process(&dark_frame(16_667));
        assert_eq!(wipe.status, WipeStatus::NotActive);
        assert_eq!(recognizer.state(), WipeState::WaitingForAnyMassSignal);
    }

    #[test]
    fn test_cooldown_blocks_then_rearms() {
        let mut recognizer = SystemWipeRecognizer::new();

        recognizer.process(&frame_with_slots(0, 0..9));
        recognizer.process(&frame_with_slots(16_667, 21..30));
        assert_eq!(recognizer.state(), WipeState::Timeout);

        // 0.1s later: still cooling down, a fresh edge band is ignored.
        let wipe = recognizer.process(&frame_with_slots(116_667, 0..9));
        assert_eq!(wipe.status, WipeStatus::NotActive);
        assert_eq!(recognizer.state(), WipeState::Timeout);

        // 0.35s after completion: cooldown over; this frame only rearms.
        let wipe = recognizer.process(&frame_with_slots(366_667, 0..0));
        assert_eq!(wipe.status, WipeStatus::NotActive);
        assert_eq!(recognizer.state(), WipeState::WaitingForAnyMassSignal);

        // The recognizer responds again.
        let wipe = recognizer.process(&frame_with_slots(383_334, 0..9));
        assert_eq!(wipe.status, WipeStatus::Begin);
    }

    #[test]
    fn test_peaks_accumulate() {
        let mut recognizer = SystemWipeRecognizer::new();
        recognizer.process(&frame_with_slots(0, 0..9));
        assert!(recognizer.brightness_peaks().iter().any(|&v| v > 0.9));
    }
}
