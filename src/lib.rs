//! Wipe Sense — gesture-recognition core for a hand-tracking overlay shell.
//!
//! Interprets noisy streaming sensor frames into discrete system-wipe events
//! via a brightness-signal pipeline and a finite-state-machine recognizer.
//!
//! # Architecture
//!
//! The system follows an explicit per-frame data flow:
//!
//! ```text
//! sensor → signal (brightness → downsample → mass/centroid) → recognizer
//!                                                                  ↓
//!                                                       machine (FSM engine)
//! ```
//!
//! # Design Principles
//!
//! - **Silent skipping**: frames without a usable stereo image pair are
//!   recoverable, expected conditions, never errors
//! - **Single-threaded**: one `process` call per frame, in timestamp order,
//!   with no internal concurrency
//! - **Hysteresis and cooldown**: empirically tuned gates keep a hand
//!   mid-frame or a just-finished sweep from retriggering
//!
//! # Example
//!
//! ```no_run
//! use wipe_sense::{
//!     recognizer::{SystemWipeRecognizer, WipeStatus},
//!     sensor::{FrameSource, MockSensor, SensorConfig},
//! };
//!
//! let mut sensor = MockSensor::new();
//! sensor.open(&SensorConfig::default()).unwrap();
//!
//! let mut recognizer = SystemWipeRecognizer::new();
//!
//! for _ in 0..10 {
//!     let frame = sensor.capture().unwrap();
//!     let wipe = recognizer.process(&frame);
//!
//!     if wipe.status != WipeStatus::NotActive {
//!         println!("{:?} {:?} at {:.0}%", wipe.status, wipe.direction, wipe.progress * 100.0);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod machine;
pub mod recognizer;
pub mod sensor;
pub mod signal;

// Re-export commonly used types at crate root
pub use machine::{Event, StateHandler, StateMachine};
pub use recognizer::{SystemWipe, SystemWipeRecognizer, WipeState, WipeStatus, WipeTuning};
pub use sensor::{Frame, FrameSource, MockSensor, SensorConfig, SensorImage};
pub use signal::{MassSignal, SignalExtractor, WipeDirection};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
