//! Gesture recognizers.
//!
//! Each recognizer is a [`StateMachine`](crate::machine::StateMachine) driven
//! once per sensor frame. This module currently hosts the system-wipe
//! recognizer; further recognizers follow the same state-handler pattern.

mod tuning;
mod wipe;

pub use tuning::WipeTuning;
pub use wipe::{SystemWipe, SystemWipeRecognizer, WipeState, WipeStatus};
