//! Reusable finite-state-machine engine.
//!
//! All gesture recognizers share the same protocol: states receive
//! Enter/Exit bracketing plus typed external inputs, and request transitions
//! that are resolved as a full Exit-then-Enter pair before any further
//! dispatch.

mod engine;

pub use engine::{Event, StateHandler, StateMachine};
