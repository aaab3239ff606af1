//! Generic finite-state-machine driver.

use std::fmt::Debug;

/// Event delivered to a state handler.
///
/// `Enter` and `Exit` bracket every transition; `Signal` carries the
/// caller-defined input dispatched through [`StateMachine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<E> {
    /// The machine has just switched into this state.
    Enter,
    /// The machine is about to leave this state.
    Exit,
    /// An external input delivered to the current state.
    Signal(E),
}

/// Dispatch target for a [`StateMachine`].
///
/// A handler receives the current state alongside the event and returns the
/// state it wants to transition to, or `None` to stay put. Returning the
/// current state is also a no-op. The machine defers the request and resolves
/// it with a full Exit/Enter pair, so a handler never observes itself still
/// in a state it asked to leave.
pub trait StateHandler {
    /// State identifier type.
    type State: Copy + Eq + Debug;
    /// External input type dispatched via `run`.
    type Input: Copy;

    /// Handles one event in the given state, optionally requesting a
    /// transition.
    fn on_event(&mut self, state: Self::State, event: Event<Self::Input>) -> Option<Self::State>;
}

/// Drives a set of states with Enter/Exit bracketing and deferred
/// transitions.
///
/// Lifecycle: construct with an initial state, [`start`](Self::start) exactly
/// once, then [`run`](Self::run) once per input, and
/// [`finish`](Self::finish) exactly once at teardown. Misuse is a programmer
/// error and is guarded by debug assertions, not results.
#[derive(Debug, Clone)]
pub struct StateMachine<S: Copy + Eq + Debug> {
    initial: S,
    current: S,
    requested: S,
    started: bool,
}

impl<S: Copy + Eq + Debug> StateMachine<S> {
    /// Creates a machine resting in `initial`. No handler is invoked until
    /// `start`.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            current: initial,
            requested: initial,
            started: false,
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> S {
        self.current
    }

    /// Returns the pending transition target; equal to
    /// [`current`](Self::current) when no transition is pending. Outside of a
    /// handler invocation the two are always equal.
    pub fn requested(&self) -> S {
        self.requested
    }

    /// Fires `Enter` on the initial state and resolves any transitions it
    /// requests.
    pub fn start<H>(&mut self, handler: &mut H)
    where
        H: StateHandler<State = S>,
    {
        debug_assert!(!self.started, "state machine started twice");
        self.started = true;
        self.current = self.initial;
        self.requested = self.initial;
        self.record(handler.on_event(self.current, Event::Enter));
        self.drain(handler);
    }

    /// Dispatches one input to the current state.
    ///
    /// Pending transitions are resolved before the input is delivered and
    /// again afterwards, so the handler code always sees an up-to-date state
    /// and no transition is left pending when this returns.
    pub fn run<H>(&mut self, input: H::Input, handler: &mut H)
    where
        H: StateHandler<State = S>,
    {
        debug_assert!(self.started, "run called before start");
        self.drain(handler);
        self.record(handler.on_event(self.current, Event::Signal(input)));
        self.drain(handler);
    }

    /// Fires `Exit` on the current state. Call once at teardown; any
    /// transition requested by the final exit handler is discarded.
    pub fn finish<H>(&mut self, handler: &mut H)
    where
        H: StateHandler<State = S>,
    {
        debug_assert!(self.started, "finish called before start");
        handler.on_event(self.current, Event::Exit);
        self.requested = self.current;
        self.started = false;
    }

    fn record(&mut self, next: Option<S>) {
        if let Some(state) = next {
            self.requested = state;
        }
    }

    /// Resolves pending transitions, chaining through states whose `Enter`
    /// handlers immediately request another transition. An `Exit` handler may
    /// retarget the pending request.
    fn drain<H>(&mut self, handler: &mut H)
    where
        H: StateHandler<State = S>,
    {
        while self.requested != self.current {
            self.record(handler.on_event(self.current, Event::Exit));
            let from = self.current;
            self.current = self.requested;
            tracing::debug!(?from, to = ?self.current, "state transition");
            self.record(handler.on_event(self.current, Event::Enter));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Idle,
        Armed,
        Firing,
    }

    /// Records the full event trace and replays scripted transition requests.
    struct TraceHandler {
        trace: Vec<(Phase, &'static str)>,
        /// Transition to request on the next Signal event.
        on_signal: Option<Phase>,
        /// When true, Armed's Enter immediately requests Firing.
        chain_from_armed: bool,
    }

    impl TraceHandler {
        fn new() -> Self {
            Self {
                trace: Vec::new(),
                on_signal: None,
                chain_from_armed: false,
            }
        }
    }

    impl StateHandler for TraceHandler {
        type State = Phase;
        type Input = ();

        fn on_event(&mut self, state: Phase, event: Event<()>) -> Option<Phase> {
            match event {
                Event::Enter => {
                    self.trace.push((state, "enter"));
                    if state == Phase::Armed && self.chain_from_armed {
                        return Some(Phase::Firing);
                    }
                    None
                }
                Event::Exit => {
                    self.trace.push((state, "exit"));
                    None
                }
                Event::Signal(()) => {
                    self.trace.push((state, "signal"));
                    self.on_signal.take()
                }
            }
        }
    }

    #[test]
    fn test_start_enters_initial_state() {
        let mut machine = StateMachine::new(Phase::Idle);
        let mut handler = TraceHandler::new();

        machine.start(&mut handler);

        assert_eq!(handler.trace, vec![(Phase::Idle, "enter")]);
        assert_eq!(machine.current(), Phase::Idle);
    }

    #[test]
    fn test_transition_fires_exit_then_enter() {
        let mut machine = StateMachine::new(Phase::Idle);
        let mut handler = TraceHandler::new();
        machine.start(&mut handler);

        handler.on_signal = Some(Phase::Armed);
        machine.run((), &mut handler);

        assert_eq!(
            handler.trace,
            vec![
                (Phase::Idle, "enter"),
                (Phase::Idle, "signal"),
                (Phase::Idle, "exit"),
                (Phase::Armed, "enter"),
            ]
        );
        assert_eq!(machine.current(), Phase::Armed);
    }

    #[test]
    fn test_no_transition_pending_after_run() {
        let mut machine = StateMachine::new(Phase::Idle);
        let mut handler = TraceHandler::new();
        machine.start(&mut handler);

        handler.on_signal = Some(Phase::Armed);
        machine.run((), &mut handler);
        assert_eq!(machine.requested(), machine.current());

        machine.run((), &mut handler);
        assert_eq!(machine.requested(), machine.current());
    }

    #[test]
    fn test_request_of_current_state_is_noop() {
        let mut machine = StateMachine::new(Phase::Idle);
        let mut handler = TraceHandler::new();
        machine.start(&mut handler);

        handler.on_signal = Some(Phase::Idle);
        machine.run((), &mut handler);

        // No exit/enter fired beyond the initial enter and the signal.
        assert_eq!(
            handler.trace,
            vec![(Phase::Idle, "enter"), (Phase::Idle, "signal")]
        );
    }

    #[test]
    fn test_enter_handler_chains_transitions() {
        let mut machine = StateMachine::new(Phase::Idle);
        let mut handler = TraceHandler::new();
        handler.chain_from_armed = true;
        machine.start(&mut handler);

        handler.on_signal = Some(Phase::Armed);
        machine.run((), &mut handler);

        // Armed's Enter immediately requested Firing; both transitions
        // resolve within the same run call.
        assert_eq!(machine.current(), Phase::Firing);
        assert_eq!(machine.requested(), Phase::Firing);
        assert_eq!(
            handler.trace,
            vec![
                (Phase::Idle, "enter"),
                (Phase::Idle, "signal"),
                (Phase::Idle, "exit"),
                (Phase::Armed, "enter"),
                (Phase::Armed, "exit"),
                (Phase::Firing, "enter"),
            ]
        );
    }

    #[test]
    fn test_finish_exits_current_state() {
        let mut machine = StateMachine::new(Phase::Idle);
        let mut handler = TraceHandler::new();
        machine.start(&mut handler);
        machine.finish(&mut handler);

        assert_eq!(
            handler.trace,
            vec![(Phase::Idle, "enter"), (Phase::Idle, "exit")]
        );
    }
}
