//! One-shot state machine shared by every scroll-triggered behavior.

use super::history::{StateHistory, StateTransition};
use super::state::{RevealState, State};

/// What a machine did with an intersection signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The signal armed the trigger: `Pending -> Firing`.
    Armed,
    /// Not visible, or the machine already left `Pending`.
    Ignored,
}

/// Per-element `Pending -> Firing -> Fired` machine.
///
/// The machine only decides; scheduling and running the effect is the
/// owner's job. It refuses every transition that is not the next step of
/// the lifecycle, which is what makes the trigger fire at most once.
#[derive(Clone, Debug, Default)]
pub struct RevealMachine {
    current: RevealState,
    history: StateHistory<RevealState>,
}

impl RevealMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> RevealState {
        self.current
    }

    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn history(&self) -> &StateHistory<RevealState> {
        &self.history
    }

    /// Feed one intersection signal.
    pub fn on_intersection(&mut self, visible: bool, now_ms: u64) -> Signal {
        if !visible || self.current != RevealState::Pending {
            return Signal::Ignored;
        }
        self.apply(RevealState::Firing, now_ms);
        Signal::Armed
    }

    /// Mark the trigger effect as invoked. Returns `false` unless the
    /// machine was `Firing`.
    pub fn complete(&mut self, now_ms: u64) -> bool {
        if self.current != RevealState::Firing {
            return false;
        }
        self.apply(RevealState::Fired, now_ms);
        true
    }

    fn apply(&mut self, to: RevealState, now_ms: u64) {
        let record = StateTransition {
            from: self.current,
            to,
            at_ms: now_ms,
        };
        self.history = self.history.record(record);
        self.current = to;
    }
}
