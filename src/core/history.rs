//! Transition history for one-shot behaviors.
//!
//! Records are stamped with the host clock (milliseconds), not wall time, so
//! histories replay identically under a simulated clock.

use super::state::State;
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use vitrine::core::{RevealState, StateTransition};
///
/// let transition = StateTransition {
///     from: RevealState::Pending,
///     to: RevealState::Firing,
///     at_ms: 1_200,
/// };
/// assert_eq!(transition.at_ms, 1_200);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    pub from: S,
    pub to: S,
    /// Host clock reading when the transition happened.
    pub at_ms: u64,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use vitrine::core::{RevealState, StateHistory, StateTransition};
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: RevealState::Pending,
///         to: RevealState::Firing,
///         at_ms: 100,
///     })
///     .record(StateTransition {
///         from: RevealState::Firing,
///         to: RevealState::Fired,
///         at_ms: 400,
///     });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&RevealState::Pending, &RevealState::Firing, &RevealState::Fired]
/// );
/// assert_eq!(history.duration_ms(), Some(300));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Milliseconds between the first and last transition.
    pub fn duration_ms(&self) -> Option<u64> {
        let first = self.transitions.first()?;
        let last = self.transitions.last()?;
        Some(last.at_ms.saturating_sub(first.at_ms))
    }

    /// When the history first entered `state`, if it ever did.
    pub fn entered_at(&self, state: &S) -> Option<u64> {
        self.transitions
            .iter()
            .find(|transition| transition.to == *state)
            .map(|transition| transition.at_ms)
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RevealState;

    fn fire_at(history: &StateHistory<RevealState>, armed: u64, done: u64) -> StateHistory<RevealState> {
        history
            .record(StateTransition {
                from: RevealState::Pending,
                to: RevealState::Firing,
                at_ms: armed,
            })
            .record(StateTransition {
                from: RevealState::Firing,
                to: RevealState::Fired,
                at_ms: done,
            })
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<RevealState> = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration_ms().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let recorded = history.record(StateTransition {
            from: RevealState::Pending,
            to: RevealState::Firing,
            at_ms: 10,
        });

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(recorded.transitions().len(), 1);
    }

    #[test]
    fn path_and_duration_follow_records() {
        let history = fire_at(&StateHistory::new(), 250, 450);

        assert_eq!(
            history.get_path(),
            vec![&RevealState::Pending, &RevealState::Firing, &RevealState::Fired]
        );
        assert_eq!(history.duration_ms(), Some(200));
    }

    #[test]
    fn entered_at_finds_first_arrival() {
        let history = fire_at(&StateHistory::new(), 30, 90);

        assert_eq!(history.entered_at(&RevealState::Firing), Some(30));
        assert_eq!(history.entered_at(&RevealState::Fired), Some(90));
        assert_eq!(history.entered_at(&RevealState::Pending), None);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = fire_at(&StateHistory::new(), 5, 5);

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<RevealState> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, history);
        assert_eq!(back.duration_ms(), Some(0));
    }
}
