//! Lifecycle states for one-shot behaviors.
//!
//! Every scroll-triggered behavior (reveals, skill bars, counters) walks the
//! same three states exactly once.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// All methods are pure. States are small values describing where a
/// behavior is in its lifecycle; they are cloned into history records and
/// serialized into page snapshots.
///
/// # Example
///
/// ```rust
/// use vitrine::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Menu {
///     Closed,
///     Open,
/// }
///
/// impl State for Menu {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// assert_eq!(Menu::Open.name(), "Open");
/// assert!(!Menu::Open.is_final());
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Name for display and logging.
    fn name(&self) -> &str;

    /// Terminal states accept no further transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// Lifecycle of a scroll-triggered element.
    ///
    /// `Pending` on registration, `Firing` once the first qualifying
    /// visibility event arrives, `Fired` after the trigger effect has been
    /// invoked. `Fired` is terminal.
    #[derive(Copy, Eq, Hash)]
    pub enum RevealState {
        Pending,
        Firing,
        Fired,
    }
    final: [Fired]
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_state_names() {
        assert_eq!(RevealState::Pending.name(), "Pending");
        assert_eq!(RevealState::Firing.name(), "Firing");
        assert_eq!(RevealState::Fired.name(), "Fired");
    }

    #[test]
    fn only_fired_is_final() {
        assert!(!RevealState::Pending.is_final());
        assert!(!RevealState::Firing.is_final());
        assert!(RevealState::Fired.is_final());
    }

    #[test]
    fn registration_starts_pending() {
        assert_eq!(RevealState::default(), RevealState::Pending);
    }

    #[test]
    fn reveal_state_serializes_by_name() {
        let json = serde_json::to_string(&RevealState::Firing).unwrap();
        assert_eq!(json, "\"Firing\"");
        let back: RevealState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RevealState::Firing);
    }
}
