//! Core state-machine vocabulary.
//!
//! - State definitions via the `State` trait and the `state_enum!` macro
//! - The one-shot `RevealMachine` every scroll-triggered behavior uses
//! - Immutable transition history stamped with the host clock
//!
//! Nothing in this module touches the document; it only decides.

mod history;
mod machine;
mod macros;
mod state;

pub use history::{StateHistory, StateTransition};
pub use machine::{RevealMachine, Signal};
pub use state::{RevealState, State};
