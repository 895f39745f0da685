//! Vitrine: behavior layer for static portfolio pages
//!
//! Vitrine decides *what* a portfolio page should do when the visitor
//! scrolls, clicks, types or submits; the host (a browser binding, a
//! headless renderer, a test) owns the actual document and reports events.
//! The decisions are small state machines, the effects go through two
//! capability traits.
//!
//! # Core Concepts
//!
//! - **Reveal machine**: one-shot `Pending -> Firing -> Fired` lifecycle per
//!   observed element, so a reveal fires at most once
//! - **Scheduler**: owns the machines of one intersection channel and stops
//!   observing an element as soon as it arms
//! - **Task queue**: delayed effects, counter steps and toast dismissal are
//!   keyed tasks the page drains on every event
//! - **Host traits**: [`host::Document`] and [`host::IntersectionSource`],
//!   with in-memory implementations in [`host::memory`]
//!
//! # Example
//!
//! ```rust
//! use vitrine::config::BehaviorConfig;
//! use vitrine::core::RevealState;
//! use vitrine::host::memory::{ElementSpec, MemoryDocument, RecordingObserver};
//! use vitrine::host::{Channel, Context};
//! use vitrine::page::{Page, PageEvent};
//!
//! let mut doc = MemoryDocument::new();
//! let mut observer = RecordingObserver::new();
//! let about = doc.insert(ElementSpec::new("section").id("about"));
//!
//! let mut cx = Context::new(&mut doc, &mut observer, 0);
//! let mut page = Page::start(BehaviorConfig::default(), &mut cx);
//!
//! cx.now_ms = 250;
//! page.handle(
//!     &mut cx,
//!     PageEvent::Intersection { channel: Channel::Reveal, target: about, visible: true },
//! );
//!
//! assert_eq!(page.reveals().state_of(about), Some(RevealState::Fired));
//! ```

pub mod config;
pub mod contact;
pub mod core;
pub mod counter;
pub mod error;
pub mod host;
pub mod notify;
pub mod page;
pub mod reveal;
pub mod timers;
pub mod toggles;

// Re-export commonly used types
pub use config::{BehaviorConfig, ConfigBuilder, CounterStrategy};
pub use core::{RevealMachine, RevealState, State, StateHistory, StateTransition};
pub use error::BehaviorError;
pub use host::{Channel, Context, Document, ElementId, IntersectionSource};
pub use page::{Key, Page, PageEvent};
