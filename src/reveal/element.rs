//! Participation parameters read from markup.

use crate::host::{numeric_attribute, Document, ElementId, ObserveOptions};
use serde::{Deserialize, Serialize};

/// Attribute carrying the reveal delay in milliseconds.
pub const DELAY_ATTRIBUTE: &str = "data-delay";
/// Attribute carrying the animation kind; its presence also opts an element in.
pub const ANIMATION_ATTRIBUTE: &str = "data-animate";

/// An element registered with a [`RevealScheduler`](super::RevealScheduler).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservedElement {
    pub id: ElementId,
    /// Wait between the qualifying visibility event and the trigger effect.
    pub delay_ms: u64,
    pub animation_kind: String,
    pub options: ObserveOptions,
}

impl ObservedElement {
    /// An element with no delay and the given animation kind.
    pub fn new(id: ElementId, animation_kind: &str, options: ObserveOptions) -> Self {
        Self {
            id,
            delay_ms: 0,
            animation_kind: animation_kind.to_string(),
            options,
        }
    }

    /// Read `data-delay` and `data-animate`, falling back to a zero delay and
    /// `default_kind`.
    ///
    /// A delay that is present but not a non-negative integer is ignored.
    pub fn from_markup(
        document: &dyn Document,
        id: ElementId,
        default_kind: &str,
        options: ObserveOptions,
    ) -> Self {
        let delay_ms = match document.attribute(id, DELAY_ATTRIBUTE) {
            None => 0,
            Some(_) => numeric_attribute::<u64>(document, id, DELAY_ATTRIBUTE).unwrap_or_else(|err| {
                tracing::debug!(element = %id, error = %err, "ignoring reveal delay");
                0
            }),
        };

        let animation_kind = document
            .attribute(id, ANIMATION_ATTRIBUTE)
            .map(|kind| kind.trim().to_string())
            .filter(|kind| !kind.is_empty())
            .unwrap_or_else(|| default_kind.to_string());

        Self {
            id,
            delay_ms,
            animation_kind,
            options,
        }
    }
}
