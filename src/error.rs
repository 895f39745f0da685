//! Error taxonomy for page behaviors.
//!
//! Nothing here is fatal. Components return these errors internally and the
//! page boundary logs them at `debug` level and carries on: markup and script
//! are authored independently, so a missing node or a malformed attribute only
//! turns the affected feature off.

use crate::host::ElementId;
use thiserror::Error;

/// Errors raised while a component touches the document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    /// A referenced node is not (or no longer) part of the document.
    #[error("element {0} is not present in the document")]
    MissingElement(ElementId),

    /// A numeric attribute such as `data-count` or `data-width` is absent or
    /// not a number.
    #[error("attribute '{attribute}' on element {element} is not numeric: {value:?}")]
    MalformedNumericAttribute {
        element: ElementId,
        attribute: String,
        value: Option<String>,
    },
}

impl BehaviorError {
    /// True for errors that mean "the node went away", which callers treat as
    /// a silent no-op.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}
