//! Float animation while the pointer rests on a card.

use crate::host::{Document, ElementId};
use std::collections::BTreeSet;

pub const FLOAT_CLASS: &str = "float-animation";

#[derive(Clone, Debug, Default)]
pub struct HoverFloat {
    targets: BTreeSet<ElementId>,
}

impl HoverFloat {
    pub fn capture(document: &dyn Document, selector: &str) -> Self {
        Self {
            targets: document.query_all(selector).into_iter().collect(),
        }
    }

    pub fn on_enter(&self, document: &mut dyn Document, target: ElementId) {
        if self.targets.contains(&target) {
            if let Err(err) = document.add_class(target, FLOAT_CLASS) {
                tracing::debug!(element = %target, error = %err, "hover target vanished");
            }
        }
    }

    pub fn on_leave(&self, document: &mut dyn Document, target: ElementId) {
        if self.targets.contains(&target) {
            if let Err(err) = document.remove_class(target, FLOAT_CLASS) {
                tracing::debug!(element = %target, error = %err, "hover target vanished");
            }
        }
    }
}
