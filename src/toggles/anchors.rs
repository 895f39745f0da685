//! Smooth scrolling for in-page links.

use crate::host::{Document, ElementId, ScrollBehavior};

#[derive(Clone, Debug, Default)]
pub struct AnchorScroller {
    anchors: Vec<ElementId>,
    offset: f64,
}

impl AnchorScroller {
    /// `offset` is kept clear above the target, usually the header height.
    pub fn capture(document: &dyn Document, selector: &str, offset: f64) -> Self {
        Self {
            anchors: document.query_all(selector),
            offset,
        }
    }

    /// Scroll to the anchor's target. Returns whether `target` is an anchor,
    /// even when its link leads nowhere.
    pub fn on_click(&self, document: &mut dyn Document, target: ElementId) -> bool {
        if !self.anchors.contains(&target) {
            return false;
        }
        let Some(href) = document.attribute(target, "href") else {
            return true;
        };
        if href == "#" {
            return true;
        }
        let top = document
            .query(&href)
            .and_then(|section| document.offset_top(section));
        match top {
            Some(top) => document.scroll_to(top - self.offset, ScrollBehavior::Smooth),
            None => tracing::debug!(href = %href, "anchor target not found"),
        }
        true
    }
}
