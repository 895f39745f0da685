//! Header that slides away while scrolling down.

use crate::error::BehaviorError;
use crate::host::{Document, ElementId};

pub const SCROLLED_CLASS: &str = "scrolled";

/// Header visibility driven by scroll direction.
///
/// Hidden while scrolling down past `hide_after`, shown again on any upward
/// scroll. The `scrolled` class is independent and only tracks whether the
/// offset is past `scrolled_after`.
#[derive(Clone, Debug)]
pub struct HeaderScroll {
    header: ElementId,
    last_y: f64,
    hidden: bool,
    scrolled: bool,
    hide_after: f64,
    scrolled_after: f64,
}

impl HeaderScroll {
    pub fn new(header: ElementId, hide_after: f64, scrolled_after: f64) -> Self {
        Self {
            header,
            last_y: 0.0,
            hidden: false,
            scrolled: false,
            hide_after,
            scrolled_after,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn on_scroll(&mut self, document: &mut dyn Document, y: f64) -> Result<(), BehaviorError> {
        let scrolled = y > self.scrolled_after;
        if scrolled != self.scrolled {
            if scrolled {
                document.add_class(self.header, SCROLLED_CLASS)?;
            } else {
                document.remove_class(self.header, SCROLLED_CLASS)?;
            }
            self.scrolled = scrolled;
        }

        let hidden = if y > self.last_y && y > self.hide_after {
            true
        } else if y < self.last_y {
            false
        } else {
            self.hidden
        };
        self.last_y = y;
        if hidden != self.hidden {
            let transform = if hidden { "translateY(-100%)" } else { "translateY(0)" };
            document.set_style(self.header, "transform", transform)?;
            self.hidden = hidden;
        }
        Ok(())
    }
}
