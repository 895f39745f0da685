//! "Back to top" button.

use crate::error::BehaviorError;
use crate::host::{Document, ElementId, ScrollBehavior};

pub const VISIBLE_CLASS: &str = "visible";

#[derive(Clone, Debug)]
pub struct ScrollTopButton {
    button: ElementId,
    show_after: f64,
    visible: bool,
}

impl ScrollTopButton {
    pub fn new(button: ElementId, show_after: f64) -> Self {
        Self {
            button,
            show_after,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_scroll(&mut self, document: &mut dyn Document, y: f64) -> Result<(), BehaviorError> {
        let visible = y > self.show_after;
        if visible == self.visible {
            return Ok(());
        }
        if visible {
            document.add_class(self.button, VISIBLE_CLASS)?;
        } else {
            document.remove_class(self.button, VISIBLE_CLASS)?;
        }
        self.visible = visible;
        Ok(())
    }

    /// Scroll to the top if `target` is the button.
    pub fn on_click(&self, document: &mut dyn Document, target: ElementId) -> bool {
        if target != self.button {
            return false;
        }
        document.scroll_to(0.0, ScrollBehavior::Smooth);
        true
    }
}
