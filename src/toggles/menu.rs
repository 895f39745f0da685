//! Mobile navigation menu.

use crate::config::Selectors;
use crate::error::BehaviorError;
use crate::host::{Document, ElementId};

pub const ACTIVE_CLASS: &str = "active";
pub const OPEN_ICON: &str = r#"<i class="fas fa-times"></i>"#;
pub const CLOSED_ICON: &str = r#"<i class="fas fa-bars"></i>"#;

/// Button, panel and overlay of the collapsible navigation.
///
/// While open the panel and overlay carry `active`, the button shows a close
/// icon and body scrolling is locked.
#[derive(Clone, Debug)]
pub struct MobileMenu {
    button: ElementId,
    panel: ElementId,
    overlay: ElementId,
    body: Option<ElementId>,
    links: Vec<ElementId>,
    open: bool,
}

impl MobileMenu {
    /// Capture the menu nodes. Without button, panel or overlay there is no
    /// menu.
    pub fn capture(document: &dyn Document, selectors: &Selectors) -> Option<Self> {
        let button = document.query(&selectors.menu_button)?;
        let panel = document.query(&selectors.nav_links)?;
        let overlay = document.query(&selectors.menu_overlay)?;
        Some(Self {
            button,
            panel,
            overlay,
            body: document.query(&selectors.body),
            links: document.query_all(&selectors.nav_link),
            open: document.has_class(panel, ACTIVE_CLASS),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    pub fn toggle(&mut self, document: &mut dyn Document) -> Result<bool, BehaviorError> {
        let open = !self.open;
        self.apply(document, open)?;
        Ok(open)
    }

    pub fn open(&mut self, document: &mut dyn Document) -> Result<(), BehaviorError> {
        if self.open {
            return Ok(());
        }
        self.apply(document, true)
    }

    pub fn close(&mut self, document: &mut dyn Document) -> Result<(), BehaviorError> {
        if !self.open {
            return Ok(());
        }
        self.apply(document, false)
    }

    /// React to a click. Returns whether the click concerned the menu.
    ///
    /// The button toggles; the overlay and nav links close an open menu.
    pub fn on_click(
        &mut self,
        document: &mut dyn Document,
        target: ElementId,
    ) -> Result<bool, BehaviorError> {
        if target == self.button {
            self.toggle(document)?;
            Ok(true)
        } else if target == self.overlay || self.links.contains(&target) {
            self.close(document)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Write the open or closed state. `is_open` changes only once every
    /// write succeeded.
    fn apply(&mut self, document: &mut dyn Document, open: bool) -> Result<(), BehaviorError> {
        let (icon, overflow) = if open {
            (OPEN_ICON, "hidden")
        } else {
            (CLOSED_ICON, "")
        };

        for node in [self.panel, self.overlay] {
            if open {
                document.add_class(node, ACTIVE_CLASS)?;
            } else {
                document.remove_class(node, ACTIVE_CLASS)?;
            }
        }
        document.set_inner_html(self.button, icon)?;
        document.set_attribute(self.button, "aria-expanded", if open { "true" } else { "false" })?;
        if let Some(body) = self.body {
            document.set_style(body, "overflow", overflow)?;
        }
        self.open = open;
        tracing::trace!(open, "mobile menu toggled");
        Ok(())
    }
}
