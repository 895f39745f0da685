//! Project-card category filter.

use crate::config::Selectors;
use crate::host::{Document, ElementId};
use crate::timers::{TaskKey, TaskQueue};

/// Category carried by a filter button.
pub const FILTER_ATTRIBUTE: &str = "data-filter";
/// Category carried by a project card.
pub const CATEGORY_ATTRIBUTE: &str = "data-category";
/// Filter value that matches every card.
pub const ALL: &str = "all";

/// Filter buttons and the cards they show or hide.
///
/// Selecting a category shows matching cards at once and fades the rest out,
/// taking them out of layout after the fade. A card matches when its
/// category equals the selected one exactly.
#[derive(Clone, Debug)]
pub struct ProjectFilter {
    buttons: Vec<ElementId>,
    cards: Vec<ElementId>,
    selected: String,
    fade_ms: u64,
}

impl ProjectFilter {
    /// Capture buttons and cards. The filter needs at least one of each.
    pub fn capture(document: &dyn Document, selectors: &Selectors, fade_ms: u64) -> Option<Self> {
        let buttons = document.query_all(&selectors.filter_buttons);
        let cards = document.query_all(&selectors.project_cards);
        if buttons.is_empty() || cards.is_empty() {
            return None;
        }
        Some(Self {
            buttons,
            cards,
            selected: ALL.to_string(),
            fade_ms,
        })
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    pub fn is_button(&self, id: ElementId) -> bool {
        self.buttons.contains(&id)
    }

    /// Give each card an entrance delay growing with its position.
    pub fn stagger(&self, document: &mut dyn Document, step_ms: u64) {
        for (index, &card) in self.cards.iter().enumerate() {
            let delay = (index as u64 * step_ms) as f64 / 1000.0;
            if let Err(err) = document.set_style(card, "animation-delay", &format!("{delay}s")) {
                tracing::debug!(element = %card, error = %err, "stagger skipped");
            }
        }
    }

    /// Handle a click. Returns whether it hit a filter button.
    pub fn on_click(
        &mut self,
        document: &mut dyn Document,
        tasks: &mut TaskQueue,
        now_ms: u64,
        target: ElementId,
    ) -> bool {
        if !self.is_button(target) {
            return false;
        }
        let category = document
            .attribute(target, FILTER_ATTRIBUTE)
            .unwrap_or_else(|| ALL.to_string());
        self.mark_pressed(document, target);
        self.select(document, tasks, now_ms, &category);
        true
    }

    /// Show cards matching `category` and start hiding the others.
    pub fn select(
        &mut self,
        document: &mut dyn Document,
        tasks: &mut TaskQueue,
        now_ms: u64,
        category: &str,
    ) {
        self.selected = category.to_string();
        for &card in &self.cards {
            let result = if self.matches(&*document, card) {
                tasks.cancel(TaskKey::FilterHide(card));
                show(document, card)
            } else {
                tasks.schedule(TaskKey::FilterHide(card), now_ms.saturating_add(self.fade_ms));
                fade_out(document, card)
            };
            if let Err(err) = result {
                tracing::debug!(element = %card, error = %err, "filter skipped card");
            }
        }
        tracing::debug!(category, "filter applied");
    }

    /// Take a faded card out of layout once its hide task comes due.
    pub fn on_hide_due(&self, document: &mut dyn Document, card: ElementId) {
        if self.matches(&*document, card) {
            return;
        }
        if let Err(err) = document.set_style(card, "display", "none") {
            tracing::debug!(element = %card, error = %err, "hidden card vanished");
        }
    }

    /// Whether `card` belongs to the current selection.
    pub fn matches(&self, document: &dyn Document, card: ElementId) -> bool {
        self.selected == ALL
            || document
                .attribute(card, CATEGORY_ATTRIBUTE)
                .is_some_and(|category| category == self.selected)
    }

    fn mark_pressed(&self, document: &mut dyn Document, pressed: ElementId) {
        for &button in &self.buttons {
            let active = button == pressed;
            let result = if active {
                document.add_class(button, "active")
            } else {
                document.remove_class(button, "active")
            }
            .and_then(|()| {
                document.set_attribute(button, "aria-pressed", if active { "true" } else { "false" })
            });
            if let Err(err) = result {
                tracing::debug!(element = %button, error = %err, "filter button vanished");
            }
        }
    }
}

fn show(document: &mut dyn Document, card: ElementId) -> Result<(), crate::error::BehaviorError> {
    document.set_style(card, "display", "block")?;
    document.set_style(card, "opacity", "1")?;
    document.set_style(card, "transform", "translateY(0)")
}

fn fade_out(document: &mut dyn Document, card: ElementId) -> Result<(), crate::error::BehaviorError> {
    document.set_style(card, "opacity", "0")?;
    document.set_style(card, "transform", "translateY(20px)")
}
