//! Transient notification toast.
//!
//! One toast exists at a time. Showing a new one replaces the current one
//! and its auto-dismiss timer; dismissal tasks carry the toast's id so a
//! stale timer can never close a newer toast.

use crate::host::{Document, ElementId};
use crate::timers::{TaskKey, TaskQueue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SHOW_CLASS: &str = "show";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Class the container carries while showing a toast of this kind.
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at_ms: u64,
}

/// Owner of the single toast slot.
///
/// The container node is optional: without it the toaster still tracks the
/// current toast for hosts that render it themselves.
#[derive(Clone, Debug)]
pub struct Toaster {
    container: Option<ElementId>,
    close_button: Option<ElementId>,
    lifetime_ms: u64,
    current: Option<Toast>,
}

impl Toaster {
    pub fn new(container: Option<ElementId>, close_button: Option<ElementId>, lifetime_ms: u64) -> Self {
        Self {
            container,
            close_button,
            lifetime_ms,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn close_button(&self) -> Option<ElementId> {
        self.close_button
    }

    /// Show `message`, replacing any current toast. Returns the new toast's id.
    pub fn notify(
        &mut self,
        document: &mut dyn Document,
        tasks: &mut TaskQueue,
        now_ms: u64,
        message: &str,
        kind: NotificationKind,
    ) -> Uuid {
        if let Some(previous) = self.current.take() {
            tasks.cancel(TaskKey::ToastDismiss(previous.id));
            self.clear_container(document, previous.kind);
        }

        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.to_string(),
            kind,
            shown_at_ms: now_ms,
        };
        if let Some(container) = self.container {
            let shown = document
                .set_text(container, message)
                .and_then(|()| document.add_class(container, kind.class()))
                .and_then(|()| document.add_class(container, SHOW_CLASS));
            if let Err(err) = shown {
                tracing::debug!(error = %err, "notification container unavailable");
            }
        }
        tasks.schedule(TaskKey::ToastDismiss(toast.id), now_ms.saturating_add(self.lifetime_ms));
        tracing::debug!(id = %toast.id, kind = ?kind, "notification shown");

        let id = toast.id;
        self.current = Some(toast);
        id
    }

    /// Dismiss the current toast early. Returns whether one was showing.
    pub fn dismiss(&mut self, document: &mut dyn Document, tasks: &mut TaskQueue) -> bool {
        let Some(toast) = self.current.take() else {
            return false;
        };
        tasks.cancel(TaskKey::ToastDismiss(toast.id));
        self.clear_container(document, toast.kind);
        true
    }

    /// Handle a due dismissal task. Ignored unless `id` is still current.
    pub fn on_dismiss_due(&mut self, document: &mut dyn Document, id: Uuid) -> bool {
        match &self.current {
            Some(toast) if toast.id == id => {
                let kind = toast.kind;
                self.current = None;
                self.clear_container(document, kind);
                true
            }
            _ => false,
        }
    }

    fn clear_container(&self, document: &mut dyn Document, kind: NotificationKind) {
        if let Some(container) = self.container {
            let cleared = document
                .remove_class(container, SHOW_CLASS)
                .and_then(|()| document.remove_class(container, kind.class()));
            if let Err(err) = cleared {
                tracing::debug!(element = %container, error = %err, "notification container vanished");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{ElementSpec, MemoryDocument};

    fn setup() -> (MemoryDocument, ElementId, Toaster) {
        let mut doc = MemoryDocument::new();
        let container = doc.insert(ElementSpec::new("div").id("notification"));
        (doc, container, Toaster::new(Some(container), None, 5_000))
    }

    #[test]
    fn notify_shows_and_auto_dismisses() {
        let (mut doc, container, mut toaster) = setup();
        let mut tasks = TaskQueue::new();

        let id = toaster.notify(&mut doc, &mut tasks, 0, "Saved", NotificationKind::Success);
        assert!(doc.has_class(container, SHOW_CLASS));
        assert!(doc.has_class(container, "success"));
        assert_eq!(doc.text(container).as_deref(), Some("Saved"));
        assert_eq!(tasks.due_at(TaskKey::ToastDismiss(id)), Some(5_000));

        let due = tasks.pop_due(5_000).unwrap();
        assert_eq!(due.key, TaskKey::ToastDismiss(id));
        assert!(toaster.on_dismiss_due(&mut doc, id));
        assert!(toaster.current().is_none());
        assert!(!doc.has_class(container, SHOW_CLASS));
    }

    #[test]
    fn newer_toast_survives_the_old_timer() {
        let (mut doc, container, mut toaster) = setup();
        let mut tasks = TaskQueue::new();

        let first = toaster.notify(&mut doc, &mut tasks, 0, "One", NotificationKind::Error);
        let second = toaster.notify(&mut doc, &mut tasks, 3_000, "Two", NotificationKind::Success);

        assert!(!tasks.is_scheduled(TaskKey::ToastDismiss(first)));
        assert!(!toaster.on_dismiss_due(&mut doc, first));
        assert_eq!(toaster.current().map(|toast| toast.id), Some(second));
        assert!(!doc.has_class(container, "error"));
        assert!(doc.has_class(container, "success"));
        assert_eq!(tasks.pop_due(5_000), None);
    }

    #[test]
    fn early_dismiss_cancels_the_timer() {
        let (mut doc, container, mut toaster) = setup();
        let mut tasks = TaskQueue::new();

        toaster.notify(&mut doc, &mut tasks, 0, "Hi", NotificationKind::Success);
        assert!(toaster.dismiss(&mut doc, &mut tasks));
        assert!(!toaster.dismiss(&mut doc, &mut tasks));
        assert!(tasks.is_empty());
        assert!(!doc.has_class(container, SHOW_CLASS));
    }

    #[test]
    fn dismissal_survives_a_removed_container() {
        let (mut doc, container, mut toaster) = setup();
        let mut tasks = TaskQueue::new();

        let id = toaster.notify(&mut doc, &mut tasks, 0, "Gone", NotificationKind::Success);
        doc.remove(container);

        assert!(toaster.on_dismiss_due(&mut doc, id));
        assert!(toaster.current().is_none());
        assert!(!doc.contains(container));
    }

    #[test]
    fn works_without_a_container() {
        let mut doc = MemoryDocument::new();
        let mut tasks = TaskQueue::new();
        let mut toaster = Toaster::new(None, None, 5_000);

        toaster.notify(&mut doc, &mut tasks, 0, "Headless", NotificationKind::Error);

        assert_eq!(toaster.current().map(|toast| toast.message.as_str()), Some("Headless"));
        assert_eq!(toaster.current().map(|toast| toast.kind), Some(NotificationKind::Error));
    }
}
