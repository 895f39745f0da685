//! Delayed work, keyed by what it acts on.
//!
//! Every one-shot timer of the page (delayed reveals, filter fade-outs,
//! counter steps, toast dismissal, the body fade-in) is a [`TaskKey`] with a
//! due time. Keys are unique: scheduling a key that is already pending moves
//! it, and any pending key can be cancelled. The page drains due tasks every
//! time it handles an event.

use crate::host::{Channel, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Identity of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskKey {
    /// Run the delayed trigger effect of an element observed on a channel.
    Reveal(Channel, ElementId),
    /// Take a filtered-out card out of layout once it has faded.
    FilterHide(ElementId),
    /// Advance an interval-driven counter by one.
    CounterStep(ElementId),
    /// Auto-dismiss the toast with this id.
    ToastDismiss(Uuid),
    BodyFadeIn,
}

/// A task that has come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueTask {
    pub key: TaskKey,
    /// When the task was due, which may be earlier than the current clock.
    pub due_ms: u64,
}

/// Ordered, cancellable set of pending tasks.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    by_due: BTreeMap<(u64, u64), TaskKey>,
    slots: HashMap<TaskKey, (u64, u64)>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` at `due_ms`, replacing any pending task with that key.
    pub fn schedule(&mut self, key: TaskKey, due_ms: u64) {
        self.cancel(key);
        let slot = (due_ms, self.next_seq);
        self.next_seq += 1;
        self.by_due.insert(slot, key);
        self.slots.insert(key, slot);
        tracing::trace!(?key, due_ms, "task scheduled");
    }

    /// Drop a pending task. Returns whether one was pending.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        match self.slots.remove(&key) {
            Some(slot) => {
                self.by_due.remove(&slot);
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, key: TaskKey) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn due_at(&self, key: TaskKey) -> Option<u64> {
        self.slots.get(&key).map(|(due, _)| *due)
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<u64> {
        self.by_due.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    ///
    /// Tasks with equal due times come out in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DueTask> {
        let (&slot, _) = self.by_due.iter().next()?;
        if slot.0 > now_ms {
            return None;
        }
        let key = self.by_due.remove(&slot)?;
        self.slots.remove(&key);
        Some(DueTask {
            key,
            due_ms: slot.0,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
