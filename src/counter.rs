//! Animated numeric counters.
//!
//! A counter is a one-shot machine on its own intersection channel, watched
//! at a higher threshold than reveals since a number reads best when mostly
//! visible. Once it fires it counts from 0 to its target using the
//! configured [`CounterStrategy`]:
//!
//! - `Interval`: +1 every `duration / target` ms, driven by the task queue.
//! - `Frame`: on every host frame the shown value becomes
//!   `target * elapsed / duration`, rounded down.
//!
//! Both only ever move up and stop exactly on the target; the declared
//! suffix (`"50+"`) is appended to the final value only.

use crate::config::{BehaviorConfig, CounterStrategy};
use crate::core::{RevealMachine, RevealState, Signal};
use crate::error::BehaviorError;
use crate::host::{numeric_attribute, Channel, Context, Document, ElementId, ObserveOptions, RootMargin};
use crate::timers::{TaskKey, TaskQueue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute holding the target, optionally with a suffix (`"50+"`).
pub const COUNT_ATTRIBUTE: &str = "data-count";
/// Optional per-counter duration in milliseconds.
pub const DURATION_ATTRIBUTE: &str = "data-duration";

/// What a counter counts to and how long it takes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub target: u64,
    /// Text appended to the final value, such as `"+"`.
    pub suffix: String,
    pub duration_ms: u64,
}

impl CounterSpec {
    /// Parse a count such as `"50"` or `"50+"`.
    ///
    /// ```rust
    /// use vitrine::counter::CounterSpec;
    ///
    /// let spec = CounterSpec::parse("120+", 2000).unwrap();
    /// assert_eq!(spec.target, 120);
    /// assert_eq!(spec.suffix, "+");
    /// assert!(CounterSpec::parse("lots", 2000).is_none());
    /// ```
    pub fn parse(raw: &str, duration_ms: u64) -> Option<Self> {
        let raw = raw.trim();
        let digits_end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let target = raw[..digits_end].parse().ok()?;
        Some(Self {
            target,
            suffix: raw[digits_end..].trim().to_string(),
            duration_ms,
        })
    }

    /// Read a counter declared in markup.
    ///
    /// A count without its own suffix inherits a trailing `+` from the
    /// element's current text, so `<span data-count="50">50+</span>` ends on
    /// `"50+"`.
    pub fn from_markup(
        document: &dyn Document,
        id: ElementId,
        default_duration_ms: u64,
    ) -> Result<Self, BehaviorError> {
        let malformed = |value: Option<String>| BehaviorError::MalformedNumericAttribute {
            element: id,
            attribute: COUNT_ATTRIBUTE.to_string(),
            value,
        };

        let raw = document
            .attribute(id, COUNT_ATTRIBUTE)
            .ok_or_else(|| malformed(None))?;
        let duration_ms = match document.attribute(id, DURATION_ATTRIBUTE) {
            Some(_) => numeric_attribute(document, id, DURATION_ATTRIBUTE)?,
            None => default_duration_ms,
        };
        let mut spec = Self::parse(&raw, duration_ms).ok_or_else(|| malformed(Some(raw.clone())))?;

        if spec.suffix.is_empty()
            && document
                .text(id)
                .is_some_and(|text| text.trim_end().ends_with('+'))
        {
            spec.suffix = "+".to_string();
        }
        Ok(spec)
    }

    /// Step length of the interval strategy.
    pub fn interval_ms(&self) -> u64 {
        if self.target == 0 {
            0
        } else {
            (self.duration_ms / self.target).max(1)
        }
    }

    /// Value shown by the frame strategy `elapsed_ms` after firing.
    pub fn value_at(&self, elapsed_ms: u64) -> u64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.target;
        }
        (u128::from(self.target) * u128::from(elapsed_ms) / u128::from(self.duration_ms)) as u64
    }

    /// Text for a shown value; the suffix only appears on the target.
    pub fn render(&self, value: u64) -> String {
        if value >= self.target {
            format!("{}{}", self.target, self.suffix)
        } else {
            value.to_string()
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    spec: CounterSpec,
    machine: RevealMachine,
    shown: u64,
    started_at: u64,
}

/// Every counter on the page.
#[derive(Clone, Debug)]
pub struct Counters {
    strategy: CounterStrategy,
    entries: BTreeMap<ElementId, Entry>,
}

impl Counters {
    pub fn new(strategy: CounterStrategy) -> Self {
        Self {
            strategy,
            entries: BTreeMap::new(),
        }
    }

    /// Find and observe every counter. Counters with a malformed count are
    /// skipped.
    pub fn scan(cx: &mut Context<'_>, config: &BehaviorConfig) -> Self {
        let mut counters = Self::new(config.counter_strategy);
        let options = ObserveOptions::new(config.counter_threshold, RootMargin::ZERO);

        for id in cx.document.query_all(&config.selectors.counters) {
            match CounterSpec::from_markup(&*cx.document, id, config.counter_duration_ms) {
                Ok(spec) => counters.register(cx, id, spec, options),
                Err(err) => tracing::debug!(element = %id, error = %err, "counter disabled"),
            }
        }
        counters
    }

    pub fn register(
        &mut self,
        cx: &mut Context<'_>,
        id: ElementId,
        spec: CounterSpec,
        options: ObserveOptions,
    ) {
        if self.entries.contains_key(&id) {
            return;
        }
        cx.intersections.observe(Channel::Counters, id, options);
        self.entries.insert(
            id,
            Entry {
                spec,
                machine: RevealMachine::new(),
                shown: 0,
                started_at: 0,
            },
        );
    }

    pub fn strategy(&self) -> CounterStrategy {
        self.strategy
    }

    /// Route one intersection event. Returns `true` when a counter started.
    pub fn on_intersection(
        &mut self,
        cx: &mut Context<'_>,
        tasks: &mut TaskQueue,
        target: ElementId,
        visible: bool,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&target) else {
            return false;
        };
        if entry.machine.on_intersection(visible, cx.now_ms) == Signal::Ignored {
            return false;
        }
        cx.intersections.unobserve(Channel::Counters, target);

        entry.shown = 0;
        entry.started_at = cx.now_ms;
        if entry.spec.target == 0 {
            Self::finish(cx.document, target, entry, cx.now_ms);
            return true;
        }
        if !Self::show(cx.document, target, entry, 0, cx.now_ms) {
            return true;
        }
        if self.strategy == CounterStrategy::Interval {
            tasks.schedule(
                TaskKey::CounterStep(target),
                cx.now_ms.saturating_add(entry.spec.interval_ms()),
            );
        }
        true
    }

    /// Advance an interval counter whose step task came due at `due_ms`.
    pub fn on_step(
        &mut self,
        cx: &mut Context<'_>,
        tasks: &mut TaskQueue,
        target: ElementId,
        due_ms: u64,
    ) {
        let Some(entry) = self.entries.get_mut(&target) else {
            return;
        };
        if entry.machine.current_state() != RevealState::Firing {
            return;
        }

        let next = entry.shown + 1;
        if next >= entry.spec.target {
            Self::finish(cx.document, target, entry, due_ms);
        } else if Self::show(cx.document, target, entry, next, due_ms) {
            tasks.schedule(TaskKey::CounterStep(target), due_ms.saturating_add(entry.spec.interval_ms()));
        }
    }

    /// Advance every running frame-strategy counter to the current clock.
    pub fn on_frame(&mut self, cx: &mut Context<'_>) {
        if self.strategy != CounterStrategy::Frame {
            return;
        }
        for (&id, entry) in self.entries.iter_mut() {
            if entry.machine.current_state() != RevealState::Firing {
                continue;
            }
            let elapsed = cx.now_ms.saturating_sub(entry.started_at);
            let value = entry.spec.value_at(elapsed);
            if value >= entry.spec.target {
                Self::finish(cx.document, id, entry, cx.now_ms);
            } else if value > entry.shown {
                Self::show(cx.document, id, entry, value, cx.now_ms);
            }
        }
    }

    /// Write an intermediate value. A vanished element ends the run.
    fn show(
        document: &mut dyn Document,
        id: ElementId,
        entry: &mut Entry,
        value: u64,
        now_ms: u64,
    ) -> bool {
        match document.set_text(id, &entry.spec.render(value)) {
            Ok(()) => {
                entry.shown = value;
                true
            }
            Err(err) => {
                tracing::debug!(element = %id, error = %err, "counter abandoned");
                entry.machine.complete(now_ms);
                false
            }
        }
    }

    fn finish(document: &mut dyn Document, id: ElementId, entry: &mut Entry, now_ms: u64) {
        if let Err(err) = document.set_text(id, &entry.spec.render(entry.spec.target)) {
            tracing::debug!(element = %id, error = %err, "counter finished off-document");
        }
        entry.shown = entry.spec.target;
        entry.machine.complete(now_ms);
        tracing::trace!(element = %id, target = entry.spec.target, "counter finished");
    }

    pub fn state_of(&self, id: ElementId) -> Option<RevealState> {
        self.entries.get(&id).map(|entry| entry.machine.current_state())
    }

    /// Value currently shown by a counter.
    pub fn displayed(&self, id: ElementId) -> Option<u64> {
        self.entries.get(&id).map(|entry| entry.shown)
    }

    pub fn spec(&self, id: ElementId) -> Option<&CounterSpec> {
        self.entries.get(&id).map(|entry| &entry.spec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
