//! Registry of observed elements and their one-shot machines.

use super::effect::TriggerEffect;
use super::element::ObservedElement;
use crate::core::{RevealMachine, RevealState, Signal, StateHistory};
use crate::host::{Channel, Context, ElementId};
use crate::timers::{TaskKey, TaskQueue};
use std::collections::{BTreeMap, HashMap};

struct Registration {
    element: ObservedElement,
    machine: RevealMachine,
    effect: Box<dyn TriggerEffect>,
}

/// Owns every element observed on one intersection channel.
///
/// The scheduler is the only thing that mutates its machines. An element is
/// unobserved as soon as its machine arms, and leaves the registry once its
/// effect has been invoked; afterwards only its transition history is kept.
pub struct RevealScheduler {
    channel: Channel,
    registry: HashMap<ElementId, Registration>,
    fired: BTreeMap<ElementId, StateHistory<RevealState>>,
}

impl RevealScheduler {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            registry: HashMap::new(),
            fired: BTreeMap::new(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Register an element and start observing it.
    ///
    /// Elements that are already registered, or have already fired, are left
    /// alone and `false` is returned.
    pub fn register(
        &mut self,
        cx: &mut Context<'_>,
        element: ObservedElement,
        effect: Box<dyn TriggerEffect>,
    ) -> bool {
        let id = element.id;
        if self.registry.contains_key(&id) || self.fired.contains_key(&id) {
            tracing::debug!(element = %id, channel = ?self.channel, "already registered");
            return false;
        }
        cx.intersections.observe(self.channel, id, element.options);
        self.registry.insert(
            id,
            Registration {
                element,
                machine: RevealMachine::new(),
                effect,
            },
        );
        true
    }

    /// Route one intersection event. Returns `true` when it armed a machine.
    ///
    /// Events for unknown elements, for elements that already armed, and
    /// non-intersecting events are ignored.
    pub fn on_intersection(
        &mut self,
        cx: &mut Context<'_>,
        tasks: &mut TaskQueue,
        target: ElementId,
        visible: bool,
    ) -> bool {
        let Some(registration) = self.registry.get_mut(&target) else {
            tracing::trace!(element = %target, channel = ?self.channel, "event for unregistered element");
            return false;
        };
        if registration.machine.on_intersection(visible, cx.now_ms) == Signal::Ignored {
            return false;
        }

        cx.intersections.unobserve(self.channel, target);
        let delay_ms = registration.element.delay_ms;
        if delay_ms == 0 {
            self.fire(cx, target);
        } else {
            tasks.schedule(TaskKey::Reveal(self.channel, target), cx.now_ms.saturating_add(delay_ms));
        }
        true
    }

    /// Run a delayed effect whose task has come due.
    pub fn run_delayed(&mut self, cx: &mut Context<'_>, target: ElementId) {
        self.fire(cx, target);
    }

    fn fire(&mut self, cx: &mut Context<'_>, target: ElementId) {
        let Some(mut registration) = self.registry.remove(&target) else {
            return;
        };
        if registration.machine.current_state() != RevealState::Firing {
            self.registry.insert(target, registration);
            return;
        }

        if cx.document.contains(target) {
            if let Err(err) = registration
                .effect
                .apply(&mut *cx.document, &registration.element)
            {
                tracing::debug!(element = %target, error = %err, "trigger effect skipped");
            }
        } else {
            tracing::debug!(element = %target, "element left the document before firing");
        }

        registration.machine.complete(cx.now_ms);
        tracing::trace!(element = %target, channel = ?self.channel, "fired");
        self.fired
            .insert(target, registration.machine.history().clone());
    }

    /// Lifecycle state of an element, or `None` if it was never registered.
    pub fn state_of(&self, id: ElementId) -> Option<RevealState> {
        if self.fired.contains_key(&id) {
            return Some(RevealState::Fired);
        }
        self.registry
            .get(&id)
            .map(|registration| registration.machine.current_state())
    }

    /// Transition history of an element that is registered or has fired.
    pub fn history(&self, id: ElementId) -> Option<&StateHistory<RevealState>> {
        self.fired.get(&id).or_else(|| {
            self.registry
                .get(&id)
                .map(|registration| registration.machine.history())
        })
    }

    /// Elements still registered (pending or waiting on a delay).
    pub fn registered(&self) -> usize {
        self.registry.len()
    }

    pub fn fired(&self) -> usize {
        self.fired.len()
    }
}
