//! Capability interfaces between page behaviors and their host.
//!
//! Behaviors never reach for a global document. Everything they read or
//! write goes through two narrow traits:
//!
//! - [`Document`]: node lookup, attributes, classes, inline styles, text and
//!   form values, scrolling.
//! - [`IntersectionSource`]: registration with the host's viewport
//!   visibility detector. The host pushes the resulting events back in as
//!   [`PageEvent::Intersection`](crate::page::PageEvent::Intersection).
//!
//! Both are bundled with the host clock in a [`Context`] that the page hands
//! to each component by reference. [`memory`] provides in-memory versions of
//! both traits.

pub mod memory;

use crate::error::BehaviorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque handle to a node in the host document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signed pixel insets applied to the viewport before the visibility test.
///
/// Negative values shrink the effective viewport. The default pulls the
/// bottom edge up by 100px so elements reveal once they are clearly on
/// screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    /// Margin that only moves the bottom edge.
    pub const fn bottom(px: i32) -> Self {
        Self {
            top: 0,
            right: 0,
            bottom: px,
            left: 0,
        }
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::bottom(-100)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Which observer a registration belongs to.
///
/// Each channel behaves like a separate host observer: the same node may be
/// watched on several channels with different options, and unobserving on
/// one channel leaves the others alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Reveal,
    SkillBars,
    Counters,
}

/// Parameters of one intersection registration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserveOptions {
    /// Fraction of the element's area (0.0 to 1.0) that must be visible.
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl ObserveOptions {
    pub fn new(threshold: f64, root_margin: RootMargin) -> Self {
        Self {
            threshold,
            root_margin,
        }
    }
}

/// How a programmatic scroll should move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Read/write access to the host document.
///
/// Mutations on a node that is no longer in the document return
/// [`BehaviorError::MissingElement`]; callers decide whether that matters
/// (it almost never does).
pub trait Document {
    /// All nodes matching a CSS selector list, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    fn contains(&self, id: ElementId) -> bool;

    fn attribute(&self, id: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str)
        -> Result<(), BehaviorError>;

    fn has_class(&self, id: ElementId, class: &str) -> bool;

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<(), BehaviorError>;

    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<(), BehaviorError>;

    /// Set an inline style property. An empty value clears the property.
    fn set_style(&mut self, id: ElementId, property: &str, value: &str)
        -> Result<(), BehaviorError>;

    fn text(&self, id: ElementId) -> Option<String>;

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<(), BehaviorError>;

    fn set_inner_html(&mut self, id: ElementId, html: &str) -> Result<(), BehaviorError>;

    /// Current value of a form control.
    fn value(&self, id: ElementId) -> Option<String>;

    fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), BehaviorError>;

    /// Distance from the document top to the node's top edge, in pixels.
    fn offset_top(&self, id: ElementId) -> Option<f64>;

    fn scroll_y(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// First node matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Flip `class` on the node, returning whether it is now present.
    fn toggle_class(&mut self, id: ElementId, class: &str) -> Result<bool, BehaviorError> {
        if self.has_class(id, class) {
            self.remove_class(id, class)?;
            Ok(false)
        } else {
            self.add_class(id, class)?;
            Ok(true)
        }
    }
}

/// Registration side of the host's viewport visibility detector.
pub trait IntersectionSource {
    fn observe(&mut self, channel: Channel, target: ElementId, options: ObserveOptions);

    /// Stop delivering events for `target` on `channel`. Calling this for a
    /// target that is not observed is a no-op.
    fn unobserve(&mut self, channel: Channel, target: ElementId);
}

/// Everything a component may touch while handling one event.
pub struct Context<'a> {
    pub document: &'a mut dyn Document,
    pub intersections: &'a mut dyn IntersectionSource,
    /// Host clock in milliseconds.
    pub now_ms: u64,
}

impl<'a> Context<'a> {
    pub fn new(
        document: &'a mut dyn Document,
        intersections: &'a mut dyn IntersectionSource,
        now_ms: u64,
    ) -> Self {
        Self {
            document,
            intersections,
            now_ms,
        }
    }
}

/// Read a numeric attribute, treating absence and garbage alike.
pub fn numeric_attribute<T: FromStr>(
    document: &dyn Document,
    id: ElementId,
    name: &str,
) -> Result<T, BehaviorError> {
    let raw = document.attribute(id, name);
    raw.as_deref()
        .map(str::trim)
        .and_then(|value| value.parse::<T>().ok())
        .ok_or_else(|| BehaviorError::MalformedNumericAttribute {
            element: id,
            attribute: name.to_string(),
            value: raw.clone(),
        })
}
