//! In-memory document and intersection source.
//!
//! `MemoryDocument` is a small node tree with just enough selector support
//! for the behaviors in this crate: type, `#id`, `.class`, `[attr]`,
//! `[attr="v"]`, `[attr^="v"]`, descendant combinators and selector lists.
//! `RecordingObserver` remembers which nodes are observed and with which
//! options; the host (or a test) decides when they intersect.

use super::{Channel, Document, ElementId, IntersectionSource, ObserveOptions, ScrollBehavior};
use crate::error::BehaviorError;
use std::collections::{BTreeMap, BTreeSet};

/// Description of a node to insert.
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    offset_top: f64,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn offset_top(mut self, top: f64) -> Self {
        self.offset_top = top;
        self
    }
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    value: String,
    offset_top: f64,
}

impl From<ElementSpec> for Node {
    fn from(spec: ElementSpec) -> Self {
        Self {
            tag: spec.tag,
            parent: None,
            attributes: spec.attributes,
            classes: spec.classes,
            styles: BTreeMap::new(),
            text: spec.text,
            inner_html: String::new(),
            value: spec.value,
            offset_top: spec.offset_top,
        }
    }
}

/// A programmatic scroll issued through [`Document::scroll_to`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// In-memory node tree implementing [`Document`].
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    nodes: BTreeMap<ElementId, Node>,
    next_id: u64,
    scroll_y: f64,
    scrolls: Vec<ScrollRequest>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a top-level node.
    pub fn insert(&mut self, spec: ElementSpec) -> ElementId {
        self.insert_node(None, spec)
    }

    /// Insert a node under `parent`.
    pub fn insert_child(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        self.insert_node(Some(parent), spec)
    }

    fn insert_node(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        self.next_id += 1;
        let id = ElementId::from_raw(self.next_id);
        let mut node = Node::from(spec);
        node.parent = parent;
        self.nodes.insert(id, node);
        id
    }

    /// Detach a node and all of its descendants.
    pub fn remove(&mut self, id: ElementId) {
        let doomed: Vec<ElementId> = self
            .nodes
            .keys()
            .copied()
            .filter(|candidate| self.is_self_or_descendant(*candidate, id))
            .collect();
        for node in doomed {
            self.nodes.remove(&node);
        }
    }

    fn is_self_or_descendant(&self, candidate: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = Some(candidate);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|node| node.parent);
        }
        false
    }

    /// Inline style value, if set.
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(|node| node.styles.get(property))
            .map(String::as_str)
    }

    pub fn inner_html(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.inner_html.as_str())
    }

    /// Simulate the user scrolling without a programmatic request.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Every programmatic scroll issued so far, oldest first.
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, BehaviorError> {
        self.nodes
            .get_mut(&id)
            .ok_or(BehaviorError::MissingElement(id))
    }

    fn matches_complex(&self, id: ElementId, compounds: &[Compound]) -> bool {
        let Some((last, ancestors)) = compounds.split_last() else {
            return false;
        };
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }

        // Descendant combinators only, so matching each remaining compound
        // against the nearest qualifying ancestor is sufficient.
        let mut cursor = node.parent;
        for compound in ancestors.iter().rev() {
            loop {
                let Some(ancestor_id) = cursor else {
                    return false;
                };
                let Some(ancestor) = self.nodes.get(&ancestor_id) else {
                    return false;
                };
                cursor = ancestor.parent;
                if compound.matches(ancestor) {
                    break;
                }
            }
        }
        true
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(list) = parse_selector_list(selector) else {
            return Vec::new();
        };
        self.nodes
            .keys()
            .copied()
            .filter(|id| list.iter().any(|complex| self.matches_complex(*id, complex)))
            .collect()
    }

    fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        let node = self.nodes.get(&id)?;
        if name == "class" {
            if node.classes.is_empty() {
                return None;
            }
            return Some(node.classes.iter().cloned().collect::<Vec<_>>().join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), BehaviorError> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.classes.contains(class))
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<(), BehaviorError> {
        self.node_mut(id)?.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&mut self, id: ElementId, class: &str) -> Result<(), BehaviorError> {
        self.node_mut(id)?.classes.remove(class);
        Ok(())
    }

    fn set_style(
        &mut self,
        id: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), BehaviorError> {
        let node = self.node_mut(id)?;
        if value.is_empty() {
            node.styles.remove(property);
        } else {
            node.styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn text(&self, id: ElementId) -> Option<String> {
        self.nodes.get(&id).map(|node| node.text.clone())
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<(), BehaviorError> {
        self.node_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn set_inner_html(&mut self, id: ElementId, html: &str) -> Result<(), BehaviorError> {
        self.node_mut(id)?.inner_html = html.to_string();
        Ok(())
    }

    fn value(&self, id: ElementId) -> Option<String> {
        self.nodes.get(&id).map(|node| node.value.clone())
    }

    fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), BehaviorError> {
        self.node_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn offset_top(&self, id: ElementId) -> Option<f64> {
        self.nodes.get(&id).map(|node| node.offset_top)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_y = top.max(0.0);
        self.scrolls.push(ScrollRequest { top, behavior });
    }
}

#[derive(Clone, Debug, PartialEq)]
enum AttrTest {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, AttrTest)>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != node.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| node.classes.contains(class)) {
            return false;
        }
        self.attributes.iter().all(|(name, test)| {
            let value = node.attributes.get(name);
            match test {
                AttrTest::Exists => value.is_some(),
                AttrTest::Equals(expected) => value == Some(expected),
                AttrTest::Prefix(prefix) => value.is_some_and(|v| v.starts_with(prefix.as_str())),
            }
        })
    }
}

fn parse_selector_list(selector: &str) -> Option<Vec<Vec<Compound>>> {
    selector
        .split(',')
        .map(|complex| {
            let compounds = complex
                .split_whitespace()
                .map(parse_compound)
                .collect::<Option<Vec<_>>>()?;
            if compounds.is_empty() {
                None
            } else {
                Some(compounds)
            }
        })
        .collect()
}

fn parse_compound(text: &str) -> Option<Compound> {
    let is_boundary = |c: char| matches!(c, '.' | '#' | '[');
    let mut compound = Compound::default();

    let tag_end = text.find(is_boundary).unwrap_or(text.len());
    let tag = &text[..tag_end];
    if !tag.is_empty() && tag != "*" {
        compound.tag = Some(tag.to_ascii_lowercase());
    }

    let mut rest = &text[tag_end..];
    while let Some(marker) = rest.chars().next() {
        match marker {
            '.' | '#' => {
                let body = &rest[1..];
                let end = body.find(is_boundary).unwrap_or(body.len());
                let name = &body[..end];
                if name.is_empty() {
                    return None;
                }
                if marker == '.' {
                    compound.classes.push(name.to_string());
                } else {
                    compound.id = Some(name.to_string());
                }
                rest = &body[end..];
            }
            '[' => {
                let close = rest.find(']')?;
                let inner = &rest[1..close];
                compound.attributes.push(parse_attribute_test(inner)?);
                rest = &rest[close + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attribute_test(inner: &str) -> Option<(String, AttrTest)> {
    let unquote = |value: &str| value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string();

    let (name, test) = if let Some((name, value)) = inner.split_once("^=") {
        (name, AttrTest::Prefix(unquote(value)))
    } else if let Some((name, value)) = inner.split_once('=') {
        (name, AttrTest::Equals(unquote(value)))
    } else {
        (inner, AttrTest::Exists)
    };

    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some((name.to_string(), test))
    }
}

/// Intersection source that records registrations.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    observed: BTreeMap<(Channel, ElementId), ObserveOptions>,
    unobserve_calls: usize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observed(&self, channel: Channel, target: ElementId) -> bool {
        self.observed.contains_key(&(channel, target))
    }

    pub fn options(&self, channel: Channel, target: ElementId) -> Option<&ObserveOptions> {
        self.observed.get(&(channel, target))
    }

    /// Targets currently observed on `channel`.
    pub fn observed(&self, channel: Channel) -> Vec<ElementId> {
        self.observed
            .keys()
            .filter(|(observed_channel, _)| *observed_channel == channel)
            .map(|(_, target)| *target)
            .collect()
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Number of `unobserve` calls, including redundant ones.
    pub fn unobserve_calls(&self) -> usize {
        self.unobserve_calls
    }
}

impl IntersectionSource for RecordingObserver {
    fn observe(&mut self, channel: Channel, target: ElementId, options: ObserveOptions) {
        self.observed.insert((channel, target), options);
    }

    fn unobserve(&mut self, channel: Channel, target: ElementId) {
        self.unobserve_calls += 1;
        self.observed.remove(&(channel, target));
    }
}
