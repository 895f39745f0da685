//! Scroll-linked parallax layers.

use crate::host::{numeric_attribute, Document, ElementId};

pub const SPEED_ATTRIBUTE: &str = "data-speed";

/// Elements translated by a fraction of the scroll offset.
#[derive(Clone, Debug, Default)]
pub struct Parallax {
    layers: Vec<(ElementId, f64)>,
}

impl Parallax {
    /// Collect layers matching `selector`. A layer with an unreadable speed
    /// is left static.
    pub fn capture(document: &dyn Document, selector: &str, default_speed: f64) -> Self {
        let layers = document
            .query_all(selector)
            .into_iter()
            .filter_map(|id| {
                if document.attribute(id, SPEED_ATTRIBUTE).is_none() {
                    return Some((id, default_speed));
                }
                match numeric_attribute::<f64>(document, id, SPEED_ATTRIBUTE) {
                    Ok(speed) if speed.is_finite() => Some((id, speed)),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::debug!(element = %id, error = %err, "parallax disabled");
                        None
                    }
                }
            })
            .collect();
        Self { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn on_scroll(&self, document: &mut dyn Document, y: f64) {
        for &(id, speed) in &self.layers {
            let transform = format!("translateY({}px)", y * speed);
            if let Err(err) = document.set_style(id, "transform", &transform) {
                tracing::debug!(element = %id, error = %err, "parallax layer vanished");
            }
        }
    }
}
