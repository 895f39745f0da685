//! Trigger effects run when a one-shot machine fires.

use super::element::ObservedElement;
use crate::error::BehaviorError;
use crate::host::{numeric_attribute, Document, ElementId};

/// Class added to every revealed element.
pub const REVEALED_CLASS: &str = "revealed";
/// Attribute holding a skill bar's fill percentage.
pub const WIDTH_ATTRIBUTE: &str = "data-width";

/// Side effect applied to the document when an element fires.
///
/// Closures with the same signature are effects too, which keeps ad-hoc
/// effects short:
///
/// ```rust
/// use vitrine::host::Document;
/// use vitrine::reveal::{ObservedElement, TriggerEffect};
///
/// let highlight = |document: &mut dyn Document, element: &ObservedElement| {
///     document.add_class(element.id, "highlight")
/// };
/// # fn takes(_: &dyn TriggerEffect) {}
/// # takes(&highlight);
/// ```
pub trait TriggerEffect {
    fn apply(
        &self,
        document: &mut dyn Document,
        element: &ObservedElement,
    ) -> Result<(), BehaviorError>;
}

impl<F> TriggerEffect for F
where
    F: Fn(&mut dyn Document, &ObservedElement) -> Result<(), BehaviorError>,
{
    fn apply(
        &self,
        document: &mut dyn Document,
        element: &ObservedElement,
    ) -> Result<(), BehaviorError> {
        self(document, element)
    }
}

/// Put a participant in its pre-reveal pose: transparent and shifted down.
pub fn prepare_hidden(document: &mut dyn Document, id: ElementId) -> Result<(), BehaviorError> {
    document.set_style(id, "opacity", "0")?;
    document.set_style(id, "transform", "translateY(20px)")?;
    document.set_style(id, "transition", "opacity 0.8s ease, transform 0.8s ease")
}

/// Restore the element's pose and tag it with `revealed` and its animation
/// kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealClasses;

impl TriggerEffect for RevealClasses {
    fn apply(
        &self,
        document: &mut dyn Document,
        element: &ObservedElement,
    ) -> Result<(), BehaviorError> {
        document.set_style(element.id, "opacity", "1")?;
        document.set_style(element.id, "transform", "translateY(0)")?;
        document.add_class(element.id, REVEALED_CLASS)?;
        document.add_class(element.id, &element.animation_kind)
    }
}

/// Widen every skill bar to its declared percentage.
///
/// Bars without a numeric `data-width` keep their current width; the other
/// bars still fill.
#[derive(Clone, Debug, Default)]
pub struct FillSkillBars {
    pub bars: Vec<ElementId>,
}

impl TriggerEffect for FillSkillBars {
    fn apply(
        &self,
        document: &mut dyn Document,
        _element: &ObservedElement,
    ) -> Result<(), BehaviorError> {
        for &bar in &self.bars {
            let width = match numeric_attribute::<f64>(&*document, bar, WIDTH_ATTRIBUTE) {
                Ok(width) if width.is_finite() => width.clamp(0.0, 100.0),
                Ok(_) => continue,
                Err(err) => {
                    tracing::debug!(element = %bar, error = %err, "skill bar left unfilled");
                    continue;
                }
            };
            if let Err(err) = document.set_style(bar, "width", &format!("{width}%")) {
                tracing::debug!(element = %bar, error = %err, "skill bar vanished");
            }
        }
        Ok(())
    }
}
