//! Scroll-triggered reveals.
//!
//! Participating elements are found once at start, each gets a
//! [`RevealMachine`](crate::core::RevealMachine) inside a
//! [`RevealScheduler`], and the host's intersection events drive them. Two
//! schedulers exist on a page:
//!
//! - [`Channel::Reveal`]: every `section` and `[data-animate]` element fades
//!   and slides into place.
//! - [`Channel::SkillBars`]: the skills section fills its progress bars.

mod effect;
mod element;
mod scheduler;

pub use effect::{prepare_hidden, FillSkillBars, RevealClasses, TriggerEffect, REVEALED_CLASS, WIDTH_ATTRIBUTE};
pub use element::{ObservedElement, ANIMATION_ATTRIBUTE, DELAY_ATTRIBUTE};
pub use scheduler::RevealScheduler;

use crate::config::BehaviorConfig;
use crate::host::{Channel, Context, ObserveOptions};

/// Register every reveal participant found in the document.
///
/// Each participant is put in its hidden pose first. An empty document gives
/// an empty scheduler.
pub fn scan_reveals(cx: &mut Context<'_>, config: &BehaviorConfig) -> RevealScheduler {
    let mut scheduler = RevealScheduler::new(Channel::Reveal);
    let options = ObserveOptions::new(config.reveal_threshold, config.root_margin());

    for id in cx.document.query_all(&config.selectors.reveal) {
        let element =
            ObservedElement::from_markup(&*cx.document, id, &config.default_animation, options);
        if let Err(err) = prepare_hidden(&mut *cx.document, id) {
            tracing::debug!(element = %id, error = %err, "reveal participant vanished");
            continue;
        }
        scheduler.register(cx, element, Box::new(RevealClasses));
    }

    tracing::debug!(count = scheduler.registered(), "reveal participants registered");
    scheduler
}

/// Watch the skills section and fill its bars once it is in view.
///
/// Without a skills section or without bars the scheduler stays empty.
pub fn scan_skill_bars(cx: &mut Context<'_>, config: &BehaviorConfig) -> RevealScheduler {
    let mut scheduler = RevealScheduler::new(Channel::SkillBars);
    let bars = cx.document.query_all(&config.selectors.skill_bars);
    let Some(section) = cx.document.query(&config.selectors.skills_section) else {
        return scheduler;
    };
    if bars.is_empty() {
        return scheduler;
    }

    let options = ObserveOptions::new(config.skill_bar_threshold, config.root_margin());
    let element = ObservedElement::new(section, &config.default_animation, options);
    scheduler.register(cx, element, Box::new(FillSkillBars { bars }));
    scheduler
}
