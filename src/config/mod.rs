//! Page behavior configuration.
//!
//! The timing constants and thresholds that used to be scattered through
//! the page script are collected here as defaults. Every field has a
//! default, so a JSON document only needs the fields it changes:
//!
//! ```rust
//! use vitrine::config::{BehaviorConfig, CounterStrategy};
//!
//! let config = BehaviorConfig::from_json(r#"{ "counter_strategy": "frame" }"#).unwrap();
//! assert_eq!(config.counter_strategy, CounterStrategy::Frame);
//! assert_eq!(config.reveal_threshold, 0.1);
//! ```

mod builder;
mod error;

pub use builder::ConfigBuilder;
pub use error::ConfigError;

use crate::host::RootMargin;
use serde::{Deserialize, Serialize};

/// How animated counters step toward their target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterStrategy {
    /// +1 every `duration / target` milliseconds, driven by timers.
    #[default]
    Interval,
    /// Value proportional to elapsed time, recomputed on every host frame.
    Frame,
}

/// Selectors used to find the nodes each behavior works on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub reveal: String,
    pub skills_section: String,
    pub skill_bars: String,
    pub counters: String,
    pub menu_button: String,
    pub nav_links: String,
    pub menu_overlay: String,
    pub nav_link: String,
    pub filter_buttons: String,
    pub project_cards: String,
    pub contact_form: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_subject: String,
    pub contact_message: String,
    pub header: String,
    pub scroll_top: String,
    pub parallax: String,
    pub anchors: String,
    pub hover: String,
    pub notification: String,
    pub notification_close: String,
    pub current_year: String,
    pub body: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            reveal: "section, [data-animate]".to_string(),
            skills_section: "#skills".to_string(),
            skill_bars: ".progress".to_string(),
            counters: "[data-count]".to_string(),
            menu_button: "#mobileMenuBtn".to_string(),
            nav_links: "#navLinks".to_string(),
            menu_overlay: "#mobileMenuOverlay".to_string(),
            nav_link: ".nav-links a".to_string(),
            filter_buttons: ".filter-btn".to_string(),
            project_cards: ".project-card".to_string(),
            contact_form: "#contactForm".to_string(),
            contact_name: "#name".to_string(),
            contact_email: "#email".to_string(),
            contact_subject: "#subject".to_string(),
            contact_message: "#message".to_string(),
            header: "#header".to_string(),
            scroll_top: "#scrollTop".to_string(),
            parallax: "[data-parallax]".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            hover: ".skill-item, .project-card, .stat-item".to_string(),
            notification: "#notification".to_string(),
            notification_close: ".notification-close".to_string(),
            current_year: "#currentYear".to_string(),
            body: "body".to_string(),
        }
    }
}

impl Selectors {
    fn entries(&self) -> [(&'static str, &str); 24] {
        [
            ("reveal", self.reveal.as_str()),
            ("skills_section", self.skills_section.as_str()),
            ("skill_bars", self.skill_bars.as_str()),
            ("counters", self.counters.as_str()),
            ("menu_button", self.menu_button.as_str()),
            ("nav_links", self.nav_links.as_str()),
            ("menu_overlay", self.menu_overlay.as_str()),
            ("nav_link", self.nav_link.as_str()),
            ("filter_buttons", self.filter_buttons.as_str()),
            ("project_cards", self.project_cards.as_str()),
            ("contact_form", self.contact_form.as_str()),
            ("contact_name", self.contact_name.as_str()),
            ("contact_email", self.contact_email.as_str()),
            ("contact_subject", self.contact_subject.as_str()),
            ("contact_message", self.contact_message.as_str()),
            ("header", self.header.as_str()),
            ("scroll_top", self.scroll_top.as_str()),
            ("parallax", self.parallax.as_str()),
            ("anchors", self.anchors.as_str()),
            ("hover", self.hover.as_str()),
            ("notification", self.notification.as_str()),
            ("notification_close", self.notification_close.as_str()),
            ("current_year", self.current_year.as_str()),
            ("body", self.body.as_str()),
        ]
    }
}

/// Tuning constants for every page behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Visible fraction required before a reveal fires.
    pub reveal_threshold: f64,
    /// Bottom viewport inset for reveal and skill-bar observation.
    pub root_margin_px: i32,
    /// Animation kind used when an element does not declare one.
    pub default_animation: String,
    /// Give project cards staggered `animation-delay`s at start.
    pub stagger_enabled: bool,
    pub stagger_step_ms: u64,
    pub counter_strategy: CounterStrategy,
    pub counter_threshold: f64,
    /// Used when a counter does not declare `data-duration`.
    pub counter_duration_ms: u64,
    pub skill_bar_threshold: f64,
    /// Fade-out time before a filtered-out card is removed from layout.
    pub filter_fade_ms: u64,
    pub header_hide_after_px: f64,
    pub header_scrolled_after_px: f64,
    pub scroll_top_after_px: f64,
    /// Space left above an anchor target for the fixed header.
    pub anchor_offset_px: f64,
    pub toast_lifetime_ms: u64,
    pub body_fade_delay_ms: u64,
    /// Used when a parallax layer does not declare `data-speed`.
    pub parallax_speed: f64,
    pub selectors: Selectors,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            root_margin_px: -100,
            default_animation: "fade-up".to_string(),
            stagger_enabled: true,
            stagger_step_ms: 200,
            counter_strategy: CounterStrategy::Interval,
            counter_threshold: 0.5,
            counter_duration_ms: 2000,
            skill_bar_threshold: 0.2,
            filter_fade_ms: 300,
            header_hide_after_px: 100.0,
            header_scrolled_after_px: 50.0,
            scroll_top_after_px: 300.0,
            anchor_offset_px: 80.0,
            toast_lifetime_ms: 5000,
            body_fade_delay_ms: 100,
            parallax_speed: 0.5,
            selectors: Selectors::default(),
        }
    }
}

impl BehaviorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Root margin applied to reveal and skill-bar observation.
    pub fn root_margin(&self) -> RootMargin {
        RootMargin::bottom(self.root_margin_px)
    }

    /// Check every field for values the behaviors cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("reveal_threshold", self.reveal_threshold),
            ("counter_threshold", self.counter_threshold),
            ("skill_bar_threshold", self.skill_bar_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }

        for (field, value) in [
            ("header_hide_after_px", self.header_hide_after_px),
            ("header_scrolled_after_px", self.header_scrolled_after_px),
            ("scroll_top_after_px", self.scroll_top_after_px),
            ("anchor_offset_px", self.anchor_offset_px),
            ("parallax_speed", self.parallax_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("counter_duration_ms", self.counter_duration_ms),
            ("toast_lifetime_ms", self.toast_lifetime_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }

        if let Some((field, _)) = self
            .selectors
            .entries()
            .into_iter()
            .find(|(_, selector)| selector.trim().is_empty())
        {
            return Err(ConfigError::EmptySelector { field });
        }

        Ok(())
    }
}
