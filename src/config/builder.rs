//! Fluent builder for [`BehaviorConfig`].

use super::{BehaviorConfig, ConfigError, CounterStrategy, Selectors};

/// Builder for behavior configuration.
///
/// Starts from the defaults; `build` validates the result.
///
/// ```rust
/// use vitrine::config::{ConfigBuilder, CounterStrategy};
///
/// let config = ConfigBuilder::new()
///     .reveal_threshold(0.25)
///     .counter_strategy(CounterStrategy::Frame)
///     .stagger(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.reveal_threshold, 0.25);
/// assert!(!config.stagger_enabled);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: BehaviorConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reveal_threshold(mut self, threshold: f64) -> Self {
        self.config.reveal_threshold = threshold;
        self
    }

    /// Bottom inset in pixels; negative values shrink the viewport.
    pub fn root_margin_px(mut self, px: i32) -> Self {
        self.config.root_margin_px = px;
        self
    }

    pub fn default_animation(mut self, kind: &str) -> Self {
        self.config.default_animation = kind.to_string();
        self
    }

    pub fn stagger(mut self, enabled: bool) -> Self {
        self.config.stagger_enabled = enabled;
        self
    }

    pub fn stagger_step_ms(mut self, step: u64) -> Self {
        self.config.stagger_step_ms = step;
        self
    }

    pub fn counter_strategy(mut self, strategy: CounterStrategy) -> Self {
        self.config.counter_strategy = strategy;
        self
    }

    pub fn counter_threshold(mut self, threshold: f64) -> Self {
        self.config.counter_threshold = threshold;
        self
    }

    pub fn counter_duration_ms(mut self, duration: u64) -> Self {
        self.config.counter_duration_ms = duration;
        self
    }

    pub fn skill_bar_threshold(mut self, threshold: f64) -> Self {
        self.config.skill_bar_threshold = threshold;
        self
    }

    pub fn filter_fade_ms(mut self, fade: u64) -> Self {
        self.config.filter_fade_ms = fade;
        self
    }

    /// Scroll offsets for hiding the header and for the `scrolled` flag.
    pub fn header_thresholds(mut self, hide_after: f64, scrolled_after: f64) -> Self {
        self.config.header_hide_after_px = hide_after;
        self.config.header_scrolled_after_px = scrolled_after;
        self
    }

    pub fn scroll_top_after_px(mut self, offset: f64) -> Self {
        self.config.scroll_top_after_px = offset;
        self
    }

    pub fn anchor_offset_px(mut self, offset: f64) -> Self {
        self.config.anchor_offset_px = offset;
        self
    }

    pub fn toast_lifetime_ms(mut self, lifetime: u64) -> Self {
        self.config.toast_lifetime_ms = lifetime;
        self
    }

    pub fn body_fade_delay_ms(mut self, delay: u64) -> Self {
        self.config.body_fade_delay_ms = delay;
        self
    }

    pub fn parallax_speed(mut self, speed: f64) -> Self {
        self.config.parallax_speed = speed;
        self
    }

    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.config.selectors = selectors;
        self
    }

    pub fn build(self) -> Result<BehaviorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_config_defaults() {
        let built = ConfigBuilder::new().build().unwrap();
        assert_eq!(built, BehaviorConfig::default());
    }

    #[test]
    fn builder_sets_every_timing_field() {
        let config = ConfigBuilder::new()
            .root_margin_px(-40)
            .default_animation("zoom-in")
            .stagger_step_ms(150)
            .counter_threshold(0.6)
            .counter_duration_ms(1200)
            .skill_bar_threshold(0.3)
            .filter_fade_ms(200)
            .header_thresholds(120.0, 60.0)
            .scroll_top_after_px(500.0)
            .anchor_offset_px(64.0)
            .toast_lifetime_ms(3000)
            .body_fade_delay_ms(0)
            .parallax_speed(0.3)
            .build()
            .unwrap();

        assert_eq!(config.root_margin_px, -40);
        assert_eq!(config.default_animation, "zoom-in");
        assert_eq!(config.stagger_step_ms, 150);
        assert_eq!(config.counter_threshold, 0.6);
        assert_eq!(config.counter_duration_ms, 1200);
        assert_eq!(config.skill_bar_threshold, 0.3);
        assert_eq!(config.filter_fade_ms, 200);
        assert_eq!(config.header_hide_after_px, 120.0);
        assert_eq!(config.header_scrolled_after_px, 60.0);
        assert_eq!(config.scroll_top_after_px, 500.0);
        assert_eq!(config.anchor_offset_px, 64.0);
        assert_eq!(config.toast_lifetime_ms, 3000);
        assert_eq!(config.body_fade_delay_ms, 0);
        assert_eq!(config.parallax_speed, 0.3);
    }

    #[test]
    fn builder_validates_thresholds() {
        let result = ConfigBuilder::new().reveal_threshold(-0.1).build();
        assert!(matches!(
            result,
            Err(ConfigError::ThresholdOutOfRange {
                field: "reveal_threshold",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_zero_counter_duration() {
        let result = ConfigBuilder::new().counter_duration_ms(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::ZeroDuration {
                field: "counter_duration_ms"
            })
        ));
    }

    #[test]
    fn builder_rejects_non_finite_offsets() {
        let result = ConfigBuilder::new().anchor_offset_px(f64::NAN).build();
        assert!(matches!(result, Err(ConfigError::NotFinite { .. })));
    }
}
