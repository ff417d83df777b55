#![forbid(unsafe_code)]

//! Page configuration as data.
//!
//! Every tunable the page's behaviors use lives in one [`LandingConfig`] that
//! the host can supply as JSON. Missing sections and fields fall back to the
//! values the page ships with, so `LandingConfig::default()` reproduces the
//! stock behavior exactly.
//!
//! ```
//! use landing_core::config::LandingConfig;
//!
//! let config = LandingConfig::from_json_str(r#"{ "carousel": { "autoplay_interval_ms": 5000 } }"#)
//!     .unwrap();
//! assert_eq!(config.carousel.autoplay_interval_ms, 5000);
//! assert_eq!(config.carousel.swipe_threshold_px, 50.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default autoplay period of the carousel.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 3200;

/// Longest autoplay interval a browser timer can hold (`2^31 - 1` ms).
pub const MAX_AUTOPLAY_INTERVAL_MS: u64 = i32::MAX as u64;
/// Horizontal travel a swipe must exceed before it changes slides.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;
/// Storage key of the persisted theme preference.
pub const DEFAULT_THEME_STORAGE_KEY: &str = "winglish-theme";

/// Errors raised while loading or validating a [`LandingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document did not parse or did not match the schema.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// One or more values are out of range.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Top-level configuration for every page behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub carousel: CarouselConfig,
    pub theme: ThemeConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub sections: SectionBandConfig,
    pub sticky_cta: StickyCtaConfig,
    pub quiz: QuizConfig,
    /// `tracing` level filter used by the web adapter (`error` .. `trace`).
    pub log_level: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            sections: SectionBandConfig::default(),
            sticky_cta: StickyCtaConfig::default(),
            quiz: QuizConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl LandingConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate all values are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.carousel.autoplay_interval_ms == 0 {
            errors.push("carousel.autoplay_interval_ms must be > 0".into());
        } else if self.carousel.autoplay_interval_ms > MAX_AUTOPLAY_INTERVAL_MS {
            errors.push(format!(
                "carousel.autoplay_interval_ms must be <= {MAX_AUTOPLAY_INTERVAL_MS}, got {}",
                self.carousel.autoplay_interval_ms
            ));
        }
        if !self.carousel.swipe_threshold_px.is_finite() || self.carousel.swipe_threshold_px < 0.0
        {
            errors.push(format!(
                "carousel.swipe_threshold_px must be a finite value >= 0, got {}",
                self.carousel.swipe_threshold_px
            ));
        }
        if self.theme.storage_key.trim().is_empty() {
            errors.push("theme.storage_key must not be empty".into());
        }
        for (name, value) in [
            ("scroll.header_threshold_px", self.scroll.header_threshold_px),
            (
                "scroll.back_to_top_threshold_px",
                self.scroll.back_to_top_threshold_px,
            ),
            ("sticky_cta.bottom_inset_px", self.sticky_cta.bottom_inset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a finite value >= 0, got {value}"));
            }
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            errors.push(format!(
                "reveal.threshold must be in [0, 1], got {}",
                self.reveal.threshold
            ));
        }
        let band = &self.sections;
        if !(0.0..1.0).contains(&band.top_inset) || !(0.0..1.0).contains(&band.bottom_inset) {
            errors.push(format!(
                "sections insets must be in [0, 1), got top={} bottom={}",
                band.top_inset, band.bottom_inset
            ));
        } else if band.top_inset + band.bottom_inset >= 1.0 {
            errors.push(format!(
                "sections insets must leave a non-empty band, got top={} bottom={}",
                band.top_inset, band.bottom_inset
            ));
        }
        if parse_level(&self.log_level).is_none() {
            errors.push(format!(
                "log_level must be one of error, warn, info, debug, trace; got {:?}",
                self.log_level
            ));
        }

        errors
    }

    /// Resolved `tracing` level; unknown strings fall back to `INFO`.
    #[must_use]
    pub fn tracing_level(&self) -> tracing::Level {
        parse_level(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}

fn parse_level(level: &str) -> Option<tracing::Level> {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

/// Carousel timing, swipe and accessibility parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Autoplay period in milliseconds.
    pub autoplay_interval_ms: u64,
    /// Net horizontal travel a swipe must exceed to change slides.
    pub swipe_threshold_px: f64,
    /// Pause-control label shown while paused (describes the play action).
    pub play_label: String,
    /// Pause-control label shown while playing (describes the stop action).
    pub stop_label: String,
}

impl CarouselConfig {
    #[must_use]
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            play_label: "スライドショーを再生".to_owned(),
            stop_label: "スライドショーを停止".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_THEME_STORAGE_KEY.to_owned(),
        }
    }
}

/// Scroll offsets (CSS px) that switch the header and back-to-top chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub header_threshold_px: f64,
    pub back_to_top_threshold_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold_px: 50.0,
            back_to_top_threshold_px: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction of an element that triggers its reveal.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.12 }
    }
}

/// Viewport band used to decide which section is current.
///
/// Insets are fractions of the viewport height trimmed from the top and the
/// bottom; the defaults leave the centered half of the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionBandConfig {
    pub top_inset: f64,
    pub bottom_inset: f64,
}

impl Default for SectionBandConfig {
    fn default() -> Self {
        Self {
            top_inset: 0.25,
            bottom_inset: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyCtaConfig {
    /// The hero counts as out of view once it is this far above the viewport bottom.
    pub bottom_inset_px: f64,
}

impl Default for StickyCtaConfig {
    fn default() -> Self {
        Self {
            bottom_inset_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub correct_message: String,
    pub wrong_message: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            correct_message: "✅ 正解！ (be destined to 〜: 〜する運命だ)".to_owned(),
            wrong_message: "❌ 不正解...".to_owned(),
        }
    }
}
