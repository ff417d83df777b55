#![forbid(unsafe_code)]

//! Scroll-driven page chrome: compact header, back-to-top button and the
//! reading-progress bar.

use crate::config::ScrollConfig;

/// Document scroll geometry sampled on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// `window.scrollY`.
    pub scroll_y: f64,
    /// `documentElement.scrollHeight`.
    pub scroll_height: f64,
    /// `documentElement.clientHeight`.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Scrolled fraction of the scrollable range as a percentage in `[0, 100]`.
    ///
    /// A document that does not scroll reports `0`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let range = self.scroll_height - self.client_height;
        if !range.is_finite() || range <= 0.0 || !self.scroll_y.is_finite() {
            return 0.0;
        }
        (self.scroll_y / range * 100.0).clamp(0.0, 100.0)
    }
}

/// Chrome state derived from one [`ScrollMetrics`] sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeState {
    /// `is-scrolled` on the site header.
    pub header_scrolled: bool,
    /// `is-visible` on the back-to-top button.
    pub back_to_top_visible: bool,
    /// Inline width of the progress bar, in percent.
    pub progress_percent: f64,
}

#[derive(Debug, Clone)]
pub struct ScrollChrome {
    config: ScrollConfig,
}

impl ScrollChrome {
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self { config }
    }

    /// Compute the chrome for `metrics`.
    ///
    /// Both thresholds are strict: exactly 50 px keeps the header expanded.
    #[must_use]
    pub fn update(&self, metrics: ScrollMetrics) -> ChromeState {
        ChromeState {
            header_scrolled: metrics.scroll_y > self.config.header_threshold_px,
            back_to_top_visible: metrics.scroll_y > self.config.back_to_top_threshold_px,
            progress_percent: metrics.progress_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn at(scroll_y: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y,
            scroll_height: 2_000.0,
            client_height: 1_000.0,
        }
    }

    #[test]
    fn thresholds_are_strict() {
        let chrome = ScrollChrome::new(ScrollConfig::default());
        let top = chrome.update(at(50.0));
        assert!(!top.header_scrolled);
        assert!(!top.back_to_top_visible);

        let scrolled = chrome.update(at(51.0));
        assert!(scrolled.header_scrolled);
        assert!(!scrolled.back_to_top_visible);

        assert!(!chrome.update(at(400.0)).back_to_top_visible);
        assert!(chrome.update(at(401.0)).back_to_top_visible);
    }

    #[test]
    fn progress_is_fraction_of_scrollable_range() {
        assert_eq!(at(0.0).progress_percent(), 0.0);
        assert_eq!(at(250.0).progress_percent(), 25.0);
        assert_eq!(at(1_000.0).progress_percent(), 100.0);
    }

    #[test]
    fn progress_is_clamped_and_guarded() {
        assert_eq!(at(1_200.0).progress_percent(), 100.0);
        assert_eq!(at(-30.0).progress_percent(), 0.0);
        let short = ScrollMetrics {
            scroll_y: 0.0,
            scroll_height: 800.0,
            client_height: 800.0,
        };
        assert_eq!(short.progress_percent(), 0.0);
    }
}
