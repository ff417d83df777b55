#![forbid(unsafe_code)]

//! Page contract: element ids, selectors, class names and inline style values.
//!
//! Everything here is plain data so the mapping can be tested off-browser.

use std::time::Duration;

use landing_core::config::MAX_AUTOPLAY_INTERVAL_MS;
use landing_core::quiz::Verdict;

/// `<script type="application/json">` block holding the page configuration.
pub const CONFIG_SCRIPT_ID: &str = "landingConfig";

/// Media query used when no theme has been stored.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Attribute on `<body>` carrying the active theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

pub mod ids {
    pub const MENU_BUTTON: &str = "menuBtn";
    pub const NAV: &str = "globalNav";
    pub const SLIDER: &str = "slider";
    pub const SLIDES: &str = "slides";
    pub const DOTS: &str = "dots";
    pub const SLIDER_TOGGLE: &str = "sliderToggleBtn";
    pub const THEME_TOGGLE: &str = "themeToggleBtn";
    pub const PAGE_TOP: &str = "pageTopBtn";
    pub const PROGRESS_BAR: &str = "progressBar";
    pub const QUIZ: &str = "interactiveDemo";
    pub const QUIZ_RESULT: &str = "demoResult";
    pub const STICKY_FOOTER: &str = "stickyFooter";
    pub const HERO: &str = "hero";
}

pub mod selectors {
    pub const HEADER: &str = ".site-header";
    pub const REVEAL: &str = ".reveal";
    pub const NAV_LINKS: &str = "#globalNav a";
    pub const SECTIONS: &str = "main section[id]";
    pub const FAQ: &str = ".faq";
    pub const QUIZ_OPTIONS: &str = ".demo-options button";
}

pub mod classes {
    pub const OPEN: &str = "open";
    pub const PAUSED: &str = "is-paused";
    pub const SWIPING: &str = "is-swiping";
    pub const DOT: &str = "dot";
    pub const ACTIVE: &str = "active";
    pub const SCROLLED: &str = "is-scrolled";
    pub const VISIBLE: &str = "is-visible";
    pub const NAV_ACTIVE: &str = "nav-active";
    pub const CORRECT: &str = "correct";
}

/// Inline `transform` for a slide strip offset.
#[must_use]
pub fn translate_x(percent: f64) -> String {
    format!("translateX({percent}%)")
}

/// Inline `width` for the progress bar.
#[must_use]
pub fn width_percent(percent: f64) -> String {
    format!("{percent}%")
}

/// `setInterval` delay for `interval`, in `[1, 2^31 - 1]` ms. Browsers run
/// longer delays almost immediately.
#[must_use]
pub fn interval_delay_ms(interval: Duration) -> u32 {
    let max = MAX_AUTOPLAY_INTERVAL_MS as u32;
    u32::try_from(interval.as_millis()).map_or(max, |millis| millis.clamp(1, max))
}

#[must_use]
pub const fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Class list for the dot at creation time.
#[must_use]
pub const fn dot_class(active: bool) -> &'static str {
    if active { "dot active" } else { classes::DOT }
}

/// Full class attribute of the quiz result box.
#[must_use]
pub fn quiz_result_class(verdict: Verdict) -> String {
    format!("demo-result {}", verdict.class())
}

/// For every section id, the index of the first nav link whose `href` is
/// exactly `#id`.
#[must_use]
pub fn link_for_sections(section_ids: &[String], link_hrefs: &[Option<String>]) -> Vec<Option<usize>> {
    section_ids
        .iter()
        .map(|id| {
            let anchor = format!("#{id}");
            link_hrefs
                .iter()
                .position(|href| href.as_deref() == Some(anchor.as_str()))
        })
        .collect()
}
