#![forbid(unsafe_code)]

//! Sticky call-to-action footer: shown while the hero is out of view.

use crate::config::StickyCtaConfig;

#[derive(Debug, Clone)]
pub struct StickyCta {
    bottom_inset_px: f64,
    visible: bool,
}

impl StickyCta {
    #[must_use]
    pub fn new(config: &StickyCtaConfig) -> Self {
        Self {
            bottom_inset_px: config.bottom_inset_px,
            visible: false,
        }
    }

    /// `rootMargin` for the hero observer.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_inset_px)
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hero intersection changed; returns the footer's visibility.
    pub fn hero_intersecting(&mut self, intersecting: bool) -> bool {
        self.visible = !intersecting;
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_tracks_hero_visibility() {
        let mut cta = StickyCta::new(&StickyCtaConfig::default());
        assert!(!cta.is_visible());
        assert!(cta.hero_intersecting(false));
        assert!(!cta.hero_intersecting(true));
    }

    #[test]
    fn root_margin_uses_bottom_inset() {
        let cta = StickyCta::new(&StickyCtaConfig::default());
        assert_eq!(cta.root_margin(), "0px 0px -100px 0px");
    }
}
