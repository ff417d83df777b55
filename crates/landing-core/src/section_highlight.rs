#![forbid(unsafe_code)]

//! Current-section highlighting for the navigation links.
//!
//! A section becomes current when it enters a detection band in the middle of
//! the viewport. Unlike reveal, this is continuous: scrolling back re-triggers
//! earlier sections.

use crate::config::SectionBandConfig;

/// Viewport band, expressed as fractions trimmed from the top and bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionBand {
    pub top_inset: f64,
    pub bottom_inset: f64,
}

impl From<&SectionBandConfig> for DetectionBand {
    fn from(config: &SectionBandConfig) -> Self {
        Self {
            top_inset: config.top_inset,
            bottom_inset: config.bottom_inset,
        }
    }
}

impl Default for DetectionBand {
    fn default() -> Self {
        Self::from(&SectionBandConfig::default())
    }
}

impl DetectionBand {
    /// `rootMargin` for an `IntersectionObserver` rooted at the viewport.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            self.top_inset * 100.0,
            self.bottom_inset * 100.0
        )
    }
}

/// One intersection report for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEntry {
    pub section: usize,
    pub is_intersecting: bool,
}

/// Maps sections to their nav links and tracks the highlighted link.
#[derive(Debug, Clone)]
pub struct SectionHighlighter {
    link_for_section: Vec<Option<usize>>,
    active_link: Option<usize>,
}

impl SectionHighlighter {
    /// `link_for_section[i]` is the nav link pointing at section `i`, if any.
    #[must_use]
    pub fn new(link_for_section: Vec<Option<usize>>) -> Self {
        Self {
            link_for_section,
            active_link: None,
        }
    }

    #[must_use]
    pub const fn active_link(&self) -> Option<usize> {
        self.active_link
    }

    /// Process a batch of reports.
    ///
    /// Every intersecting entry clears all highlights and then highlights the
    /// link of its own section (a section without a link leaves none lit).
    /// Returns the resulting highlight when at least one entry intersected,
    /// `None` when the batch changes nothing.
    pub fn observe(&mut self, entries: &[SectionEntry]) -> Option<Option<usize>> {
        let mut touched = false;
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            touched = true;
            self.active_link = self
                .link_for_section
                .get(entry.section)
                .copied()
                .flatten();
        }
        touched.then_some(self.active_link)
    }
}
