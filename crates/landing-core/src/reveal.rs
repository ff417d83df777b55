#![forbid(unsafe_code)]

//! One-shot reveal-on-scroll bookkeeping.
//!
//! Elements are registered by index. The first intersection report at or
//! above the threshold reveals an element and stops observing it; later
//! reports for that element are ignored.

/// One intersection report from the viewport observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealEntry {
    pub element: usize,
    pub is_intersecting: bool,
    pub ratio: f64,
}

const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    revealed: Vec<bool>,
}

impl RevealTracker {
    /// Track `count` elements that reveal once `threshold` of them is visible.
    #[must_use]
    pub fn new(count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            revealed: vec![false; count],
        }
    }

    #[must_use]
    pub fn is_revealed(&self, element: usize) -> bool {
        self.revealed.get(element).copied().unwrap_or(false)
    }

    /// Elements still waiting for their reveal.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|revealed| !**revealed).count()
    }

    /// Process a batch of reports. Returns the elements revealed by this
    /// batch, in report order; the host adds `is-visible` and unobserves them.
    pub fn observe(&mut self, entries: &[RevealEntry]) -> Vec<usize> {
        let mut newly = Vec::new();
        for entry in entries {
            // Observers report ratios with float rounding right at the threshold.
            if !entry.is_intersecting || entry.ratio + RATIO_TOLERANCE < self.threshold {
                continue;
            }
            let Some(slot) = self.revealed.get_mut(entry.element) else {
                continue;
            };
            if !*slot {
                *slot = true;
                newly.push(entry.element);
            }
        }
        if !newly.is_empty() {
            tracing::trace!(count = newly.len(), "elements revealed");
        }
        newly
    }
}
