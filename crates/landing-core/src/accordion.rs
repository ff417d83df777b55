#![forbid(unsafe_code)]

//! Mutually exclusive FAQ accordion: opening one item closes its siblings.

#[derive(Debug, Clone)]
pub struct Accordion {
    open: Vec<bool>,
}

impl Accordion {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            open: vec![false; count],
        }
    }

    /// Start from the items' current open state, as shipped in the markup.
    #[must_use]
    pub fn from_open(open: Vec<bool>) -> Self {
        Self { open }
    }

    #[must_use]
    pub fn is_open(&self, item: usize) -> bool {
        self.open.get(item).copied().unwrap_or(false)
    }

    /// Currently open item, if any.
    #[must_use]
    pub fn open_item(&self) -> Option<usize> {
        self.open.iter().position(|open| *open)
    }

    /// Item `item` reported a toggle to `open`.
    ///
    /// Returns the siblings the host must close. Closing an item never
    /// affects the others.
    pub fn toggled(&mut self, item: usize, open: bool) -> Vec<usize> {
        let Some(slot) = self.open.get_mut(item) else {
            return Vec::new();
        };
        *slot = open;
        if !open {
            return Vec::new();
        }
        let mut close = Vec::new();
        for (index, state) in self.open.iter_mut().enumerate() {
            if index != item && *state {
                *state = false;
                close.push(index);
            }
        }
        close
    }
}
