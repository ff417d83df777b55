#![forbid(unsafe_code)]

//! Dot indicator strip: one dot per slide, exactly one of them active.
//!
//! The strip is built lazily by the carousel: only when a surface is supplied
//! and there is at least one slide. Dot `i` always targets slide `i`.

/// Rendering surface for the indicator strip.
pub trait IndicatorSurface {
    /// Append dot `index` in its initial state.
    fn create_dot(&mut self, index: usize, active: bool);

    /// Flip the active marker of an existing dot.
    fn set_dot_active(&mut self, index: usize, active: bool);
}

/// Indicator state mirrored onto an [`IndicatorSurface`].
pub struct DotIndicator {
    surface: Box<dyn IndicatorSurface>,
    count: usize,
    active: usize,
}

impl std::fmt::Debug for DotIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotIndicator")
            .field("count", &self.count)
            .field("active", &self.active)
            .finish()
    }
}

impl DotIndicator {
    /// Create `count` dots on `surface` with dot 0 active.
    ///
    /// Returns `None` for an empty strip; nothing is rendered in that case.
    pub fn render(mut surface: Box<dyn IndicatorSurface>, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        for index in 0..count {
            surface.create_dot(index, index == 0);
        }
        Some(Self {
            surface,
            count,
            active: 0,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Index of the active dot.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    #[must_use]
    pub const fn is_active(&self, index: usize) -> bool {
        index == self.active
    }

    /// Slide targeted by dot `dot`, if such a dot exists.
    #[must_use]
    pub const fn target(&self, dot: usize) -> Option<usize> {
        if dot < self.count { Some(dot) } else { None }
    }

    /// Mark `index` active and clear the previous dot. Out-of-range indices
    /// are ignored.
    pub fn activate(&mut self, index: usize) {
        if index >= self.count || index == self.active {
            return;
        }
        self.surface.set_dot_active(self.active, false);
        self.surface.set_dot_active(index, true);
        self.active = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        dots: Vec<bool>,
        writes: usize,
    }

    struct Surface(Rc<RefCell<Recorded>>);

    impl IndicatorSurface for Surface {
        fn create_dot(&mut self, index: usize, active: bool) {
            let mut rec = self.0.borrow_mut();
            assert_eq!(rec.dots.len(), index, "dots must be created in order");
            rec.dots.push(active);
        }

        fn set_dot_active(&mut self, index: usize, active: bool) {
            let mut rec = self.0.borrow_mut();
            rec.dots[index] = active;
            rec.writes += 1;
        }
    }

    fn strip(count: usize) -> (Option<DotIndicator>, Rc<RefCell<Recorded>>) {
        let rec = Rc::new(RefCell::new(Recorded::default()));
        let dots = DotIndicator::render(Box::new(Surface(Rc::clone(&rec))), count);
        (dots, rec)
    }

    #[test]
    fn render_creates_one_dot_per_slide_with_first_active() {
        let (dots, rec) = strip(4);
        let dots = dots.unwrap();
        assert_eq!(dots.len(), 4);
        assert_eq!(rec.borrow().dots, vec![true, false, false, false]);
    }

    #[test]
    fn empty_strip_renders_nothing() {
        let (dots, rec) = strip(0);
        assert!(dots.is_none());
        assert!(rec.borrow().dots.is_empty());
    }

    #[test]
    fn activate_moves_the_single_active_marker() {
        let (dots, rec) = strip(3);
        let mut dots = dots.unwrap();
        dots.activate(2);
        assert_eq!(rec.borrow().dots, vec![false, false, true]);
        assert!(dots.is_active(2));
        assert_eq!(rec.borrow().writes, 2);
    }

    #[test]
    fn reactivating_current_dot_writes_nothing() {
        let (dots, rec) = strip(3);
        let mut dots = dots.unwrap();
        dots.activate(0);
        dots.activate(7);
        assert_eq!(rec.borrow().writes, 0);
        assert_eq!(dots.target(7), None);
        assert_eq!(dots.target(1), Some(1));
    }
}
