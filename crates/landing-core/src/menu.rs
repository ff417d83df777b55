#![forbid(unsafe_code)]

//! Hamburger navigation menu with ARIA state sync.

/// Attribute/class state the host mirrors onto the button and the nav.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuAttributes {
    /// `open` class on the nav.
    pub open: bool,
    /// `aria-expanded` on the toggle button.
    pub aria_expanded: bool,
    /// `aria-hidden` on the nav.
    pub aria_hidden: bool,
}

/// Open/closed state of the navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn attributes(&self) -> MenuAttributes {
        MenuAttributes {
            open: self.open,
            aria_expanded: self.open,
            aria_hidden: !self.open,
        }
    }

    /// Toggle button click.
    pub fn toggle(&mut self) -> MenuAttributes {
        self.open = !self.open;
        tracing::trace!(open = self.open, "menu toggled");
        self.attributes()
    }

    /// Document click. Closes the menu when the click landed outside both the
    /// nav and the toggle button; returns the new state only if it changed.
    pub fn document_click(&mut self, inside_menu: bool) -> Option<MenuAttributes> {
        if !self.open || inside_menu {
            return None;
        }
        self.close()
    }

    /// A navigation link was followed.
    pub fn link_clicked(&mut self) -> Option<MenuAttributes> {
        self.close()
    }

    /// Close the menu; returns the new state only if it was open.
    pub fn close(&mut self) -> Option<MenuAttributes> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(self.attributes())
    }
}
