//! Page chrome: in-page anchor scrolling and the mobile menu.

/// Selector to scroll to for an anchor href; bare `#` and empty hrefs
/// keep their default behavior.
pub fn anchor_target(href: &str) -> Option<&str> {
    if href.is_empty() || href == "#" || !href.starts_with('#') {
        None
    } else {
        Some(href)
    }
}

pub const MENU_OPEN_CLASS: &str = "open";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    /// State matching markup that may already render the menu open.
    pub fn from_open(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#about"), Some("#about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target(""), None);
        assert_eq!(anchor_target("/page#x"), None);
    }

    #[test]
    fn menu_toggle_and_close() {
        let mut menu = MenuState::default();
        assert_eq!(menu.aria_expanded(), "false");
        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        menu.close();
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(!menu.toggle());
    }

    #[test]
    fn menu_rendered_open_closes_on_first_toggle() {
        let mut menu = MenuState::from_open(true);
        assert_eq!(menu.aria_expanded(), "true");
        assert!(!menu.toggle());
        assert_eq!(menu.aria_expanded(), "false");
    }
}
