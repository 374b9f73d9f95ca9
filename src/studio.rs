//! Which meme tool is showing on the generator page.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Banner,
    Layers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    pub banner_hidden: bool,
    pub layers_hidden: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PanelSwitcher {
    active: Option<Panel>,
}

impl PanelSwitcher {
    pub fn active(&self) -> Option<Panel> {
        self.active
    }

    /// Returns the visibility to apply, or `None` when `panel` is already
    /// showing.
    pub fn select(&mut self, panel: Panel) -> Option<Visibility> {
        if self.active == Some(panel) {
            return None;
        }
        self.active = Some(panel);
        Some(Visibility {
            banner_hidden: panel != Panel::Banner,
            layers_hidden: panel != Panel::Layers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_shows_exactly_one_panel() {
        let mut switcher = PanelSwitcher::default();
        assert_eq!(switcher.active(), None);
        assert_eq!(
            switcher.select(Panel::Layers),
            Some(Visibility {
                banner_hidden: true,
                layers_hidden: false
            })
        );
        assert_eq!(
            switcher.select(Panel::Banner),
            Some(Visibility {
                banner_hidden: false,
                layers_hidden: true
            })
        );
        assert_eq!(switcher.active(), Some(Panel::Banner));
    }

    #[test]
    fn reselecting_is_a_no_op() {
        let mut switcher = PanelSwitcher::default();
        assert!(switcher.select(Panel::Banner).is_some());
        assert_eq!(switcher.select(Panel::Banner), None);
    }
}
