use std::rc::Rc;

use gloo::console;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use super::chrome::{AnchorScroll, CopyButton, MobileMenu};
use super::donut;
use super::gallery::Gallery;
use super::studio::{BannerWidget, LayersWidget, StudioSwitcher};
use crate::config::SiteConfig;
use crate::donut::ENTRIES;

/// Every widget found on the current page. Dropping it detaches all
/// listeners.
pub struct Site {
    _anchors: Option<AnchorScroll>,
    _copy: Option<CopyButton>,
    _banner: Option<BannerWidget>,
    _layers: Option<LayersWidget>,
    _studio: Option<StudioSwitcher>,
    _menu: Option<MobileMenu>,
    _gallery: Option<Rc<Gallery>>,
}

impl Site {
    /// Installs each widget whose elements are present. A widget that fails
    /// to install is logged and skipped.
    pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Self {
        guarded("donut", donut::render(document, config, ENTRIES).map(Some));
        let gallery = Gallery::new(window, document, config);
        if let Some(gallery) = &gallery {
            gallery.start();
        }
        Self {
            _anchors: guarded("anchors", AnchorScroll::install(document).map(Some)),
            _copy: CopyButton::install(window, document, config),
            _banner: guarded("banner", BannerWidget::install(document, config)),
            _layers: guarded("layers", LayersWidget::install(document, config)),
            _studio: StudioSwitcher::install(document, config),
            _menu: guarded("menu", MobileMenu::install(document, config)),
            _gallery: gallery,
        }
    }
}

fn guarded<T>(name: &str, installed: Result<Option<T>, JsValue>) -> Option<T> {
    match installed {
        Ok(widget) => widget,
        Err(err) => {
            console::warn!(format!("{name}: install failed"), err);
            None
        }
    }
}
