//! Interactive widgets for the Zilla fan site.
//!
//! The drawing and state logic is target independent and unit tested on
//! the host; the `wasm` module binds it to the page.

pub mod banner;
pub mod config;
pub mod donut;
pub mod draw;
pub mod gallery;
pub mod layers;
pub mod nav;
pub mod studio;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    mod chrome;
    mod dom;
    mod donut;
    mod gallery;
    mod site;
    mod studio;

    pub use chrome::{AnchorScroll, CopyButton, MobileMenu};
    pub use dom::decode_file;
    pub use donut::render as render_donut;
    pub use gallery::Gallery;
    pub use site::Site;
    pub use studio::{BannerWidget, LayersWidget, StudioSwitcher};

    use crate::config::SiteConfig;

    thread_local! {
        static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let site = Site::install(&window, &document, &SiteConfig::default());
        SITE.with(|slot| *slot.borrow_mut() = Some(site));
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
