//! Lazy meme carousel: manifest fetch, WebP probing, click-to-save.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Request, RequestInit, Response,
    ScrollBehavior, ScrollToOptions, Window,
};

use super::dom::{by_id, trigger_download};
use crate::config::{GalleryConfig, SiteConfig};
use crate::gallery::{
    build_images, carousel_step, manifest_sources, GalleryImage, HeadCheck, ImageState, Loading,
    IMAGE_ALT, ITEM_CLASS, PLACEHOLDER_SRC,
};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct GalleryItem {
    element: HtmlImageElement,
    image: Rc<RefCell<GalleryImage>>,
}

pub struct Gallery {
    window: Window,
    document: Document,
    container: HtmlElement,
    prev: Option<HtmlElement>,
    next: Option<HtmlElement>,
    config: GalleryConfig,
    items: RefCell<Vec<GalleryItem>>,
    step: Cell<f64>,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
}

impl Gallery {
    /// Binds to `#memeGallery` and empties it. Population is a separate
    /// async step, see [`Gallery::populate`].
    pub fn new(window: &Window, document: &Document, config: &SiteConfig) -> Option<Rc<Self>> {
        let ids = &config.ids;
        let container = by_id::<HtmlElement>(document, &ids.gallery)?;
        container.set_inner_html("");
        Some(Rc::new(Self {
            window: window.clone(),
            document: document.clone(),
            container,
            prev: by_id::<HtmlElement>(document, &ids.gallery_prev),
            next: by_id::<HtmlElement>(document, &ids.gallery_next),
            config: config.gallery.clone(),
            items: RefCell::new(Vec::new()),
            step: Cell::new(config.gallery.fallback_step),
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        }))
    }

    /// Populates in the background.
    pub fn start(self: &Rc<Self>) {
        let gallery = self.clone();
        spawn_local(async move {
            if let Err(err) = gallery.populate().await {
                console::warn!("gallery: population failed", err);
            }
        });
    }

    pub async fn populate(self: &Rc<Self>) -> Result<(), JsValue> {
        let sources = self.fetch_sources().await;
        console::log!(format!("gallery: {} images", sources.len()));
        let images = build_images(&sources, &self.config);
        let observer = self.observer()?;

        for image in images {
            let loading = image.loading;
            let item = self.append_item(image)?;
            match (&observer, loading) {
                (Some(observer), Loading::Lazy) => observer.observe(&item.element),
                _ => self.resolve(&item),
            }
            self.items.borrow_mut().push(item);
        }

        self.recompute_step();
        self.bind_carousel();
        Ok(())
    }

    pub fn image_count(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn step(&self) -> f64 {
        self.step.get()
    }

    pub fn image_state(&self, index: usize) -> Option<ImageState> {
        Some(self.items.borrow().get(index)?.image.borrow().state().clone())
    }

    /// Download target for the image at `index`, if it has left the
    /// placeholder state.
    pub fn download_for(&self, index: usize) -> Option<(String, String)> {
        self.items.borrow().get(index)?.image.borrow().download()
    }

    async fn fetch_sources(&self) -> Vec<String> {
        let (status, body) = match fetch_text(&self.window, &self.config.manifest_url).await {
            Ok(response) => response,
            Err(err) => {
                console::log!("gallery: manifest unavailable", err);
                (0, None)
            }
        };
        if !(200..300).contains(&status) {
            console::log!("gallery: using fallback list");
        }
        manifest_sources(status, body.as_deref(), &self.config.fallback)
    }

    fn append_item(self: &Rc<Self>, image: GalleryImage) -> Result<GalleryItem, JsValue> {
        let wrapper = self.document.create_element("div")?;
        wrapper.set_class_name(ITEM_CLASS);
        let element = self
            .document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()?;
        element.set_src(PLACEHOLDER_SRC);
        element.set_attribute("fetchpriority", image.loading.fetch_priority())?;
        element.set_attribute("loading", image.loading.attr())?;
        element.set_decoding("async");
        element.set_draggable(false);
        element.set_alt(IMAGE_ALT);
        element.set_attribute("data-png", &image.paths.original)?;
        element.set_attribute("data-webp", &image.paths.webp)?;
        wrapper.append_child(&element)?;
        self.container.append_child(&wrapper)?;

        let image = Rc::new(RefCell::new(image));
        let mut listeners = self.listeners.borrow_mut();
        {
            let image = image.clone();
            listeners.push(EventListener::new(&element, "load", move |_| {
                image.borrow_mut().mark_loaded();
            }));
        }
        {
            let image = image.clone();
            let document = self.document.clone();
            listeners.push(EventListener::new(&element, "click", move |_| {
                let Some((href, filename)) = image.borrow().download() else {
                    return;
                };
                if let Err(err) = trigger_download(&document, &href, &filename) {
                    console::warn!("gallery: download failed", err);
                }
            }));
        }
        Ok(GalleryItem { element, image })
    }

    /// Checks for the WebP sibling, then swaps the placeholder for the
    /// chosen source.
    fn resolve(&self, item: &GalleryItem) {
        if !item.image.borrow_mut().observe() {
            return;
        }
        let window = self.window.clone();
        let element = item.element.clone();
        let image = item.image.clone();
        spawn_local(async move {
            let webp = image.borrow().paths.webp.clone();
            let check = head_check(&window, &webp).await;
            let src = image.borrow_mut().resolve(check);
            element.set_src(&src);
        });
    }

    fn observer(self: &Rc<Self>) -> Result<Option<IntersectionObserver>, JsValue> {
        let constructor = Reflect::get(&self.window, &JsValue::from_str("IntersectionObserver"))?;
        if constructor.is_undefined() || constructor.is_null() {
            return Ok(None);
        }
        let gallery: Weak<Self> = Rc::downgrade(self);
        let callback: ObserverCallback = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                let Some(gallery) = gallery.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target: Element = entry.target();
                    observer.unobserve(&target);
                    let items = gallery.items.borrow();
                    if let Some(item) = items
                        .iter()
                        .find(|item| item.element.is_same_node(Some(target.as_ref())))
                    {
                        gallery.resolve(item);
                    }
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&self.config.root_margin);
        options.set_threshold(&JsValue::from_f64(self.config.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        *self.observer.borrow_mut() = Some((observer.clone(), callback));
        Ok(Some(observer))
    }

    fn recompute_step(&self) {
        let first_width = self
            .container
            .query_selector(&format!(".{ITEM_CLASS}"))
            .ok()
            .flatten()
            .map(|item| item.get_bounding_client_rect().width());
        let gap = self.gap();
        self.step.set(carousel_step(first_width, &gap, &self.config));
    }

    fn gap(&self) -> String {
        let Ok(Some(style)) = self.window.get_computed_style(&self.container) else {
            return String::new();
        };
        let column_gap = style.get_property_value("column-gap").unwrap_or_default();
        if !column_gap.is_empty() {
            return column_gap;
        }
        style.get_property_value("gap").unwrap_or_default()
    }

    fn scroll_by_step(&self, direction: f64) {
        let options = ScrollToOptions::new();
        options.set_left(direction * self.step.get());
        options.set_behavior(ScrollBehavior::Smooth);
        self.container.scroll_by_with_scroll_to_options(&options);
    }

    fn bind_carousel(self: &Rc<Self>) {
        let mut listeners = self.listeners.borrow_mut();
        {
            let gallery = Rc::downgrade(self);
            listeners.push(EventListener::new(&self.window, "resize", move |_| {
                if let Some(gallery) = gallery.upgrade() {
                    gallery.recompute_step();
                }
            }));
        }
        for (button, direction) in [(&self.prev, -1.0), (&self.next, 1.0)] {
            let Some(button) = button else {
                continue;
            };
            let gallery = Rc::downgrade(self);
            listeners.push(EventListener::new(button, "click", move |_| {
                if let Some(gallery) = gallery.upgrade() {
                    gallery.scroll_by_step(direction);
                }
            }));
        }
    }
}

async fn fetch_text(window: &Window, url: &str) -> Result<(u16, Option<String>), JsValue> {
    let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    let status = response.status();
    if !response.ok() {
        return Ok((status, None));
    }
    let body = JsFuture::from(response.text()?).await?;
    Ok((status, body.as_string()))
}

/// HEAD request; any transport error counts as a failed check.
async fn head_check(window: &Window, url: &str) -> HeadCheck {
    let init = RequestInit::new();
    init.set_method("HEAD");
    let Ok(request) = Request::new_with_str_and_init(url, &init) else {
        return HeadCheck::Failed;
    };
    match JsFuture::from(window.fetch_with_request(&request)).await {
        Ok(value) => match value.dyn_into::<Response>() {
            Ok(response) => HeadCheck::from_status(response.status()),
            Err(_) => HeadCheck::Failed,
        },
        Err(_) => HeadCheck::Failed,
    }
}
