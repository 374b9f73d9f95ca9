//! Meme generator page: banner maker, layer builder and the tool picker.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, HtmlInputElement};

use super::dom::{
    by_id, decode_file, elements, first_file, smooth_scroll_into_view, trigger_download,
    CanvasSurface,
};
use crate::banner::Banner;
use crate::config::SiteConfig;
use crate::layers::{parse_slot, slots_needed, LayerStack};
use crate::studio::{Panel, PanelSwitcher};

pub struct BannerWidget {
    banner: Rc<RefCell<Banner<HtmlImageElement>>>,
    _listeners: Vec<EventListener>,
}

impl BannerWidget {
    pub fn install(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        let ids = &config.ids;
        let Some(canvas) = by_id::<HtmlCanvasElement>(document, &ids.banner_canvas) else {
            return Ok(None);
        };
        let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas)?));
        let banner = Rc::new(RefCell::new(Banner::<HtmlImageElement>::default()));
        let redraw: Rc<dyn Fn()> = {
            let surface = surface.clone();
            let banner = banner.clone();
            Rc::new(move || banner.borrow().render(&mut *surface.borrow_mut()))
        };
        let mut listeners = Vec::new();

        if let Some(input) = by_id::<HtmlInputElement>(document, &ids.banner_background) {
            let banner = banner.clone();
            let redraw = redraw.clone();
            let field = input.clone();
            listeners.push(EventListener::new(&input, "input", move |_| {
                banner.borrow_mut().set_background(&field.value());
                redraw();
            }));
        }

        if let Some(input) = by_id::<HtmlInputElement>(document, &ids.banner_headline) {
            let banner = banner.clone();
            let redraw = redraw.clone();
            let field = input.clone();
            listeners.push(EventListener::new(&input, "input", move |_| {
                banner.borrow_mut().set_headline(&field.value());
                redraw();
            }));
        }

        if let Some(input) = by_id::<HtmlInputElement>(document, &ids.banner_image) {
            let banner = banner.clone();
            let redraw = redraw.clone();
            let field = input.clone();
            listeners.push(EventListener::new(&input, "change", move |_| {
                let Some(file) = first_file(&field) else {
                    return;
                };
                let ticket = banner.borrow_mut().begin_upload();
                let banner = banner.clone();
                let redraw = redraw.clone();
                spawn_local(async move {
                    match decode_file(&file).await {
                        Ok(image) => {
                            if banner.borrow_mut().finish_upload(ticket, image) {
                                redraw();
                            }
                        }
                        Err(err) => console::warn!("banner: image upload failed", err),
                    }
                });
            }));
        }

        if let Some(button) = by_id::<HtmlElement>(document, &ids.banner_export) {
            listeners.push(export_listener(
                document,
                &button,
                surface.clone(),
                config.banner_filename.clone(),
            ));
        }

        redraw();
        Ok(Some(Self {
            banner,
            _listeners: listeners,
        }))
    }

    pub fn headline(&self) -> String {
        self.banner.borrow().headline().to_string()
    }

    pub fn background(&self) -> String {
        self.banner.borrow().background().to_string()
    }
}

pub struct LayersWidget {
    stack: Rc<RefCell<LayerStack<HtmlImageElement>>>,
    _listeners: Vec<EventListener>,
}

impl LayersWidget {
    pub fn install(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        let ids = &config.ids;
        let Some(canvas) = by_id::<HtmlCanvasElement>(document, &ids.layers_canvas) else {
            return Ok(None);
        };
        let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas)?));
        let inputs: Vec<(HtmlInputElement, String)> =
            elements(document.query_selector_all(&format!("input[{}]", ids.layer_slot_attr))?)
                .into_iter()
                .filter_map(|element| {
                    let slot = element.get_attribute(&ids.layer_slot_attr)?;
                    let input = element.dyn_into::<HtmlInputElement>().ok()?;
                    Some((input, slot))
                })
                .collect();
        let slots = slots_needed(inputs.iter().map(|(_, slot)| slot.as_str()));
        let stack = Rc::new(RefCell::new(LayerStack::<HtmlImageElement>::with_slots(slots)));
        let redraw: Rc<dyn Fn()> = {
            let surface = surface.clone();
            let stack = stack.clone();
            Rc::new(move || stack.borrow().render(&mut *surface.borrow_mut()))
        };

        let mut listeners = Vec::new();
        for (input, raw_slot) in inputs {
            let slot = match parse_slot(&raw_slot) {
                Ok(slot) => slot,
                Err(err) => {
                    console::warn!("layers: skipping input", err.to_string());
                    continue;
                }
            };
            let stack = stack.clone();
            let redraw = redraw.clone();
            let field = input.clone();
            listeners.push(EventListener::new(&input, "change", move |_| {
                let Some(file) = first_file(&field) else {
                    return;
                };
                let ticket = match stack.borrow_mut().begin_upload(slot) {
                    Ok(ticket) => ticket,
                    Err(err) => {
                        console::warn!("layers: upload dropped", err.to_string());
                        return;
                    }
                };
                let stack = stack.clone();
                let redraw = redraw.clone();
                spawn_local(async move {
                    let image = match decode_file(&file).await {
                        Ok(image) => image,
                        Err(err) => {
                            console::warn!("layers: image upload failed", err);
                            return;
                        }
                    };
                    let stored = stack.borrow_mut().finish_upload(slot, ticket, image);
                    match stored {
                        Ok(true) => redraw(),
                        Ok(false) => {}
                        Err(err) => console::warn!("layers: upload dropped", err.to_string()),
                    }
                });
            }));
        }

        if let Some(button) = by_id::<HtmlElement>(document, &ids.layers_export) {
            listeners.push(export_listener(
                document,
                &button,
                surface,
                config.layers_filename.clone(),
            ));
        }

        redraw();
        Ok(Some(Self {
            stack,
            _listeners: listeners,
        }))
    }

    pub fn slot_count(&self) -> usize {
        self.stack.borrow().slot_count()
    }
}

fn export_listener(
    document: &Document,
    button: &HtmlElement,
    surface: Rc<RefCell<CanvasSurface>>,
    filename: String,
) -> EventListener {
    let document = document.clone();
    EventListener::new(button, "click", move |_| {
        let exported = surface
            .borrow()
            .to_png_url()
            .and_then(|url| trigger_download(&document, &url, &filename));
        if let Err(err) = exported {
            console::warn!("export failed", err);
        }
    })
}

/// Tool picker buttons that reveal one studio panel at a time.
pub struct StudioSwitcher {
    switcher: Rc<RefCell<PanelSwitcher>>,
    _listeners: Vec<EventListener>,
}

struct StudioPanels {
    section: HtmlElement,
    banner: HtmlElement,
    layers: HtmlElement,
}

impl StudioPanels {
    fn show(&self, banner_hidden: bool, layers_hidden: bool) {
        self.section.set_hidden(false);
        self.banner.set_hidden(banner_hidden);
        self.layers.set_hidden(layers_hidden);
        smooth_scroll_into_view(&self.section);
    }
}

impl StudioSwitcher {
    pub fn install(document: &Document, config: &SiteConfig) -> Option<Self> {
        let ids = &config.ids;
        let pick_banner = by_id::<HtmlElement>(document, &ids.pick_banner);
        let pick_layers = by_id::<HtmlElement>(document, &ids.pick_layers);
        if pick_banner.is_none() && pick_layers.is_none() {
            return None;
        }
        let panels = match (
            by_id::<HtmlElement>(document, &ids.studio_section),
            by_id::<HtmlElement>(document, &ids.banner_panel),
            by_id::<HtmlElement>(document, &ids.layers_panel),
        ) {
            (Some(section), Some(banner), Some(layers)) => Some(StudioPanels {
                section,
                banner,
                layers,
            }),
            _ => None,
        };
        let panels = Rc::new(panels);
        let switcher = Rc::new(RefCell::new(PanelSwitcher::default()));

        let listeners = [(pick_banner, Panel::Banner), (pick_layers, Panel::Layers)]
            .into_iter()
            .filter_map(|(button, panel)| {
                let button = button?;
                let panels = panels.clone();
                let switcher = switcher.clone();
                Some(EventListener::new(&button, "click", move |_| {
                    let Some(panels) = &*panels else {
                        return;
                    };
                    let Some(visibility) = switcher.borrow_mut().select(panel) else {
                        return;
                    };
                    panels.show(visibility.banner_hidden, visibility.layers_hidden);
                }))
            })
            .collect();

        Some(Self {
            switcher,
            _listeners: listeners,
        })
    }

    pub fn active(&self) -> Option<Panel> {
        self.switcher.borrow().active()
    }
}
