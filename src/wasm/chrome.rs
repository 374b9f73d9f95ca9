//! Page chrome shared by every page: anchor scrolling, the policy-id copy
//! button and the mobile menu.

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use super::dom::{by_id, elements, smooth_scroll_into_view};
use crate::config::SiteConfig;
use crate::nav::{anchor_target, MenuState, MENU_OPEN_CLASS};

pub struct AnchorScroll {
    _listeners: Vec<EventListener>,
}

impl AnchorScroll {
    pub fn install(document: &Document) -> Result<Self, JsValue> {
        let listeners = elements(document.query_selector_all("a[href^=\"#\"]")?)
            .into_iter()
            .map(|anchor| {
                let document = document.clone();
                let link = anchor.clone();
                EventListener::new_with_options(
                    &anchor,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        let Some(href) = link.get_attribute("href") else {
                            return;
                        };
                        let Some(selector) = anchor_target(&href) else {
                            return;
                        };
                        let Ok(Some(target)) = document.query_selector(selector) else {
                            return;
                        };
                        event.prevent_default();
                        smooth_scroll_into_view(&target);
                    },
                )
            })
            .collect();
        Ok(Self {
            _listeners: listeners,
        })
    }
}

pub struct CopyButton {
    _listener: EventListener,
}

impl CopyButton {
    pub fn install(window: &Window, document: &Document, config: &SiteConfig) -> Option<Self> {
        let button = by_id::<HtmlElement>(document, &config.ids.copy_button)?;
        let window = window.clone();
        let document = document.clone();
        let input_id = config.ids.policy_input.clone();
        let copied = config.copied_label.clone();
        let idle = config.copy_label.clone();
        let reset_ms = config.copy_reset_ms;
        let label = button.clone();
        let listener = EventListener::new(&button, "click", move |_| {
            let Some(input) = by_id::<HtmlInputElement>(&document, &input_id) else {
                return;
            };
            let window = window.clone();
            let label = label.clone();
            let copied = copied.clone();
            let idle = idle.clone();
            spawn_local(async move {
                match write_clipboard(&window, &input.value()).await {
                    Ok(()) => {
                        label.set_text_content(Some(copied.as_str()));
                        Timeout::new(reset_ms, move || label.set_text_content(Some(idle.as_str())))
                            .forget();
                    }
                    Err(err) => console::warn!("copy: clipboard write failed", err),
                }
            });
        });
        Some(Self {
            _listener: listener,
        })
    }
}

async fn write_clipboard(window: &Window, text: &str) -> Result<(), JsValue> {
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard unavailable".into());
    }
    let write_text =
        Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into::<Function>()?;
    let pending = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;
    JsFuture::from(pending).await?;
    Ok(())
}

/// Hamburger button driving the collapsible mobile navigation. The open
/// class on the menu is the single source of truth.
pub struct MobileMenu {
    menu: Element,
    _listeners: Vec<EventListener>,
}

impl MobileMenu {
    pub fn install(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        let Some(hamburger) = by_id::<Element>(document, &config.ids.hamburger) else {
            return Ok(None);
        };
        let Some(menu) = by_id::<Element>(document, &config.ids.mobile_menu) else {
            return Ok(None);
        };
        apply(&hamburger, &menu, current(&menu));
        let mut listeners = Vec::new();

        {
            let button = hamburger.clone();
            let menu = menu.clone();
            listeners.push(EventListener::new(&hamburger, "click", move |_| {
                let mut next = current(&menu);
                next.toggle();
                apply(&button, &menu, next);
            }));
        }

        for link in elements(menu.query_selector_all("a")?) {
            let button = hamburger.clone();
            let menu = menu.clone();
            listeners.push(EventListener::new(&link, "click", move |_| {
                let mut next = current(&menu);
                next.close();
                apply(&button, &menu, next);
            }));
        }

        Ok(Some(Self {
            menu,
            _listeners: listeners,
        }))
    }

    pub fn is_open(&self) -> bool {
        current(&self.menu).is_open()
    }
}

fn current(menu: &Element) -> MenuState {
    MenuState::from_open(menu.class_list().contains(MENU_OPEN_CLASS))
}

fn apply(button: &Element, menu: &Element, state: MenuState) {
    let _ = menu
        .class_list()
        .toggle_with_force(MENU_OPEN_CLASS, state.is_open());
    let _ = button.set_attribute("aria-expanded", state.aria_expanded());
}
