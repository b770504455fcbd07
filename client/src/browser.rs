//! `web-sys` backend and WASM entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! One theme controller and one header controller per page, kept in
//! thread-local slots between [`mount`] and [`unmount`]. DOM listeners look
//! the controllers up on every event instead of capturing them, so a
//! re-mount swaps state without leaking stale handlers.

use std::cell::RefCell;

use design::{Preference, THEME_CHANGED_EVENT};
use gloo_timers::callback::Timeout;
use time::OffsetDateTime;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlDocument, HtmlElement, KeyboardEvent, MediaQueryListEvent, Window};

use crate::dom::Dom;
use crate::header::{HeaderConfig, HeaderController};
use crate::theme::{TRANSITION_SUPPRESS_MS, ThemeConfig, ThemeController, applied_theme};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// =============================================================================
// DOM BACKEND
// =============================================================================

/// [`Dom`] over the live `window` and `document`.
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    /// `None` outside a browsing context (workers, SSR).
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }
}

fn set_class_on(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("class toggle {class:?} failed: {err:?}");
    }
}

impl Dom for BrowserDom {
    type Node = Element;

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root()?.get_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        if let Some(root) = self.root() {
            if let Err(err) = root.set_attribute(name, value) {
                log::warn!("set root {name} failed: {err:?}");
            }
        }
    }

    fn set_root_class(&mut self, class: &str, on: bool) {
        if let Some(root) = self.root() {
            set_class_on(&root, class, on);
        }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        set_class_on(node, class, on);
    }

    fn set_display(&mut self, node: &Element, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = el.style().set_property("display", value) {
                log::warn!("set display failed: {err:?}");
            }
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn cookie(&self) -> String {
        match self.document.dyn_ref::<HtmlDocument>().map(HtmlDocument::cookie) {
            Some(Ok(raw)) => raw,
            _ => String::new(),
        }
    }

    fn write_cookie(&mut self, assignment: &str) {
        if let Some(doc) = self.document.dyn_ref::<HtmlDocument>() {
            if let Err(err) = doc.set_cookie(assignment) {
                log::warn!("cookie write failed: {err:?}");
            }
        }
    }

    fn prefers_dark(&self) -> bool {
        matches!(self.window.match_media(DARK_QUERY), Ok(Some(mq)) if mq.matches())
    }

    fn is_secure(&self) -> bool {
        self.window.location().protocol().is_ok_and(|p| p == "https:")
    }

    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> OffsetDateTime {
        let nanos = i128::from(js_sys::Date::now() as i64) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    fn emit_theme_changed(&mut self, theme: Preference) {
        let detail = js_sys::Object::new();
        if let Err(err) = js_sys::Reflect::set(&detail, &JsValue::from_str("theme"), &JsValue::from_str(theme.as_str())) {
            log::warn!("theme event detail failed: {err:?}");
        }
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        match web_sys::CustomEvent::new_with_event_init_dict(THEME_CHANGED_EVENT, &init) {
            Ok(event) => {
                if let Err(err) = self.window.dispatch_event(&event) {
                    log::warn!("theme event dispatch failed: {err:?}");
                }
            }
            Err(err) => log::warn!("theme event creation failed: {err:?}"),
        }
    }
}

// =============================================================================
// PAGE SLOTS
// =============================================================================

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

thread_local! {
    static THEME: RefCell<Option<ThemeController>> = const { RefCell::new(None) };
    static HEADER: RefCell<Option<HeaderController>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
}

fn listen(target: EventTarget, event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Listener {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log::warn!("listen {event} failed: {err:?}");
    }
    Listener { target, event, callback }
}

/// Run `f` against the mounted theme controller. Re-entrant calls (a
/// `themeChanged` listener calling back in) are dropped.
fn with_theme(f: impl FnOnce(&mut ThemeController, &mut BrowserDom)) {
    let Some(mut dom) = BrowserDom::new() else {
        return;
    };
    THEME.with(|slot| match slot.try_borrow_mut() {
        Ok(mut guard) => {
            if let Some(ctl) = guard.as_mut() {
                f(ctl, &mut dom);
            }
        }
        Err(_) => log::debug!("theme controller busy, dropping re-entrant call"),
    });
}

fn with_header(f: impl FnOnce(&HeaderController, &mut BrowserDom)) {
    let Some(mut dom) = BrowserDom::new() else {
        return;
    };
    HEADER.with(|slot| {
        if let Some(ctl) = slot.borrow().as_ref() {
            f(ctl, &mut dom);
        }
    });
}

/// Install both controllers on the current page and wire their listeners.
///
/// `init` may broadcast `themeChanged` before the controller is stored;
/// `getCurrentTheme` answers from the root attribute in that window.
pub fn mount(theme_config: ThemeConfig, header_config: HeaderConfig) {
    unmount();
    let Some(mut dom) = BrowserDom::new() else {
        return;
    };

    let theme = ThemeController::init(&mut dom, theme_config);
    let header = HeaderController::new(header_config);
    let mut listeners = Vec::new();

    for (node, action) in theme.bindings(&dom) {
        listeners.push(listen(node.into(), "click", move |_| with_theme(|ctl, dom| ctl.activate(dom, action))));
    }

    if let Some(toggle) = header.menu_toggle(&dom) {
        listeners.push(listen(toggle.into(), "click", |_| with_header(|ctl, dom| ctl.toggle_mobile_menu(dom))));
    }

    listeners.push(listen(dom.document.clone().into(), "click", |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        with_header(|ctl, dom| ctl.on_document_click(dom, &target));
    }));

    listeners.push(listen(dom.document.clone().into(), "keydown", |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            with_header(|ctl, dom| ctl.on_key(dom, &key));
        }
    }));

    if let Ok(Some(mq)) = dom.window.match_media(DARK_QUERY) {
        listeners.push(listen(mq.into(), "change", |event| {
            if let Some(change) = event.dyn_ref::<MediaQueryListEvent>() {
                let dark = change.matches();
                with_theme(|ctl, dom| ctl.on_system_change(dom, dark));
            }
        }));
    }

    log::info!("mounted: theme {}, {} listeners", theme.current_theme(), listeners.len());
    THEME.with(|slot| *slot.borrow_mut() = Some(theme));
    HEADER.with(|slot| *slot.borrow_mut() = Some(header));
    LISTENERS.with(|slot| *slot.borrow_mut() = listeners);

    Timeout::new(TRANSITION_SUPPRESS_MS, || with_theme(|ctl, dom| ctl.settle(dom))).forget();
}

/// Remove every listener and drop both controllers.
pub fn unmount() {
    let listeners = LISTENERS.with(|slot| std::mem::take(&mut *slot.borrow_mut()));
    for listener in listeners {
        if let Err(err) =
            listener.target.remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref())
        {
            log::warn!("unlisten {} failed: {err:?}", listener.event);
        }
    }
    THEME.with(|slot| *slot.borrow_mut() = None);
    HEADER.with(|slot| *slot.borrow_mut() = None);
}

// =============================================================================
// JS EXPORTS
// =============================================================================

/// Entry point for pages: install logging and mount with default selectors.
/// Call once the document has parsed (a `defer` script or `DOMContentLoaded`).
#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already set: {err}")));
    }
    mount(ThemeConfig::default(), HeaderConfig::default());
}

#[wasm_bindgen(js_name = unmountBlue)]
pub fn unmount_js() {
    unmount();
}

#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() {
    with_theme(ThemeController::toggle_theme);
}

/// Accepts `light`, `dark` or `auto`; anything else is ignored.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(value: &str) {
    match value.parse() {
        Ok(theme) => with_theme(|ctl, dom| ctl.set_theme(dom, theme)),
        Err(err) => log::warn!("{err}"),
    }
}

/// Falls back to the root `data-theme` while the controller is busy or not
/// yet stored, e.g. from a `themeChanged` listener fired during `mount`.
#[wasm_bindgen(js_name = getCurrentTheme)]
pub fn current_theme() -> Option<String> {
    let mounted = THEME.with(|slot| slot.try_borrow().ok()?.as_ref().map(ThemeController::current_theme));
    mounted.or_else(|| applied_theme(&BrowserDom::new()?)).map(|theme| theme.to_string())
}

#[wasm_bindgen(js_name = resetToSystem)]
pub fn reset_to_system() {
    with_theme(ThemeController::reset_to_system);
}

#[wasm_bindgen(js_name = toggleMobileMenu)]
pub fn toggle_mobile_menu() {
    with_header(HeaderController::toggle_mobile_menu);
}
