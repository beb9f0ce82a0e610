//! `Page` backed by the live browser document through web-sys.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, KeyboardEvent};

use super::{Page, ScrollMetrics};
use crate::dom;

pub struct BrowserPage {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl BrowserPage {
    /// # Panics
    /// Panics outside of a browser context, where `window` and `document`
    /// are unavailable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: dom::window(),
            document: dom::document(),
        }
    }

    fn body(&self) -> HtmlElement {
        self.document
            .body()
            .expect("`body` should exist in browser context")
    }

    fn root(&self) -> Element {
        self.document
            .document_element()
            .expect("document root element should exist")
    }

    fn report_listener_error(event: &str, err: &wasm_bindgen::JsValue) {
        dom::console_error(&format!(
            "Failed to attach {event} listener: {}",
            dom::js_error_message(err)
        ));
    }
}

impl Default for BrowserPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for BrowserPage {
    type Node = Element;
    type Timer = i32;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn create_element(&self, tag: &str) -> Element {
        self.document
            .create_element(tag)
            .expect("element creation should succeed for static tag names")
    }

    fn prepend_body(&self, node: &Element) {
        let body = self.body();
        let _ = body.insert_before(node.as_ref(), body.first_child().as_ref());
    }

    fn append_body(&self, node: &Element) {
        let _ = self.body().append_child(node.as_ref());
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn contains(&self, node: &Element) -> bool {
        self.body().contains(Some(node.as_ref()))
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn toggle_root_class(&self, class: &str) -> bool {
        self.root().class_list().toggle(class).unwrap_or_default()
    }

    fn root_has_class(&self, class: &str) -> bool {
        self.root().class_list().contains(class)
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn activate(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.click();
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.window.scroll_y().unwrap_or_default(),
            scroll_height: f64::from(self.root().scroll_height()),
            viewport_height: self
                .window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or_default(),
        }
    }

    fn on_scroll(&self, handler: Rc<dyn Fn()>) {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        if let Err(err) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                closure.as_ref().unchecked_ref(),
                &options,
            )
        {
            Self::report_listener_error("scroll", &err);
        }
        closure.forget();
    }

    fn on_keydown(&self, handler: Rc<dyn Fn(&str) -> bool>) {
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if handler(&event.key()) {
                event.prevent_default();
            }
        });
        if let Err(err) = self
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            Self::report_listener_error("keydown", &err);
        }
        closure.forget();
    }

    fn on_activate(&self, node: &Element, handler: Rc<dyn Fn()>) {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        if let Err(err) =
            node.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            Self::report_listener_error("click", &err);
        }
        closure.forget();
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Option<i32> {
        dom::set_timeout(callback, i32::try_from(delay_ms).unwrap_or(i32::MAX))
    }

    fn cancel(&self, timer: i32) {
        dom::clear_timeout(timer);
    }
}
