//! UI-context abstraction over the document.
//!
//! The enhancement layer never touches the browser directly; it talks to a
//! [`Page`]. Wasm builds get the web-sys-backed [`browser::BrowserPage`],
//! native builds and tests get the in-memory [`memory::MemoryPage`] with a
//! manual clock.

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(any(test, not(target_arch = "wasm32")))]
pub mod memory;
#[cfg(any(test, not(target_arch = "wasm32")))]
mod selector;

use std::rc::Rc;

/// Vertical scroll state sampled from the page at one instant.
///
/// Derived per event, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// The document operations the enhancement layer relies on.
///
/// Handles are cheap to clone and compare by identity, so a snapshot of
/// nodes taken at initialization can later be checked against the focused
/// element. All methods are infallible from the caller's point of view:
/// anything the underlying document refuses degrades to a no-op.
pub trait Page {
    /// Handle to an element of the page.
    type Node: Clone + PartialEq;
    /// Handle to a scheduled deferred callback.
    type Timer;

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Create a detached element; attach it with [`Page::prepend_body`] or
    /// [`Page::append_body`].
    fn create_element(&self, tag: &str) -> Self::Node;
    fn prepend_body(&self, node: &Self::Node);
    fn append_body(&self, node: &Self::Node);
    fn remove(&self, node: &Self::Node);
    fn contains(&self, node: &Self::Node) -> bool;

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn html(&self, node: &Self::Node) -> String;
    fn set_html(&self, node: &Self::Node, html: &str);
    fn add_class(&self, node: &Self::Node, class: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Toggle `class` on the document root, returning whether it is now set.
    fn toggle_root_class(&self, class: &str) -> bool;
    fn root_has_class(&self, class: &str) -> bool;

    fn focus(&self, node: &Self::Node);
    /// Activate `node` as a user click would.
    fn activate(&self, node: &Self::Node);
    fn active_element(&self) -> Option<Self::Node>;

    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Register a passive scroll listener on the viewport.
    fn on_scroll(&self, handler: Rc<dyn Fn()>);
    /// Register a document-level keydown listener. The handler receives the
    /// key name and returns whether the default action must be prevented.
    fn on_keydown(&self, handler: Rc<dyn Fn(&str) -> bool>);
    /// Register an activation (click) listener on `node`.
    fn on_activate(&self, node: &Self::Node, handler: Rc<dyn Fn()>);

    /// Schedule a one-shot deferred callback. `None` means the environment
    /// refused to schedule it.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Option<Self::Timer>;
    fn cancel(&self, timer: Self::Timer);
}
