//! In-memory document with a manual clock.
//!
//! Stands in for the browser on native builds so the enhancement layer
//! can be exercised without a DOM: structural queries, attribute and text
//! mutation, focus and activation tracking, scroll state, and deferred
//! callbacks that fire under [`MemoryPage::advance`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::selector::Selector;
use super::{Page, ScrollMetrics};

const ROOT: usize = 0;
const BODY: usize = 1;

/// Handle to a node of [`MemoryPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryNode(usize);

#[derive(Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    html: String,
    style: BTreeMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    fn class_attr(&self) -> &str {
        self.attrs.get("class").map_or("", String::as_str)
    }
}

struct PendingTimer {
    id: usize,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

pub struct MemoryPage {
    nodes: RefCell<Vec<NodeData>>,
    active: Cell<Option<usize>>,
    activations: RefCell<Vec<usize>>,
    scroll: Cell<ScrollMetrics>,
    scroll_handlers: RefCell<Vec<Rc<dyn Fn()>>>,
    key_handlers: RefCell<Vec<Rc<dyn Fn(&str) -> bool>>>,
    activate_handlers: RefCell<Vec<(usize, Rc<dyn Fn()>)>>,
    timers: RefCell<Vec<PendingTimer>>,
    now: Cell<u64>,
    next_timer: Cell<usize>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// An empty document: a root element with a bare body.
    #[must_use]
    pub fn new() -> Self {
        let mut root = NodeData::new("html");
        root.children.push(BODY);
        let mut body = NodeData::new("body");
        body.parent = Some(ROOT);
        Self {
            nodes: RefCell::new(vec![root, body]),
            active: Cell::new(None),
            activations: RefCell::new(Vec::new()),
            scroll: Cell::new(ScrollMetrics::default()),
            scroll_handlers: RefCell::new(Vec::new()),
            key_handlers: RefCell::new(Vec::new()),
            activate_handlers: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(0),
            next_timer: Cell::new(0),
        }
    }

    /// The body element, for building fixtures.
    #[must_use]
    pub fn body(&self) -> MemoryNode {
        MemoryNode(BODY)
    }

    /// Create an element and append it under `parent`.
    pub fn insert(&self, parent: &MemoryNode, tag: &str) -> MemoryNode {
        let node = self.create_element(tag);
        self.attach(node.0, parent.0, None);
        node
    }

    /// Children of `node`, in document order.
    #[must_use]
    pub fn children_of(&self, node: &MemoryNode) -> Vec<MemoryNode> {
        self.nodes.borrow()[node.0]
            .children
            .iter()
            .map(|&idx| MemoryNode(idx))
            .collect()
    }

    /// Inline style value previously set on `node`.
    #[must_use]
    pub fn style(&self, node: &MemoryNode, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    /// The currently focused element.
    #[must_use]
    pub fn focused(&self) -> Option<MemoryNode> {
        self.active.get().map(MemoryNode)
    }

    /// How many times `node` has been activated.
    #[must_use]
    pub fn activation_count(&self, node: &MemoryNode) -> usize {
        self.activations
            .borrow()
            .iter()
            .filter(|&&idx| idx == node.0)
            .count()
    }

    /// Set the scroll state without dispatching a scroll event.
    pub fn set_scroll_state(&self, metrics: ScrollMetrics) {
        self.scroll.set(metrics);
    }

    /// Scroll to `top` and dispatch the scroll listeners.
    pub fn scroll_to(&self, top: f64) {
        let mut metrics = self.scroll.get();
        metrics.scroll_top = top;
        self.scroll.set(metrics);
        let handlers: Vec<_> = self.scroll_handlers.borrow().clone();
        for handler in handlers {
            handler();
        }
    }

    /// Dispatch a keydown to the document listeners. Returns whether any
    /// handler asked for the default action to be prevented.
    pub fn press_key(&self, key: &str) -> bool {
        let handlers: Vec<_> = self.key_handlers.borrow().clone();
        let mut prevented = false;
        for handler in handlers {
            if handler(key) {
                prevented = true;
            }
        }
        prevented
    }

    /// Advance the clock by `ms`, firing due timers in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let timers = self.timers.borrow();
                timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(index, _)| index)
            };
            let Some(index) = next else { break };
            let timer = self.timers.borrow_mut().remove(index);
            if timer.due > self.now.get() {
                self.now.set(timer.due);
            }
            (timer.callback)();
        }
        self.now.set(target);
    }

    /// Number of not-yet-fired timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    fn detach(&self, index: usize) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[index].parent.take() {
            nodes[parent].children.retain(|&child| child != index);
        }
    }

    fn attach(&self, index: usize, parent: usize, position: Option<usize>) {
        self.detach(index);
        let mut nodes = self.nodes.borrow_mut();
        nodes[index].parent = Some(parent);
        match position {
            Some(at) => nodes[parent].children.insert(at, index),
            None => nodes[parent].children.push(index),
        }
    }

    fn document_order(nodes: &[NodeData]) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            order.push(index);
            for &child in nodes[index].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    fn matches_at(nodes: &[NodeData], index: usize, selector: &Selector) -> bool {
        let Some((last, ancestors)) = selector.compounds.split_last() else {
            return false;
        };
        let node = &nodes[index];
        if !last.matches(&node.tag, node.id(), node.class_attr()) {
            return false;
        }
        // Remaining compounds must match ancestors innermost-first
        let mut remaining = ancestors;
        let mut cursor = nodes[index].parent;
        while let Some(idx) = cursor {
            let Some((innermost, rest)) = remaining.split_last() else {
                break;
            };
            let ancestor = &nodes[idx];
            if innermost.matches(&ancestor.tag, ancestor.id(), ancestor.class_attr()) {
                remaining = rest;
            }
            cursor = nodes[idx].parent;
        }
        remaining.is_empty()
    }

    fn select(&self, selector: &str) -> Vec<usize> {
        let parsed = Selector::parse(selector);
        if parsed.compounds.is_empty() {
            return Vec::new();
        }
        let nodes = self.nodes.borrow();
        Self::document_order(&nodes)
            .into_iter()
            .filter(|&index| Self::matches_at(&nodes, index, &parsed))
            .collect()
    }
}

impl Page for MemoryPage {
    type Node = MemoryNode;
    type Timer = usize;

    fn by_id(&self, id: &str) -> Option<MemoryNode> {
        let nodes = self.nodes.borrow();
        Self::document_order(&nodes)
            .into_iter()
            .find(|&index| nodes[index].id() == Some(id))
            .map(MemoryNode)
    }

    fn query(&self, selector: &str) -> Option<MemoryNode> {
        self.select(selector).first().copied().map(MemoryNode)
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryNode> {
        self.select(selector).into_iter().map(MemoryNode).collect()
    }

    fn create_element(&self, tag: &str) -> MemoryNode {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData::new(tag));
        MemoryNode(nodes.len() - 1)
    }

    fn prepend_body(&self, node: &MemoryNode) {
        self.attach(node.0, BODY, Some(0));
    }

    fn append_body(&self, node: &MemoryNode) {
        self.attach(node.0, BODY, None);
    }

    fn remove(&self, node: &MemoryNode) {
        self.detach(node.0);
    }

    fn contains(&self, node: &MemoryNode) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(node.0);
        while let Some(index) = cursor {
            if index == BODY {
                return true;
            }
            cursor = nodes[index].parent;
        }
        false
    }

    fn attr(&self, node: &MemoryNode, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attrs.get(name).cloned()
    }

    fn set_attr(&self, node: &MemoryNode, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn text(&self, node: &MemoryNode) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    fn set_text(&self, node: &MemoryNode, text: &str) {
        self.nodes.borrow_mut()[node.0].text = text.to_owned();
    }

    fn html(&self, node: &MemoryNode) -> String {
        self.nodes.borrow()[node.0].html.clone()
    }

    fn set_html(&self, node: &MemoryNode, html: &str) {
        self.nodes.borrow_mut()[node.0].html = html.to_owned();
    }

    fn add_class(&self, node: &MemoryNode, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let attr = nodes[node.0].attrs.entry("class".to_owned()).or_default();
        if !attr.split_whitespace().any(|have| have == class) {
            if !attr.is_empty() {
                attr.push(' ');
            }
            attr.push_str(class);
        }
    }

    fn set_style(&self, node: &MemoryNode, property: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .style
            .insert(property.to_owned(), value.to_owned());
    }

    fn toggle_root_class(&self, class: &str) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        let attr = nodes[ROOT].attrs.entry("class".to_owned()).or_default();
        if attr.split_whitespace().any(|have| have == class) {
            let kept = attr
                .split_whitespace()
                .filter(|have| *have != class)
                .collect::<Vec<_>>()
                .join(" ");
            *attr = kept;
            false
        } else {
            if !attr.is_empty() {
                attr.push(' ');
            }
            attr.push_str(class);
            true
        }
    }

    fn root_has_class(&self, class: &str) -> bool {
        self.nodes.borrow()[ROOT]
            .class_attr()
            .split_whitespace()
            .any(|have| have == class)
    }

    fn focus(&self, node: &MemoryNode) {
        self.active.set(Some(node.0));
    }

    fn activate(&self, node: &MemoryNode) {
        self.activations.borrow_mut().push(node.0);
        let handlers: Vec<_> = self
            .activate_handlers
            .borrow()
            .iter()
            .filter(|(target, _)| *target == node.0)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    fn active_element(&self) -> Option<MemoryNode> {
        self.active.get().map(MemoryNode)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.scroll.get()
    }

    fn on_scroll(&self, handler: Rc<dyn Fn()>) {
        self.scroll_handlers.borrow_mut().push(handler);
    }

    fn on_keydown(&self, handler: Rc<dyn Fn(&str) -> bool>) {
        self.key_handlers.borrow_mut().push(handler);
    }

    fn on_activate(&self, node: &MemoryNode, handler: Rc<dyn Fn()>) {
        self.activate_handlers.borrow_mut().push((node.0, handler));
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Option<usize> {
        let id = self.next_timer.get();
        self.next_timer.set(id + 1);
        self.timers.borrow_mut().push(PendingTimer {
            id,
            due: self.now.get() + u64::from(delay_ms),
            callback,
        });
        Some(id)
    }

    fn cancel(&self, timer: usize) {
        self.timers.borrow_mut().retain(|pending| pending.id != timer);
    }
}
