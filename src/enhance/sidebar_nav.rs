//! Roving keyboard navigation for the sidebar.

use std::rc::Rc;

use crate::page::Page;

const ITEM_SELECTOR: &str = "aside .sidebar-item";
const ACTIVE_ITEM_SELECTOR: &str = "aside .sidebar-item.active";

/// Install cyclic ArrowUp/ArrowDown focus traversal and Enter-to-activate
/// over the sidebar items present right now.
///
/// The item list is a one-time snapshot by contract: items added to the
/// sidebar later are not navigable. A page without sidebar items gets no
/// listener at all. Arrow keys are consumed only while focus is on a
/// snapshot member, so the rest of the page scrolls normally.
pub fn install<P: Page + 'static>(page: &Rc<P>) {
    let items = page.query_all(ITEM_SELECTOR);
    if items.is_empty() {
        return;
    }
    for item in &items {
        page.set_attr(item, "tabindex", "0");
    }
    // Mark the item the server rendered as current; not kept in sync with
    // later navigation.
    if let Some(active) = page.query(ACTIVE_ITEM_SELECTOR) {
        page.set_attr(&active, "aria-current", "page");
    }

    let handler = {
        let page = Rc::clone(page);
        move |key: &str| -> bool {
            let Some(focused) = page.active_element() else {
                return false;
            };
            let Some(index) = items.iter().position(|item| *item == focused) else {
                return false;
            };
            match key {
                "ArrowDown" | "ArrowUp" => {
                    let next = if key == "ArrowDown" {
                        (index + 1) % items.len()
                    } else {
                        (index + items.len() - 1) % items.len()
                    };
                    page.focus(&items[next]);
                    true
                }
                "Enter" => {
                    page.activate(&focused);
                    false
                }
                _ => false,
            }
        }
    };
    page.on_keydown(Rc::new(handler));
}
