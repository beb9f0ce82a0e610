#![cfg(not(target_arch = "wasm32"))]

use std::rc::Rc;

use apotheca_web::announcer::{ANNOUNCE_DELAY_MS, LIVE_REGION_ID};
use apotheca_web::enhance;
use apotheca_web::page::memory::{MemoryNode, MemoryPage};
use apotheca_web::page::{Page, ScrollMetrics};

/// A representative server-rendered admin page: header with nav links,
/// sidebar with three items, main region, progress bar, a couple of
/// buttons.
fn admin_page() -> (Rc<MemoryPage>, Vec<MemoryNode>) {
    let page = Rc::new(MemoryPage::new());

    let header = page.insert(&page.body(), "header");
    let nav = page.insert(&header, "nav");
    page.set_attr(&nav, "id", "common-nav");
    page.insert(&nav, "a");
    page.insert(&nav, "a");
    let bar = page.insert(&header, "div");
    page.set_attr(&bar, "id", "scroll-progress");

    let aside = page.insert(&page.body(), "aside");
    let items: Vec<_> = (0..3)
        .map(|i| {
            let item = page.insert(&aside, "div");
            page.set_attr(
                &item,
                "class",
                if i == 0 { "sidebar-item active" } else { "sidebar-item" },
            );
            item
        })
        .collect();

    let main = page.insert(&page.body(), "div");
    page.set_attr(&main, "class", "main-content");
    let save = page.insert(&main, "button");
    page.set_attr(&save, "class", "btn");

    page.set_scroll_state(ScrollMetrics {
        scroll_top: 0.0,
        scroll_height: 2400.0,
        viewport_height: 800.0,
    });
    (page, items)
}

#[test]
fn full_sequence_establishes_every_affordance() {
    let (page, items) = admin_page();
    let announcer = enhance::run(&page);

    // Skip link first in the body, pointing at the promoted landmark
    let skip = page.query(".skip-link").expect("skip link injected");
    assert_eq!(page.children_of(&page.body()).first(), Some(&skip));
    assert!(page.by_id("main-content").is_some());

    // Live region exists and the returned service reaches it
    let region = page.by_id(LIVE_REGION_ID).expect("live region");
    announcer.announce("Dashboard loaded");
    page.advance(u64::from(ANNOUNCE_DELAY_MS));
    assert_eq!(page.text(&region), "Dashboard loaded");

    // Sidebar snapshot: roving tabindex and the server-side active marker
    for item in &items {
        assert_eq!(page.attr(item, "tabindex").as_deref(), Some("0"));
    }
    assert_eq!(page.attr(&items[0], "aria-current").as_deref(), Some("page"));

    // Landmarks and ripple tagging
    let aside = page.query("aside").expect("aside");
    assert_eq!(page.attr(&aside, "role").as_deref(), Some("navigation"));
    let header = page.query("header").expect("header");
    assert_eq!(page.attr(&header, "role").as_deref(), Some("banner"));
    let button = page.query(".btn").expect("button");
    assert_eq!(page.attr(&button, "data-ripple").as_deref(), Some(""));
}

#[test]
fn rerunning_the_sequence_duplicates_nothing() {
    let (page, _items) = admin_page();
    let _first = enhance::run(&page);
    let _second = enhance::run(&page);

    assert_eq!(page.query_all(".skip-link").len(), 1);
    assert_eq!(page.query_all("#aria-live-region").len(), 1);
    assert_eq!(page.query_all("#theme-toggle").len(), 1);
    assert_eq!(page.query_all("#a11y-critical-css").len(), 1);
}

#[test]
fn progress_bar_spans_the_scroll_range() {
    let (page, _items) = admin_page();
    let _announcer = enhance::run(&page);
    let bar = page.by_id("scroll-progress").expect("bar");

    assert_eq!(page.style(&bar, "width").as_deref(), Some("0%"));
    let mut last = 0.0_f64;
    for step in 0..=8 {
        let top = f64::from(step) * 200.0;
        page.scroll_to(top);
        let width = page
            .style(&bar, "width")
            .and_then(|w| w.trim_end_matches('%').parse::<f64>().ok())
            .expect("numeric width");
        assert!(width >= last);
        last = width;
    }
    assert_eq!(page.style(&bar, "width").as_deref(), Some("100%"));
}

#[test]
fn sidebar_keyboard_traversal_wraps_and_activates() {
    let (page, items) = admin_page();
    let _announcer = enhance::run(&page);

    page.focus(&items[0]);
    assert!(page.press_key("ArrowUp"));
    assert_eq!(page.focused(), Some(items[2]));
    assert!(page.press_key("ArrowDown"));
    assert_eq!(page.focused(), Some(items[0]));

    page.press_key("Enter");
    assert_eq!(page.activation_count(&items[0]), 1);
}

#[test]
fn theme_toggle_round_trips_and_announces_each_flip() {
    let (page, _items) = admin_page();
    let _announcer = enhance::run(&page);
    let region = page.by_id(LIVE_REGION_ID).expect("live region");
    let toggle = page.by_id("theme-toggle").expect("toggle");

    assert!(!page.root_has_class("dark"));
    page.activate(&toggle);
    assert!(page.root_has_class("dark"));
    page.advance(u64::from(ANNOUNCE_DELAY_MS));
    assert_eq!(page.text(&region), "Switched to dark mode");

    page.activate(&toggle);
    assert!(!page.root_has_class("dark"));
    page.advance(u64::from(ANNOUNCE_DELAY_MS));
    assert_eq!(page.text(&region), "Switched to light mode");
}

#[test]
fn bare_page_degrades_to_the_essentials() {
    let page = Rc::new(MemoryPage::new());
    let announcer = enhance::run(&page);

    assert!(page.query(".skip-link").is_some());
    assert!(page.by_id(LIVE_REGION_ID).is_some());
    assert!(page.by_id("theme-toggle").is_some());
    assert_eq!(page.by_id("main-content"), None);
    assert_eq!(page.by_id("scroll-progress"), None);
    assert!(!page.press_key("ArrowDown"));

    announcer.announce("still speaking");
    page.advance(u64::from(ANNOUNCE_DELAY_MS));
    let region = page.by_id(LIVE_REGION_ID).expect("live region");
    assert_eq!(page.text(&region), "still speaking");
}
