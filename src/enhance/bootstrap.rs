//! First-stage accessibility bootstrap.
//!
//! Injects the skip link, resolves the main-content landmark, creates the
//! live region, and opts navigation targets into the keyboard tab order.
//! Missing page structure is expected (these scripts run on every page of
//! the site) and degrades each step to a no-op.

use std::rc::Rc;

use crate::a11y;
use crate::announcer::LIVE_REGION_ID;
use crate::page::Page;

const CRITICAL_CSS_ID: &str = "a11y-critical-css";
const MAIN_CONTENT_ID: &str = "main-content";

/// Install the page-wide accessibility scaffolding. Idempotent.
pub fn install<P: Page>(page: &Rc<P>) {
    inject_critical_css(page);
    inject_skip_link(page);
    resolve_main_landmark(page);
    ensure_live_region(page);
    normalize_focusability(page);
}

fn inject_critical_css<P: Page>(page: &Rc<P>) {
    if page.by_id(CRITICAL_CSS_ID).is_some() {
        return;
    }
    let style = page.create_element("style");
    page.set_attr(&style, "id", CRITICAL_CSS_ID);
    page.set_text(&style, a11y::critical_css());
    page.append_body(&style);
}

fn inject_skip_link<P: Page>(page: &Rc<P>) {
    if page.query(".skip-link").is_some() {
        return;
    }
    let link = page.create_element("a");
    page.set_attr(&link, "href", "#main-content");
    page.set_attr(&link, "class", "skip-link");
    page.set_text(&link, "Skip to main content");
    page.prepend_body(&link);
}

/// Prefer an element already carrying the canonical id; otherwise promote
/// the class-selected fallback by assigning it the id. Pages with neither
/// stay untouched.
fn resolve_main_landmark<P: Page>(page: &Rc<P>) {
    let Some(main) = page
        .by_id(MAIN_CONTENT_ID)
        .or_else(|| page.query(".main-content"))
    else {
        return;
    };
    if page.attr(&main, "id").is_none() {
        page.set_attr(&main, "id", MAIN_CONTENT_ID);
    }
}

fn ensure_live_region<P: Page>(page: &Rc<P>) {
    if page.by_id(LIVE_REGION_ID).is_some() {
        return;
    }
    let region = page.create_element("div");
    page.set_attr(&region, "id", LIVE_REGION_ID);
    page.set_attr(&region, "aria-live", "polite");
    page.set_attr(&region, "aria-atomic", "true");
    page.set_attr(&region, "class", "sr-only");
    page.append_body(&region);
}

/// Opt nav links and sidebar items into the tab order, leaving elements
/// with an explicit `tabindex` alone.
fn normalize_focusability<P: Page>(page: &Rc<P>) {
    let nav_links = page.query_all("#common-nav a");
    let sidebar_items = page.query_all(".sidebar-item");
    for element in nav_links.into_iter().chain(sidebar_items) {
        if page.attr(&element, "tabindex").is_none() {
            page.set_attr(&element, "tabindex", "0");
        }
    }
}
