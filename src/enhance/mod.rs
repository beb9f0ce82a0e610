//! Enhancement initialization.
//!
//! Each installer is self-guarding: it queries for the element or
//! attribute it would create and no-ops when the work is already done, so
//! the whole sequence tolerates a second script inclusion. The order is
//! fixed: the accessibility bootstrap establishes the live region before
//! anything that announces through it runs.

pub mod bootstrap;
pub mod landmarks;
pub mod scroll_progress;
pub mod sidebar_nav;
pub mod theme_toggle;

use std::rc::Rc;

use crate::announcer::Announcer;
use crate::page::Page;

/// Run the full enhancement sequence and return the announcement service.
pub fn run<P: Page + 'static>(page: &Rc<P>) -> Rc<Announcer<P>> {
    bootstrap::install(page);
    let announcer = Announcer::new(Rc::clone(page));
    scroll_progress::install(page);
    theme_toggle::install(page, &announcer);
    sidebar_nav::install(page);
    tag_ripple_targets(page);
    landmarks::install(page);
    announcer
}

/// Buttons opt into the stylesheet's ripple affordance via `data-ripple`.
fn tag_ripple_targets<P: Page>(page: &Rc<P>) {
    for button in page.query_all(".btn") {
        page.set_attr(&button, "data-ripple", "");
    }
}
