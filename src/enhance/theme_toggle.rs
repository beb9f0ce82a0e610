//! Theme toggle control.

use std::rc::Rc;

use crate::announcer::Announcer;
use crate::page::Page;

const TOGGLE_ID: &str = "theme-toggle";
const DARK_CLASS: &str = "dark";

const MOON_ICON: &str = "<i class=\"fa fa-moon-o\"></i>";
const SUN_ICON: &str = "<i class=\"fa fa-sun-o\"></i>";

fn icon_for(dark: bool) -> &'static str {
    if dark { SUN_ICON } else { MOON_ICON }
}

fn message_for(dark: bool) -> &'static str {
    if dark {
        "Switched to dark mode"
    } else {
        "Switched to light mode"
    }
}

/// Create the theme toggle once and wire it to the document root's theme
/// class. The root class is the only representation of theme state;
/// nothing is persisted across reloads.
pub fn install<P: Page + 'static>(page: &Rc<P>, announcer: &Rc<Announcer<P>>) {
    if page.by_id(TOGGLE_ID).is_some() {
        return;
    }
    let button = page.create_element("button");
    page.set_attr(&button, "id", TOGGLE_ID);
    page.set_attr(&button, "class", "theme-toggle header-icon-btn");
    page.set_attr(&button, "type", "button");
    page.set_attr(&button, "aria-label", "Toggle color theme");
    page.set_html(&button, icon_for(page.root_has_class(DARK_CLASS)));
    page.append_body(&button);

    let handler = {
        let page = Rc::clone(page);
        let announcer = Rc::clone(announcer);
        let button = button.clone();
        move || {
            let dark = page.toggle_root_class(DARK_CLASS);
            page.set_html(&button, icon_for(dark));
            announcer.announce(message_for(dark));
        }
    };
    page.on_activate(&button, Rc::new(handler));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcer::{ANNOUNCE_DELAY_MS, LIVE_REGION_ID};
    use crate::page::memory::MemoryPage;

    fn page_with_region() -> (Rc<MemoryPage>, crate::page::memory::MemoryNode) {
        let page = Rc::new(MemoryPage::new());
        let region = page.create_element("div");
        page.set_attr(&region, "id", LIVE_REGION_ID);
        page.append_body(&region);
        (page, region)
    }

    #[test]
    fn double_activation_restores_original_theme() {
        let (page, region) = page_with_region();
        let announcer = Announcer::new(Rc::clone(&page));
        install(&page, &announcer);
        let button = page.by_id("theme-toggle").expect("toggle created");
        assert_eq!(page.html(&button), MOON_ICON);

        page.activate(&button);
        assert!(page.root_has_class("dark"));
        assert_eq!(page.html(&button), SUN_ICON);
        page.advance(u64::from(ANNOUNCE_DELAY_MS));
        assert_eq!(page.text(&region), "Switched to dark mode");

        page.activate(&button);
        assert!(!page.root_has_class("dark"));
        assert_eq!(page.html(&button), MOON_ICON);
        page.advance(u64::from(ANNOUNCE_DELAY_MS));
        assert_eq!(page.text(&region), "Switched to light mode");
    }

    #[test]
    fn respects_theme_class_already_on_root() {
        let (page, _region) = page_with_region();
        page.toggle_root_class("dark");
        let announcer = Announcer::new(Rc::clone(&page));
        install(&page, &announcer);
        let button = page.by_id("theme-toggle").expect("toggle created");
        assert_eq!(page.html(&button), SUN_ICON);
    }

    #[test]
    fn second_install_creates_no_second_control() {
        let (page, _region) = page_with_region();
        let announcer = Announcer::new(Rc::clone(&page));
        install(&page, &announcer);
        install(&page, &announcer);
        assert_eq!(page.query_all("#theme-toggle").len(), 1);

        // One activation still means one announcement
        let button = page.by_id("theme-toggle").expect("toggle created");
        page.activate(&button);
        assert_eq!(page.pending_timers(), 1);
    }
}
