//! Landmark roles for structural regions.

use std::rc::Rc;

use crate::page::Page;

/// Expose the sidebar container as a labeled navigation landmark and the
/// header as the banner. Re-setting the same attribute values is
/// harmless, so no guard is needed.
pub fn install<P: Page>(page: &Rc<P>) {
    if let Some(aside) = page.query("aside") {
        page.set_attr(&aside, "role", "navigation");
        page.set_attr(&aside, "aria-label", "Sidebar navigation");
    }
    if let Some(header) = page.query("header") {
        page.set_attr(&header, "role", "banner");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::MemoryPage;

    #[test]
    fn regions_gain_roles_when_present() {
        let page = Rc::new(MemoryPage::new());
        let aside = page.insert(&page.body(), "aside");
        let header = page.insert(&page.body(), "header");
        install(&page);
        install(&page);
        assert_eq!(page.attr(&aside, "role").as_deref(), Some("navigation"));
        assert_eq!(
            page.attr(&aside, "aria-label").as_deref(),
            Some("Sidebar navigation")
        );
        assert_eq!(page.attr(&header, "role").as_deref(), Some("banner"));
    }

    #[test]
    fn missing_regions_are_skipped() {
        let page = Rc::new(MemoryPage::new());
        install(&page);
    }
}
