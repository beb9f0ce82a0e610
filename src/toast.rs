//! Transient toast messages.

use std::rc::Rc;

use crate::page::Page;

const DISMISS_DELAY_MS: u32 = 3000;
const FADE_MS: u32 = 300;

/// Visual category of a toast message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn color_classes(self) -> &'static str {
        match self {
            Self::Success => "bg-green-500 text-white",
            Self::Error => "bg-red-500 text-white",
            Self::Warning => "bg-yellow-500 text-white",
            Self::Info => "bg-blue-500 text-white",
        }
    }
}

/// Show an auto-dismissing toast in the top-right corner.
///
/// Purely visual: the element fades after three seconds and is removed
/// once the fade completes, unless something else already detached it.
pub fn show<P: Page + 'static>(page: &Rc<P>, text: &str, kind: ToastKind) {
    let toast = page.create_element("div");
    page.set_attr(
        &toast,
        "class",
        &format!(
            "fixed top-4 right-4 px-6 py-3 rounded-lg shadow-lg z-50 transform transition-all duration-300 {}",
            kind.color_classes()
        ),
    );
    page.set_text(&toast, text);
    page.append_body(&toast);

    let fade = {
        let page = Rc::clone(page);
        let toast = toast.clone();
        move || {
            page.set_style(&toast, "opacity", "0");
            page.set_style(&toast, "transform", "translateX(100%)");
            let remove = {
                let page = Rc::clone(&page);
                let toast = toast.clone();
                move || {
                    if page.contains(&toast) {
                        page.remove(&toast);
                    }
                }
            };
            let _ = page.schedule(FADE_MS, Box::new(remove));
        }
    };
    let _ = page.schedule(DISMISS_DELAY_MS, Box::new(fade));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::MemoryPage;

    #[test]
    fn toast_fades_then_removes_itself() {
        let page = Rc::new(MemoryPage::new());
        show(&page, "Settings saved", ToastKind::Success);

        let toast = page.query(".bg-green-500").expect("toast visible");
        assert_eq!(page.text(&toast), "Settings saved");

        page.advance(u64::from(DISMISS_DELAY_MS));
        assert_eq!(page.style(&toast, "opacity").as_deref(), Some("0"));
        assert!(page.contains(&toast));

        page.advance(u64::from(FADE_MS));
        assert!(!page.contains(&toast));
    }

    #[test]
    fn early_detach_does_not_break_removal() {
        let page = Rc::new(MemoryPage::new());
        show(&page, "going away", ToastKind::Warning);
        let toast = page.query(".bg-yellow-500").expect("toast visible");
        page.remove(&toast);
        page.advance(u64::from(DISMISS_DELAY_MS + FADE_MS));
    }

    #[test]
    fn kinds_map_to_distinct_colors() {
        let page = Rc::new(MemoryPage::new());
        show(&page, "a", ToastKind::Error);
        show(&page, "b", ToastKind::Info);
        assert!(page.query(".bg-red-500").is_some());
        assert!(page.query(".bg-blue-500").is_some());
    }
}
