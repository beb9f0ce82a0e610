//! Scroll-progress indicator.

use std::rc::Rc;

use crate::page::{Page, ScrollMetrics};

const PROGRESS_BAR_ID: &str = "scroll-progress";

/// Fraction of the scrollable range covered, as a CSS percentage value.
///
/// Content shorter than the viewport has no scrollable range and reports
/// zero.
#[must_use]
pub fn scroll_percent(metrics: &ScrollMetrics) -> f64 {
    let scrollable = metrics.scroll_height - metrics.viewport_height;
    if scrollable > 0.0 {
        (metrics.scroll_top / scrollable) * 100.0
    } else {
        0.0
    }
}

/// Keep the progress bar's width synchronized with vertical scroll
/// position. No-ops entirely on pages without the bar.
///
/// The listener is passive and recomputes from current metrics on every
/// event; nothing is accumulated between events.
pub fn install<P: Page + 'static>(page: &Rc<P>) {
    let Some(bar) = page.by_id(PROGRESS_BAR_ID) else {
        return;
    };
    page.add_class(&bar, "enhanced-bar");
    let update = {
        let page = Rc::clone(page);
        move || {
            let percent = scroll_percent(&page.scroll_metrics());
            page.set_style(&bar, "width", &format!("{percent}%"));
        }
    };
    update();
    page.on_scroll(Rc::new(update));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::MemoryPage;

    fn metrics(top: f64, height: f64, viewport: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: top,
            scroll_height: height,
            viewport_height: viewport,
        }
    }

    #[test]
    fn percent_spans_zero_to_hundred() {
        assert_eq!(scroll_percent(&metrics(0.0, 2000.0, 800.0)), 0.0);
        assert_eq!(scroll_percent(&metrics(600.0, 2000.0, 800.0)), 50.0);
        assert_eq!(scroll_percent(&metrics(1200.0, 2000.0, 800.0)), 100.0);
    }

    #[test]
    fn short_content_always_reports_zero() {
        assert_eq!(scroll_percent(&metrics(0.0, 500.0, 800.0)), 0.0);
        assert_eq!(scroll_percent(&metrics(10.0, 800.0, 800.0)), 0.0);
    }

    #[test]
    fn percent_is_monotonic_in_offset() {
        let mut last = -1.0;
        for step in 0..=12 {
            let top = f64::from(step) * 100.0;
            let percent = scroll_percent(&metrics(top, 2000.0, 800.0));
            assert!(percent >= last);
            last = percent;
        }
    }

    #[test]
    fn bar_width_tracks_scroll_events() {
        let page = Rc::new(MemoryPage::new());
        let bar = page.insert(&page.body(), "div");
        page.set_attr(&bar, "id", "scroll-progress");
        page.set_scroll_state(metrics(0.0, 2000.0, 800.0));

        install(&page);
        assert_eq!(page.style(&bar, "width").as_deref(), Some("0%"));
        assert!(page.attr(&bar, "class").as_deref().unwrap_or_default().contains("enhanced-bar"));

        page.scroll_to(300.0);
        assert_eq!(page.style(&bar, "width").as_deref(), Some("25%"));
        page.scroll_to(1200.0);
        assert_eq!(page.style(&bar, "width").as_deref(), Some("100%"));
    }

    #[test]
    fn missing_bar_installs_nothing() {
        let page = Rc::new(MemoryPage::new());
        install(&page);
        page.scroll_to(500.0);
    }
}
