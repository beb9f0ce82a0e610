//! Live-region announcement service.

use std::cell::RefCell;
use std::rc::Rc;

use crate::page::Page;

/// Id of the live-region element established by the accessibility
/// bootstrap. The announcer is the only writer after creation.
pub const LIVE_REGION_ID: &str = "aria-live-region";

/// Delay between clearing the live region and writing the new message.
///
/// Assistive technology often skips re-announcing a value identical to
/// the one already present; clearing first and writing after a beat makes
/// every message perceptible, repeats included.
pub const ANNOUNCE_DELAY_MS: u32 = 10;

/// Posts messages to the page's live region for assistive technology.
///
/// The live region is looked up per call, so a page where bootstrap never
/// ran degrades to a no-op. A call made while a previous deferred write is
/// still pending cancels that write; the region always ends at the most
/// recent message.
pub struct Announcer<P: Page> {
    page: Rc<P>,
    pending: RefCell<Option<P::Timer>>,
}

impl<P: Page + 'static> Announcer<P> {
    pub fn new(page: Rc<P>) -> Rc<Self> {
        Rc::new(Self {
            page,
            pending: RefCell::new(None),
        })
    }

    /// Announce `message` through the live region.
    pub fn announce(self: &Rc<Self>, message: &str) {
        let Some(region) = self.page.by_id(LIVE_REGION_ID) else {
            return;
        };
        self.page.set_text(&region, "");
        if let Some(previous) = self.pending.borrow_mut().take() {
            self.page.cancel(previous);
        }
        let weak = Rc::downgrade(self);
        let message = message.to_owned();
        let timer = self.page.schedule(
            ANNOUNCE_DELAY_MS,
            Box::new(move || {
                if let Some(announcer) = weak.upgrade() {
                    announcer.pending.borrow_mut().take();
                    if let Some(region) = announcer.page.by_id(LIVE_REGION_ID) {
                        announcer.page.set_text(&region, &message);
                    }
                }
            }),
        );
        *self.pending.borrow_mut() = timer;
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static BOUND: RefCell<Option<Rc<Announcer<crate::page::browser::BrowserPage>>>> =
        const { RefCell::new(None) };
}

/// Bind the announcer built at startup to the page-global `announce`
/// export.
#[cfg(target_arch = "wasm32")]
pub fn bind(announcer: Rc<Announcer<crate::page::browser::BrowserPage>>) {
    BOUND.with(|slot| *slot.borrow_mut() = Some(announcer));
}

/// Announce through the bound instance, if startup has run.
#[cfg(target_arch = "wasm32")]
pub fn announce(message: &str) {
    BOUND.with(|slot| {
        if let Some(announcer) = slot.borrow().as_ref() {
            announcer.announce(message);
        }
    });
}
