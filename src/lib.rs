#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod announcer;
pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod enhance;
pub mod page;
pub mod toast;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Server-rendered pages may still be parsing when the module loads
    dom::on_document_ready(|| {
        let page = std::rc::Rc::new(page::browser::BrowserPage::new());
        let announcer = enhance::run(&page);
        announcer::bind(announcer);
    });
}

/// Announce `message` through the live region established at startup.
///
/// Exported so non-wasm scripts on the page can reach the announcement
/// service. A no-op until the enhancement sequence has run.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn announce(message: String) {
    announcer::announce(&message);
}
