// Browser plumbing shared by the wasm-facing modules

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Request, Response, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Retrieve the document object for DOM interactions.
///
/// # Panics
/// Panics when the document cannot be accessed from the current browser window.
#[must_use]
pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Run `callback` once the DOM has been parsed, or immediately if the
/// document is already interactive or complete.
pub fn on_document_ready(callback: impl FnOnce() + 'static) {
    let doc = document();
    if doc.ready_state() == "loading" {
        let once = Closure::once(callback);
        if let Err(err) =
            doc.add_event_listener_with_callback("DOMContentLoaded", once.as_ref().unchecked_ref())
        {
            console_error(&format!(
                "Failed to defer startup to DOMContentLoaded: {}",
                js_error_message(&err)
            ));
        }
        once.forget();
    } else {
        callback();
    }
}

/// Schedule a one-shot callback after `delay_ms` milliseconds.
///
/// Returns the timer handle for [`clear_timeout`], or `None` when the
/// timer could not be scheduled.
pub fn set_timeout(callback: impl FnOnce() + 'static, delay_ms: i32) -> Option<i32> {
    let once = Closure::once(callback);
    let scheduled = window()
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            once.as_ref().unchecked_ref(),
            delay_ms,
        );
    once.forget();
    match scheduled {
        Ok(id) => Some(id),
        Err(err) => {
            console_error(&format!(
                "Failed to schedule deferred callback: {}",
                js_error_message(&err)
            ));
            None
        }
    }
}

/// Cancel a timer previously returned by [`set_timeout`].
pub fn clear_timeout(id: i32) {
    window().clear_timeout_with_handle(id);
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if the fetch request fails or the response cannot be converted to `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch(request: &Request) -> Result<Response, JsValue> {
    let resp_value = JsFuture::from(window().fetch_with_request(request)).await?;
    resp_value.dyn_into::<Response>()
}
