use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlDocument, Storage, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// The document as an `HtmlDocument`, needed for cookie access.
#[must_use]
pub fn html_document() -> Option<HtmlDocument> {
    document().and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
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

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Access the browser `sessionStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `sessionStorage` is unavailable.
pub fn session_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .session_storage()?
        .ok_or_else(|| JsValue::from_str("sessionStorage unavailable"))
}

/// Look up a global function such as `gtag` or `ym`. Returns `None` when the
/// SDK has not been loaded.
#[must_use]
pub fn global_function(name: &str) -> Option<js_sys::Function> {
    let win = window()?;
    js_sys::Reflect::get(&win, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}
