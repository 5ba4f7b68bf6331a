use super::BrowserError;
use crate::dom;
use upsell_core::{RecordPayload, RecorderConfig, RemoteRecorder};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, UrlSearchParams};

/// Sends the confirmed selection as a JSONP GET request.
///
/// The request is a `<script>` tag appended to `<head>`; it removes itself
/// once loaded or failed. The endpoint's reply arrives through a global
/// callback and is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonpRecorder {
    endpoint: Option<String>,
    callback: String,
}

impl JsonpRecorder {
    #[must_use]
    pub fn new(config: &RecorderConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            callback: config.callback.clone(),
        }
    }

    /// Full request URL including the callback parameter.
    ///
    /// # Errors
    /// Returns an error if `URLSearchParams` is unavailable.
    pub fn request_url(
        &self,
        endpoint: &str,
        payload: &RecordPayload,
    ) -> Result<String, BrowserError> {
        let params = UrlSearchParams::new()?;
        for (key, value) in payload.query_pairs() {
            params.append(&key, &value);
        }
        params.append("callback", &self.callback);
        Ok(format!("{endpoint}?{}", String::from(params.to_string())))
    }

    fn install_callback(&self) -> Result<(), BrowserError> {
        let win = dom::window().ok_or(BrowserError::Unavailable("window"))?;
        let callback = Closure::<dyn FnMut(JsValue)>::new(|response: JsValue| {
            let text = js_sys::JSON::stringify(&response)
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_else(|| dom::js_error_message(&response));
            log::info!("recorder responded: {text}");
        });
        js_sys::Reflect::set(&win, &JsValue::from_str(&self.callback), callback.as_ref())?;
        callback.forget();
        Ok(())
    }
}

impl RemoteRecorder for JsonpRecorder {
    type Error = BrowserError;

    fn record(&self, payload: &RecordPayload) -> Result<(), Self::Error> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            log::debug!("no recorder endpoint configured, skipping record");
            return Ok(());
        };
        let url = self.request_url(endpoint, payload)?;
        log::debug!("recording selection via {url}");

        self.install_callback()?;

        let doc = dom::document().ok_or(BrowserError::Unavailable("document"))?;
        let head = doc.head().ok_or(BrowserError::Unavailable("document head"))?;
        let script: HtmlScriptElement = doc
            .create_element("script")?
            .dyn_into()
            .map_err(|_| BrowserError::Js("created element is not a script".to_string()))?;
        script.set_src(&url);

        let onload = {
            let script = script.clone();
            Closure::once(move || {
                log::debug!("recorder script loaded");
                script.remove();
            })
        };
        let onerror = {
            let script = script.clone();
            Closure::once(move || {
                dom::console_error("recorder script failed to load");
                script.remove();
            })
        };
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        head.append_child(&script)?;
        Ok(())
    }
}
