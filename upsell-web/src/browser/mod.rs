//! Browser implementations of the selection core's collaborators
//!
//! Analytics goes to `gtag`/`ym` when those SDKs are loaded, the confirmed
//! selection is recorded through a JSONP request, the completion flag is
//! written to every storage mechanism the browser offers, and navigation is a
//! plain `location.href` assignment.

mod analytics;
mod clock;
mod completion;
mod navigation;
mod recorder;

pub use analytics::GtagMetrikaReporter;
pub use clock::JsClock;
pub use completion::{BrowserCompletionStore, completion_cookie, cookie_has_flag};
pub use navigation::LocationNavigator;
pub use recorder::JsonpRecorder;

use upsell_core::{Collaborators, LandingConfig, LandingSession};
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("browser {0} unavailable")]
    Unavailable(&'static str),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for BrowserError {
    fn from(value: JsValue) -> Self {
        Self::Js(crate::dom::js_error_message(&value))
    }
}

/// Session type used by the web front end.
pub type WebSession = LandingSession<
    GtagMetrikaReporter,
    JsonpRecorder,
    BrowserCompletionStore,
    LocationNavigator,
    JsClock,
>;

/// Wire a session to the browser collaborators described by `config`.
#[must_use]
pub fn web_session(config: &LandingConfig) -> WebSession {
    LandingSession::new(
        config,
        Collaborators {
            reporter: GtagMetrikaReporter,
            recorder: JsonpRecorder::new(&config.recorder),
            completion: BrowserCompletionStore::new(&config.completion),
            navigator: LocationNavigator::new(&config.navigation),
            clock: JsClock,
        },
    )
}
