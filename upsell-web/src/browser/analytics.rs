use super::BrowserError;
use crate::dom;
use upsell_core::{AnalyticsReporter, TrackedEvent};
use wasm_bindgen::JsValue;

/// Reports to Google Analytics (`gtag`) and Yandex Metrika (`ym`).
///
/// Either SDK may be missing (blocked, not yet loaded); that SDK is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtagMetrikaReporter;

impl AnalyticsReporter for GtagMetrikaReporter {
    type Error = BrowserError;

    #[allow(clippy::cast_precision_loss)]
    fn report(&self, event: &TrackedEvent) -> Result<(), Self::Error> {
        if let Some(gtag) = dom::global_function("gtag") {
            gtag.call2(
                &JsValue::NULL,
                &JsValue::from_str("event"),
                &JsValue::from_str(&event.name),
            )?;
        } else {
            log::debug!("gtag not loaded, skipping {}", event.name);
        }

        match (dom::global_function("ym"), event.counter) {
            (Some(ym), Some(counter)) => {
                ym.call3(
                    &JsValue::NULL,
                    &JsValue::from_f64(counter as f64),
                    &JsValue::from_str("reachGoal"),
                    &JsValue::from_str(&event.goal),
                )?;
            }
            (None, Some(_)) => log::debug!("ym not loaded, skipping goal {}", event.goal),
            (_, None) => {}
        }
        Ok(())
    }
}
