use chrono::{DateTime, Utc};
use upsell_core::Clock;

/// Reads time from the JavaScript `Date`, since the OS clock is unavailable in wasm.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> DateTime<Utc> {
        let millis = js_sys::Date::now() as i64;
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}
