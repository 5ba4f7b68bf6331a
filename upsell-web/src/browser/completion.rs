use super::BrowserError;
use crate::dom;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use upsell_core::{CompletionConfig, CompletionStore};
use web_sys::Storage;

/// Completion flag mirrored into `localStorage`, `sessionStorage` and a cookie.
///
/// Any single mechanism reporting the flag counts as completed; writing
/// succeeds as long as one mechanism accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCompletionStore {
    key: String,
    cookie_max_age_days: u32,
}

impl BrowserCompletionStore {
    #[must_use]
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            key: config.key.clone(),
            cookie_max_age_days: config.cookie_max_age_days,
        }
    }

    fn time_key(&self) -> String {
        format!("{}_time", self.key)
    }

    fn storages() -> [(&'static str, Result<Storage, BrowserError>); 2] {
        [
            ("localStorage", dom::local_storage().map_err(BrowserError::from)),
            ("sessionStorage", dom::session_storage().map_err(BrowserError::from)),
        ]
    }
}

impl CompletionStore for BrowserCompletionStore {
    type Error = BrowserError;

    fn is_completed(&self) -> Result<bool, Self::Error> {
        let mut last_error = None;
        let mut readable = false;

        for (name, storage) in Self::storages() {
            match storage.and_then(|s| s.get_item(&self.key).map_err(BrowserError::from)) {
                Ok(Some(_)) => return Ok(true),
                Ok(None) => readable = true,
                Err(e) => {
                    log::debug!("{name} unreadable: {e}");
                    last_error = Some(e);
                }
            }
        }

        match dom::html_document().map(|doc| doc.cookie()) {
            Some(Ok(cookies)) => {
                if cookie_has_flag(&cookies, &self.key) {
                    return Ok(true);
                }
                readable = true;
            }
            Some(Err(e)) => last_error = Some(e.into()),
            None => last_error = Some(BrowserError::Unavailable("document")),
        }

        match last_error {
            Some(e) if !readable => Err(e),
            _ => Ok(false),
        }
    }

    fn mark_completed(&self, at: DateTime<Utc>) -> Result<(), Self::Error> {
        let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut last_error = None;
        let mut written = false;

        for (name, storage) in Self::storages() {
            let result = storage.and_then(|s| {
                s.set_item(&self.key, "true")?;
                s.set_item(&self.time_key(), &stamp)?;
                Ok(())
            });
            match result {
                Ok(()) => written = true,
                Err(e) => {
                    log::warn!("could not write completion flag to {name}: {e}");
                    last_error = Some(e);
                }
            }
        }

        let cookie = completion_cookie(&self.key, at, self.cookie_max_age_days);
        match dom::html_document().map(|doc| doc.set_cookie(&cookie)) {
            Some(Ok(())) => written = true,
            Some(Err(e)) => last_error = Some(e.into()),
            None => last_error = Some(BrowserError::Unavailable("document")),
        }

        match last_error {
            Some(e) if !written => Err(e),
            _ => Ok(()),
        }
    }
}

/// Cookie string carrying the completion flag until `at + max_age_days`.
///
/// The lifetime is capped at the browser limit and the expiry saturates at the
/// latest representable date.
#[must_use]
pub fn completion_cookie(key: &str, at: DateTime<Utc>, max_age_days: u32) -> String {
    let days = max_age_days.min(CompletionConfig::MAX_COOKIE_AGE_DAYS);
    let expires = at
        .checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    format!(
        "{key}=true; expires={}; path=/; SameSite=Lax",
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// Whether a `document.cookie` string holds `key=true`.
#[must_use]
pub fn cookie_has_flag(cookies: &str, key: &str) -> bool {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == key && value == "true")
}
