//! Where the landing configuration comes from
//!
//! A host page can embed its own configuration in
//! `<script type="application/json" id="landing-config">`; otherwise the copy
//! bundled at build time is used.
use upsell_core::{ConfigError, LandingConfig};

/// Id of the inline configuration element in the host page.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Configuration bundled into the binary.
pub const EMBEDDED_CONFIG: &str = include_str!("../static/landing.json");

/// Parse the bundled configuration.
///
/// # Errors
/// Returns an error if the bundled JSON is malformed or invalid.
pub fn embedded_config() -> Result<LandingConfig, ConfigError> {
    LandingConfig::from_json(EMBEDDED_CONFIG)
}

/// Prefer the host page's inline configuration, falling back to the bundled one.
///
/// # Errors
/// Returns an error if the chosen configuration cannot be parsed.
pub fn load_landing_config() -> Result<LandingConfig, ConfigError> {
    match host_config_text() {
        Some(text) => LandingConfig::from_json(&text),
        None => embedded_config(),
    }
}

#[cfg(target_arch = "wasm32")]
fn host_config_text() -> Option<String> {
    let element = crate::dom::document()?.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element
        .text_content()
        .filter(|text| !text.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
const fn host_config_text() -> Option<String> {
    None
}
