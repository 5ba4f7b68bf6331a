//! Landing page configuration
//!
//! Everything presentation- or deployment-specific lives here: experiment tags
//! for analytics, label templates, the recorder endpoint, the completion flag
//! key and the confirmation page. Missing sections fall back to defaults.
use crate::affordance::AffordanceLabels;
use crate::catalog::{Catalog, Product};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("product id must not be empty")]
    EmptyProductId,
    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),
    #[error("continue label template has no {{total}} placeholder")]
    MissingTotalPlaceholder,
    #[error("recorder endpoint is blank")]
    BlankRecorderEndpoint,
    #[error("cookie max age of {0} days exceeds the 400-day browser limit")]
    CookieMaxAgeOutOfRange(u32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub experiment: ExperimentConfig,
    pub labels: AffordanceLabels,
    pub recorder: RecorderConfig,
    pub completion: CompletionConfig,
    pub navigation: NavigationConfig,
    pub products: Vec<Product>,
}

impl LandingConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`LandingConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for product in &self.products {
            if product.id.trim().is_empty() {
                return Err(ConfigError::EmptyProductId);
            }
            if !seen.insert(product.id.as_str()) {
                return Err(ConfigError::DuplicateProduct(product.id.clone()));
            }
        }
        if !self.labels.continue_template.contains("{total}") {
            return Err(ConfigError::MissingTotalPlaceholder);
        }
        if self
            .recorder
            .endpoint
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::BlankRecorderEndpoint);
        }
        if self.completion.cookie_max_age_days > CompletionConfig::MAX_COOKIE_AGE_DAYS {
            return Err(ConfigError::CookieMaxAgeOutOfRange(
                self.completion.cookie_max_age_days,
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.products.iter().cloned())
    }
}

/// Experiment tags attached to every analytics notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub variant: u32,
    pub page_view_event: String,
    pub confirm_event: String,
    /// Yandex Metrika counter id; goals are skipped when absent
    pub metrika_counter: Option<u64>,
    pub page_view_goal: String,
    pub confirm_goal: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            variant: 0,
            page_view_event: "page_view_landing".to_string(),
            confirm_event: "click_continue".to_string(),
            metrika_counter: None,
            page_view_goal: "page_view_landing".to_string(),
            confirm_goal: "continue".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Remote endpoint; recording is skipped when absent
    pub endpoint: Option<String>,
    /// Name of the global JSONP callback
    pub callback: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            callback: "callback".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub key: String,
    pub cookie_max_age_days: u32,
}

impl CompletionConfig {
    /// Browsers cap cookie lifetimes at 400 days.
    pub const MAX_COOKIE_AGE_DAYS: u32 = 400;
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            key: "upsell_flow_completed".to_string(),
            cookie_max_age_days: 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub confirmation_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            confirmation_path: "stub.html".to_string(),
        }
    }
}
