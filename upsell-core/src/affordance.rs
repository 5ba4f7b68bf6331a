//! Continue control state and the label templates that feed it
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived state of the single continue control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueAffordance {
    pub enabled: bool,
    pub label: String,
}

impl ContinueAffordance {
    /// Derive the affordance from the number of selected products and their total.
    #[must_use]
    pub fn derive(selected_count: usize, total_price: u64, labels: &AffordanceLabels) -> Self {
        if selected_count == 0 {
            Self {
                enabled: false,
                label: labels.empty.clone(),
            }
        } else {
            Self {
                enabled: true,
                label: labels.continue_label(total_price),
            }
        }
    }
}

/// Presentation texts for the continue control and the product buttons.
///
/// Templates use `{name}` (or `{{name}}`) placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordanceLabels {
    /// Shown on the disabled control while nothing is selected
    pub empty: String,
    /// Enabled control text; `{total}` and `{currency}` are substituted
    pub continue_template: String,
    /// Product button text while the product is selected
    pub selected: String,
    /// Product button text while the price is shown; `{price}` and `{currency}`
    pub price_template: String,
    pub currency: String,
}

impl Default for AffordanceLabels {
    fn default() -> Self {
        Self {
            empty: "Select at least one product".to_string(),
            continue_template: "Continue for {total} {currency}".to_string(),
            selected: "Selected".to_string(),
            price_template: "{price} {currency}".to_string(),
            currency: "₽".to_string(),
        }
    }
}

impl AffordanceLabels {
    #[must_use]
    pub fn continue_label(&self, total_price: u64) -> String {
        let total = total_price.to_string();
        let mut vars = BTreeMap::new();
        vars.insert("total", total.as_str());
        vars.insert("currency", self.currency.as_str());
        render_template(&self.continue_template, &vars)
    }

    #[must_use]
    pub fn price_label(&self, price: u32) -> String {
        let price = price.to_string();
        let mut vars = BTreeMap::new();
        vars.insert("price", price.as_str());
        vars.insert("currency", self.currency.as_str());
        render_template(&self.price_template, &vars)
    }
}

/// Substitute `{key}` and `{{key}}` placeholders. Unknown placeholders are left as-is.
#[must_use]
pub fn render_template(template: &str, vars: &BTreeMap<&str, &str>) -> String {
    let mut text = template.to_string();
    for (k, v) in vars {
        let ph1 = format!("{{{{{k}}}}}");
        let ph2 = format!("{{{k}}}");
        text = text.replace(&ph1, v);
        text = text.replace(&ph2, v);
    }
    text
}
