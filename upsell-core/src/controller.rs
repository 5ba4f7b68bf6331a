//! Selection state machine and total-price computation
use crate::affordance::{AffordanceLabels, ContinueAffordance};
use crate::catalog::{Catalog, Product};
use crate::summary::Summary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Display state of a single product button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductState {
    #[default]
    PriceShown,
    Selected,
}

impl ProductState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::PriceShown => Self::Selected,
            Self::Selected => Self::PriceShown,
        }
    }

    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Selected)
    }

    /// Value of the `data-state` attribute on the product button.
    #[must_use]
    pub const fn data_state(self) -> &'static str {
        match self {
            Self::PriceShown => "price",
            Self::Selected => "selected",
        }
    }
}

/// What the presentation layer should show for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDisplay {
    pub product_id: String,
    pub price: u32,
    pub state: ProductState,
    pub label: String,
}

/// Owns the selection set for one visit.
///
/// The catalog is closed over at initialization, so every identifier in the
/// selection is always a known product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    catalog: Catalog,
    selected: BTreeSet<String>,
    labels: AffordanceLabels,
}

impl SelectionController {
    /// Start with an empty selection. An empty product list is accepted; the
    /// continue control simply never enables.
    #[must_use]
    pub fn initialize(products: impl IntoIterator<Item = Product>, labels: AffordanceLabels) -> Self {
        Self::with_catalog(Catalog::new(products), labels)
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog, labels: AffordanceLabels) -> Self {
        if catalog.is_empty() {
            log::debug!("selection controller initialized with an empty catalog");
        }
        Self {
            catalog,
            selected: BTreeSet::new(),
            labels,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn labels(&self) -> &AffordanceLabels {
        &self.labels
    }

    #[must_use]
    pub const fn selection(&self) -> &BTreeSet<String> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, product_id: &str) -> bool {
        self.selected.contains(product_id)
    }

    /// Flip one product. Unknown identifiers leave the state untouched and
    /// return `None`.
    pub fn toggle(&mut self, product_id: &str) -> Option<ProductDisplay> {
        if !self.catalog.contains(product_id) {
            log::debug!("toggle ignored for unknown product {product_id:?}");
            return None;
        }
        if !self.selected.remove(product_id) {
            self.selected.insert(product_id.to_string());
        }
        self.display(product_id)
    }

    /// Sum of unit prices over the current selection.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.selected
            .iter()
            .filter_map(|id| self.catalog.price_of(id))
            .map(u64::from)
            .sum()
    }

    #[must_use]
    pub fn affordance_state(&self) -> ContinueAffordance {
        ContinueAffordance::derive(self.selected.len(), self.total_price(), &self.labels)
    }

    #[must_use]
    pub fn product_state(&self, product_id: &str) -> Option<ProductState> {
        self.catalog.contains(product_id).then(|| {
            if self.is_selected(product_id) {
                ProductState::Selected
            } else {
                ProductState::PriceShown
            }
        })
    }

    /// Button text for one product: the selected label or its price label.
    #[must_use]
    pub fn product_label(&self, product_id: &str) -> Option<String> {
        let product = self.catalog.find(product_id)?;
        Some(if self.is_selected(product_id) {
            self.labels.selected.clone()
        } else {
            self.labels.price_label(product.price)
        })
    }

    #[must_use]
    pub fn display(&self, product_id: &str) -> Option<ProductDisplay> {
        let product = self.catalog.find(product_id)?;
        Some(ProductDisplay {
            product_id: product.id.clone(),
            price: product.price,
            state: self.product_state(product_id)?,
            label: self.product_label(product_id)?,
        })
    }

    /// Display rows for every product in catalog order.
    #[must_use]
    pub fn displays(&self) -> Vec<ProductDisplay> {
        self.catalog
            .iter()
            .filter_map(|product| self.display(&product.id))
            .collect()
    }

    /// Snapshot the selection. Returns `None` while nothing is selected.
    #[must_use]
    pub fn confirm(&self, timestamp: DateTime<Utc>) -> Option<Summary> {
        if self.selected.is_empty() {
            return None;
        }
        Some(Summary {
            selected_ids: self.selected.clone(),
            total_price: self.total_price(),
            timestamp,
        })
    }
}
