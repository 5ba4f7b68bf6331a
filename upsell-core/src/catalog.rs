//! Product catalog offered on the landing page
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single optional add-on product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Unit price in whole currency units
    pub price: u32,
    /// Human-readable name, used for accessibility labels
    #[serde(default)]
    pub label: String,
}

impl Product {
    #[must_use]
    pub fn new(id: impl Into<String>, price: u32, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            price,
            label: label.into(),
        }
    }
}

/// Ordered, closed set of products fixed for the whole session.
///
/// Order is presentation order and also the column order of the remote record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the first product for any repeated identifier.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            if catalog.index.contains_key(&product.id) {
                log::warn!("duplicate product id {:?} ignored", product.id);
                continue;
            }
            catalog
                .index
                .insert(product.id.clone(), catalog.products.len());
            catalog.products.push(product);
        }
        catalog
    }

    /// Find a product by identifier.
    #[must_use]
    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.index.get(product_id).map(|&idx| &self.products[idx])
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.index.contains_key(product_id)
    }

    #[must_use]
    pub fn price_of(&self, product_id: &str) -> Option<u32> {
        self.find(product_id).map(|product| product.price)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        Self::new(iter)
    }
}
