//! Confirmed selection snapshot and its remote-record form
use crate::catalog::Catalog;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot produced by a successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub selected_ids: BTreeSet<String>,
    pub total_price: u64,
    pub timestamp: DateTime<Utc>,
}

impl Summary {
    /// Flatten into the per-product flag row sent to the remote recorder.
    #[must_use]
    pub fn to_record(&self, catalog: &Catalog, variant: u32) -> RecordPayload {
        RecordPayload {
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            variant,
            flags: catalog
                .iter()
                .map(|product| {
                    let flag = u8::from(self.selected_ids.contains(&product.id));
                    (product.id.clone(), flag)
                })
                .collect(),
            total_price: self.total_price,
        }
    }
}

/// One row of business tracking: a 0/1 flag for every known product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    /// ISO-8601 with millisecond precision and a `Z` suffix
    pub timestamp: String,
    pub variant: u32,
    /// Flags in catalog order
    pub flags: Vec<(String, u8)>,
    pub total_price: u64,
}

impl RecordPayload {
    /// Ordered query parameters: timestamp, variant, one per product, totalPrice.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.flags.len() + 3);
        pairs.push(("timestamp".to_string(), self.timestamp.clone()));
        pairs.push(("variant".to_string(), self.variant.to_string()));
        for (id, flag) in &self.flags {
            pairs.push((id.clone(), flag.to_string()));
        }
        pairs.push(("totalPrice".to_string(), self.total_price.to_string()));
        pairs
    }
}
