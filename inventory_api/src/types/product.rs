//! Product catalog records.

use serde::{Deserialize, Serialize};

/// Canonical product record, as produced by the normalizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    pub name: String,

    pub sku: String,

    /// Never negative.
    pub unit_price: f64,

    /// Percentage, e.g. `5.0` for 5%.
    pub tax_rate: Option<f64>,

    pub category: String,

    pub reorder_level: i64,

    pub is_active: bool,

    pub barcode: Option<String>,

    pub description: Option<String>,
}

/// Payload for `POST /products` and `PUT /products/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub unit_price: f64,
    pub tax_rate: Option<f64>,
    pub reorder_level: i64,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}
