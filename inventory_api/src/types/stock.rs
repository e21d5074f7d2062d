//! Inventory batches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical stock batch record. A product has many batches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBatch {
    /// Batch number, falling back to the record id or a `BATCH-n` placeholder.
    pub batch_number: String,

    pub product_id: Option<String>,

    pub quantity: i64,

    pub cost_price: Option<f64>,

    pub expiry_date: Option<NaiveDate>,

    pub location: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /api/stock/batch`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInput {
    pub product_id: String,
    pub quantity: i64,
    pub cost_price: f64,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: NaiveDate,
    pub location: Option<String>,
}
