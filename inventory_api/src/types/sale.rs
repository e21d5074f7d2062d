//! Sales transactions and the POS checkout payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical sale/transaction record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    pub date: Option<DateTime<Utc>>,

    /// 0 when the source field was missing or not numeric.
    pub amount: f64,

    pub status: TransactionStatus,

    pub cashier: Option<String>,

    pub item_count: Option<i64>,

    pub tax: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionStatus {
    Completed,
    Pending,
    #[serde(rename = "N/A")]
    NotAvailable,
}
impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionStatus::Completed => "Completed",
                TransactionStatus::Pending => "Pending",
                TransactionStatus::NotAvailable => "N/A",
            }
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Cash,
    Card,
}
impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PaymentMode::Cash => "CASH",
                PaymentMode::Card => "CARD",
            }
        )
    }
}
impl std::str::FromStr for PaymentMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "card" => Ok(PaymentMode::Card),
            _ => Err(()),
        }
    }
}

/// One line of a checkout request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub tax_rate: Option<f64>,
}

/// Payload for `POST /api/sales`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub cashier_id: i64,
    pub items: Vec<SaleItem>,
    pub payment_mode: PaymentMode,
    pub discount_total: f64,
}
