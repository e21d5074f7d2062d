//! Purchase order records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Statuses that count as "still pending" on the manager dashboard.
const PENDING_STATUSES: &[&str] = &["pending", "created", "awaiting", "open"];

/// Canonical purchase order record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,

    pub po_number: String,

    /// Display name of the supplier, `"N/A"` when unknown.
    pub supplier_name: String,

    pub supplier_id: Option<String>,

    pub expected_date: Option<DateTime<Utc>>,

    /// Free-form status as sent by the server.
    pub status: String,

    pub notes: Option<String>,
}

impl PurchaseOrder {
    /// True when the status is one of the open states, compared case-insensitively.
    pub fn is_pending(&self) -> bool {
        let status = self.status.trim().to_lowercase();
        PENDING_STATUSES.contains(&status.as_str())
    }
}

/// Status values the purchase order form can submit.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PurchaseOrderStatus {
    #[default]
    Pending,
    Approved,
    Received,
    Cancelled,
}
impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PurchaseOrderStatus::Pending => "Pending",
                PurchaseOrderStatus::Approved => "Approved",
                PurchaseOrderStatus::Received => "Received",
                PurchaseOrderStatus::Cancelled => "Cancelled",
            }
        )
    }
}
impl std::str::FromStr for PurchaseOrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PurchaseOrderStatus::Pending),
            "approved" => Ok(PurchaseOrderStatus::Approved),
            "received" => Ok(PurchaseOrderStatus::Received),
            "cancelled" | "canceled" => Ok(PurchaseOrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Payload for `POST /purchase-orders` and `PUT /purchase-orders/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderInput {
    pub order_number: String,
    pub supplier_id: i64,
    pub expected_date: NaiveDate,
    pub notes: String,
    pub status: PurchaseOrderStatus,
}
