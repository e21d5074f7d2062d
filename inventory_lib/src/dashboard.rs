//! Dashboard summaries assembled from several independent requests.
//!
//! The requests run concurrently and each one only feeds its own figures: a
//! failed supplier fetch zeroes the supplier count but still shows orders.

use std::cmp::Ordering;

use inventory_api::types::{Product, PurchaseOrder, Supplier, Transaction, TransactionStatus};
use inventory_api::{Client, ProductQuery, PurchaseOrderQuery, Query, SalesReportQuery};

use crate::controller::ListController;
use crate::entity::COMMON_ENVELOPE_KEYS;
use crate::normalize::{normalize_response, resolve_supplier_names};
use crate::unwrap::unwrap_list_with;

pub const RECENT_ORDERS_PAGE_SIZE: usize = 3;

/// Purchase orders fetched for the manager dashboard in one request.
pub const DASHBOARD_ORDER_LIMIT: i64 = 100;

/// Newest expected date first; orders without a date sort last.
pub fn by_expected_date_desc(a: &PurchaseOrder, b: &PurchaseOrder) -> Ordering {
    match (a.expected_date, b.expected_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug)]
pub struct ManagerSummary {
    pub supplier_count: usize,
    pub pending_order_count: usize,
    pub low_stock_count: usize,
    /// Recent purchase orders, paged [`RECENT_ORDERS_PAGE_SIZE`] at a time.
    pub recent_orders: ListController<PurchaseOrder>,
    /// One message per request that failed.
    pub failures: Vec<String>,
}

pub async fn load_manager_summary(client: &Client) -> ManagerSummary {
    let order_query = PurchaseOrderQuery::default()
        .with_page(0)
        .with_page_size(DASHBOARD_ORDER_LIMIT);
    let (suppliers, orders, low_stock) = tokio::join!(
        client.get_suppliers(),
        client.get_purchase_orders(&order_query),
        client.get_low_stock(),
    );

    let mut failures = Vec::new();

    let suppliers: Vec<Supplier> = match suppliers {
        Ok(resp) => normalize_response(&resp),
        Err(e) => {
            tracing::warn!("Fetching suppliers failed: {}", e);
            failures.push(format!("suppliers: {}", e));
            Vec::new()
        }
    };

    let low_stock_count = match low_stock {
        Ok(resp) => unwrap_list_with(&resp, COMMON_ENVELOPE_KEYS).len(),
        Err(e) => {
            tracing::warn!("Fetching low-stock report failed: {}", e);
            failures.push(format!("low stock: {}", e));
            0
        }
    };

    let mut recent_orders =
        ListController::new(RECENT_ORDERS_PAGE_SIZE).with_sort(by_expected_date_desc);
    if let Err(e) = &orders {
        tracing::warn!("Fetching purchase orders failed: {}", e);
        failures.push(format!("purchase orders: {}", e));
    }
    recent_orders.finish_load(orders.map_err(Into::into));
    recent_orders.update_records(|orders| resolve_supplier_names(orders, &suppliers));
    let pending_order_count = recent_orders
        .records()
        .iter()
        .filter(|o| o.is_pending())
        .count();

    ManagerSummary {
        supplier_count: suppliers.len(),
        pending_order_count,
        low_stock_count,
        recent_orders,
        failures,
    }
}

#[derive(Clone, Debug, Default)]
pub struct SalesSummary {
    pub transactions: Vec<Transaction>,
    pub transaction_count: usize,
    /// Sum of completed transaction amounts.
    pub completed_total: f64,
    pub pending_count: usize,
    /// Active products in the catalogue.
    pub active_product_count: usize,
    pub failures: Vec<String>,
}

/// Sales report for `query` alongside the product catalogue.
pub async fn load_sales_summary(client: &Client, query: &SalesReportQuery) -> SalesSummary {
    let product_query = ProductQuery::default().with_page_size(DASHBOARD_ORDER_LIMIT);
    let (report, products) = tokio::join!(
        client.get_sales_report(query),
        client.get_products(&product_query),
    );

    let mut summary = SalesSummary::default();

    match report {
        Ok(resp) => summary.transactions = normalize_response(&resp),
        Err(e) => {
            tracing::warn!("Fetching sales report failed: {}", e);
            summary.failures.push(format!("sales report: {}", e));
        }
    }
    match products {
        Ok(resp) => {
            let products: Vec<Product> = normalize_response(&resp);
            summary.active_product_count = products.iter().filter(|p| p.is_active).count();
        }
        Err(e) => {
            tracing::warn!("Fetching products failed: {}", e);
            summary.failures.push(format!("products: {}", e));
        }
    }

    summary.transaction_count = summary.transactions.len();
    summary.completed_total = summary
        .transactions
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
        .map(|t| t.amount)
        .sum();
    summary.pending_count = summary
        .transactions
        .iter()
        .filter(|t| t.status == TransactionStatus::Pending)
        .count();
    summary
}
