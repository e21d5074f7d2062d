//! Entity normalizer: maps heterogeneous API records onto the canonical types.
//!
//! Each canonical field has an ordered alias list; the first alias holding a
//! non-null value wins and is then coerced. The canonical (camelCase) name is
//! always first in its list, so normalizing a serialized canonical record
//! returns the same record.

use std::collections::HashMap;

use inventory_api::types::{
    Product, PurchaseOrder, StockBatch, Supplier, Transaction, TransactionStatus,
};
use serde_json::{Map, Value};

use crate::coerce::{
    parse_bool, parse_bool_or_default, parse_date, parse_decimal, parse_decimal_or_default,
    parse_int, parse_int_or_default, parse_text, parse_timestamp,
};
use crate::entity::EntityKind;
use crate::unwrap::{unwrap_list, unwrap_record};

/// A canonical record that can be built from a raw API record.
pub trait Normalize: Sized {
    const KIND: EntityKind;

    /// Builds the canonical record. `index` is the record's position in the
    /// unwrapped list and only feeds the placeholder id.
    ///
    /// Returns `None` when `raw` is not an object (null included).
    fn normalize(raw: &Value, index: usize) -> Option<Self>;
}

/// Normalizes every record of a list, dropping the ones that are not objects.
pub fn normalize_all<T: Normalize>(items: &[Value]) -> Vec<T> {
    let records: Vec<T> = items
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| T::normalize(raw, index))
        .collect();
    if records.len() < items.len() {
        tracing::debug!(
            "Dropped {} non-object {} record(s)",
            items.len() - records.len(),
            T::KIND
        );
    }
    records
}

/// Unwraps a list response and normalizes its records.
pub fn normalize_response<T: Normalize>(response: &Value) -> Vec<T> {
    normalize_all(unwrap_list(response, T::KIND))
}

/// Unwraps a single-record response (create/update/show) and normalizes it.
pub fn normalize_record<T: Normalize>(response: &Value, index: usize) -> Option<T> {
    T::normalize(unwrap_record(response), index)
}

/// Looks up a dotted path such as `supplier.name`.
fn lookup<'a>(record: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

/// The first alias holding a non-null value.
fn first<'a>(record: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| lookup(record, alias))
        .find(|value| !value.is_null())
}

/// First alias that renders as text. Aliases holding objects are skipped so
/// `category` can be either a string or `{ "name": ... }`.
fn first_text(record: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| lookup(record, alias))
        .find_map(|value| parse_text(Some(value)))
}

fn id_or_placeholder(
    record: &Map<String, Value>,
    aliases: &[&str],
    kind: EntityKind,
    index: usize,
) -> String {
    first_text(record, aliases).unwrap_or_else(|| kind.placeholder_id(index))
}

mod aliases {
    pub const PRODUCT_ID: &[&str] = &["id", "productId", "_id"];
    pub const PRODUCT_NAME: &[&str] = &["name", "productName", "title"];
    pub const PRODUCT_SKU: &[&str] = &["sku", "productCode", "code"];
    pub const UNIT_PRICE: &[&str] = &["unitPrice", "price", "sellingPrice"];
    pub const TAX_RATE: &[&str] = &["taxRate", "tax", "gstRate"];
    pub const CATEGORY: &[&str] = &["category.name", "category", "categoryName"];
    pub const REORDER_LEVEL: &[&str] = &["reorderLevel", "reorderPoint", "minStock"];
    pub const IS_ACTIVE: &[&str] = &["isActive", "active", "enabled"];
    pub const BARCODE: &[&str] = &["barcode", "ean", "upc"];
    pub const DESCRIPTION: &[&str] = &["description", "details"];

    pub const TX_ID: &[&str] = &["id", "transactionId", "saleId", "invoiceNumber"];
    pub const TX_DATE: &[&str] = &["date", "saleDate", "createdAt", "timestamp"];
    pub const TX_AMOUNT: &[&str] = &["amount", "total", "netAmount", "net", "grandTotal"];
    pub const TX_STATUS: &[&str] = &["status", "saleStatus", "paymentStatus"];
    pub const TX_COMPLETED: &[&str] = &["completed", "isCompleted"];
    pub const TX_CASHIER: &[&str] = &["cashier.name", "cashierName", "cashier"];
    pub const TX_ITEM_COUNT: &[&str] = &["itemCount", "itemsCount", "items"];
    pub const TX_TAX: &[&str] = &["tax", "taxTotal", "taxAmount"];

    pub const PO_ID: &[&str] = &["id", "orderId"];
    pub const PO_NUMBER: &[&str] = &["poNumber", "orderNumber"];
    pub const PO_SUPPLIER_NAME: &[&str] = &["supplier.name", "supplierName"];
    pub const PO_SUPPLIER_ID: &[&str] = &["supplierId", "supplier.id"];
    pub const PO_EXPECTED_DATE: &[&str] = &["expectedDate", "createdAt", "orderDate"];
    pub const PO_STATUS: &[&str] = &["status", "orderStatus"];
    pub const PO_NOTES: &[&str] = &["notes", "note", "remarks"];

    pub const SUPPLIER_ID: &[&str] = &["id", "supplierId"];
    pub const SUPPLIER_NAME: &[&str] = &["name", "supplierName", "companyName"];
    pub const SUPPLIER_EMAIL: &[&str] = &["email", "emailAddress"];
    pub const SUPPLIER_PHONE: &[&str] = &["phone", "phoneNumber", "mobile"];
    pub const SUPPLIER_CONTACT: &[&str] = &["contactPerson", "contactName", "contact"];
    pub const SUPPLIER_ADDRESS: &[&str] = &["address"];

    pub const BATCH_NUMBER: &[&str] = &["batchNumber", "batchNo", "id"];
    pub const BATCH_PRODUCT_ID: &[&str] = &["productId", "product.id"];
    pub const BATCH_QUANTITY: &[&str] = &["quantity", "qty", "availableQuantity"];
    pub const BATCH_COST: &[&str] = &["costPrice", "cost", "unitCost"];
    pub const BATCH_EXPIRY: &[&str] = &["expiryDate", "expiry", "expiresOn"];
    pub const BATCH_LOCATION: &[&str] = &["location", "storageLocation"];
    pub const BATCH_CREATED_AT: &[&str] = &["createdAt", "receivedAt", "createdDate"];
}

impl Normalize for Product {
    const KIND: EntityKind = EntityKind::Product;

    fn normalize(raw: &Value, index: usize) -> Option<Self> {
        let record = raw.as_object()?;
        Some(Product {
            id: id_or_placeholder(record, aliases::PRODUCT_ID, Self::KIND, index),
            name: first_text(record, aliases::PRODUCT_NAME).unwrap_or_default(),
            sku: first_text(record, aliases::PRODUCT_SKU).unwrap_or_default(),
            unit_price: parse_decimal_or_default(first(record, aliases::UNIT_PRICE), 0.0)
                .max(0.0),
            tax_rate: parse_decimal(first(record, aliases::TAX_RATE)),
            category: first_text(record, aliases::CATEGORY).unwrap_or_default(),
            reorder_level: parse_int_or_default(first(record, aliases::REORDER_LEVEL), 0),
            is_active: parse_bool_or_default(first(record, aliases::IS_ACTIVE), true),
            barcode: first_text(record, aliases::BARCODE),
            description: first_text(record, aliases::DESCRIPTION),
        })
    }
}

fn transaction_status(record: &Map<String, Value>) -> TransactionStatus {
    if let Some(status) = first_text(record, aliases::TX_STATUS) {
        return match status.trim().to_lowercase().as_str() {
            "completed" | "complete" | "paid" | "success" | "successful" | "done" => {
                TransactionStatus::Completed
            }
            "pending" | "processing" | "open" | "awaiting" => TransactionStatus::Pending,
            _ => TransactionStatus::NotAvailable,
        };
    }
    match parse_bool(first(record, aliases::TX_COMPLETED)) {
        Some(true) => TransactionStatus::Completed,
        Some(false) => TransactionStatus::Pending,
        None => TransactionStatus::NotAvailable,
    }
}

/// Item counts arrive either as a number or as the list of sale lines.
fn item_count(record: &Map<String, Value>) -> Option<i64> {
    match first(record, aliases::TX_ITEM_COUNT)? {
        Value::Array(lines) => Some(lines.len() as i64),
        other => parse_int(Some(other)),
    }
}

impl Normalize for Transaction {
    const KIND: EntityKind = EntityKind::Transaction;

    fn normalize(raw: &Value, index: usize) -> Option<Self> {
        let record = raw.as_object()?;
        Some(Transaction {
            id: id_or_placeholder(record, aliases::TX_ID, Self::KIND, index),
            date: parse_timestamp(first(record, aliases::TX_DATE)),
            amount: parse_decimal_or_default(first(record, aliases::TX_AMOUNT), 0.0),
            status: transaction_status(record),
            cashier: first_text(record, aliases::TX_CASHIER),
            item_count: item_count(record),
            tax: parse_decimal(first(record, aliases::TX_TAX)),
        })
    }
}

impl Normalize for PurchaseOrder {
    const KIND: EntityKind = EntityKind::PurchaseOrder;

    fn normalize(raw: &Value, index: usize) -> Option<Self> {
        let record = raw.as_object()?;
        Some(PurchaseOrder {
            id: id_or_placeholder(record, aliases::PO_ID, Self::KIND, index),
            po_number: first_text(record, aliases::PO_NUMBER).unwrap_or_else(|| "N/A".to_string()),
            supplier_name: first_text(record, aliases::PO_SUPPLIER_NAME)
                .unwrap_or_else(|| "N/A".to_string()),
            supplier_id: first_text(record, aliases::PO_SUPPLIER_ID),
            expected_date: parse_timestamp(first(record, aliases::PO_EXPECTED_DATE)),
            status: first_text(record, aliases::PO_STATUS).unwrap_or_else(|| "Pending".to_string()),
            notes: first_text(record, aliases::PO_NOTES),
        })
    }
}

impl Normalize for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;

    fn normalize(raw: &Value, index: usize) -> Option<Self> {
        let record = raw.as_object()?;
        Some(Supplier {
            id: id_or_placeholder(record, aliases::SUPPLIER_ID, Self::KIND, index),
            name: first_text(record, aliases::SUPPLIER_NAME).unwrap_or_default(),
            email: first_text(record, aliases::SUPPLIER_EMAIL).unwrap_or_default(),
            phone: first_text(record, aliases::SUPPLIER_PHONE).unwrap_or_default(),
            contact_person: first_text(record, aliases::SUPPLIER_CONTACT).unwrap_or_default(),
            address: first_text(record, aliases::SUPPLIER_ADDRESS).unwrap_or_default(),
            is_active: parse_bool_or_default(first(record, aliases::IS_ACTIVE), true),
        })
    }
}

impl Normalize for StockBatch {
    const KIND: EntityKind = EntityKind::StockBatch;

    fn normalize(raw: &Value, index: usize) -> Option<Self> {
        let record = raw.as_object()?;
        Some(StockBatch {
            batch_number: id_or_placeholder(record, aliases::BATCH_NUMBER, Self::KIND, index),
            product_id: first_text(record, aliases::BATCH_PRODUCT_ID),
            quantity: parse_int_or_default(first(record, aliases::BATCH_QUANTITY), 0),
            cost_price: parse_decimal(first(record, aliases::BATCH_COST)),
            expiry_date: parse_date(first(record, aliases::BATCH_EXPIRY)),
            location: first_text(record, aliases::BATCH_LOCATION),
            created_at: parse_timestamp(first(record, aliases::BATCH_CREATED_AT)),
        })
    }
}

/// Fills in supplier names for purchase orders that only carry a supplier id.
///
/// Orders whose supplier is not in `suppliers` show the raw supplier id.
pub fn resolve_supplier_names(orders: &mut [PurchaseOrder], suppliers: &[Supplier]) {
    let names: HashMap<&str, &str> = suppliers
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();
    for order in orders.iter_mut().filter(|o| o.supplier_name == "N/A") {
        let Some(supplier_id) = order.supplier_id.as_deref() else {
            continue;
        };
        order.supplier_name = names
            .get(supplier_id)
            .filter(|name| !name.is_empty())
            .copied()
            .unwrap_or(supplier_id)
            .to_string();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn renormalize<T: Normalize + serde::Serialize>(record: &T) -> Option<T> {
        T::normalize(&serde_json::to_value(record).unwrap(), 0)
    }

    #[test]
    fn transaction_from_alias_fields() {
        let raw = json!({"transactionId": "T1", "total": "19.99", "completed": true});
        let tx = Transaction::normalize(&raw, 0).unwrap();
        assert_eq!(tx.id, "T1");
        assert_eq!(tx.amount, 19.99);
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.date, None);
    }

    #[test]
    fn transaction_amount_defaults_to_zero() {
        let tx = Transaction::normalize(&json!({"id": "T2", "amount": "n/a"}), 0).unwrap();
        assert_eq!(tx.amount, 0.0);
        assert_eq!(tx.status, TransactionStatus::NotAvailable);
    }

    #[test]
    fn transaction_status_string_wins_over_flag() {
        let raw = json!({"id": 1, "status": "PENDING", "completed": true});
        let tx = Transaction::normalize(&raw, 0).unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn transaction_report_columns() {
        let raw = json!({
            "id": "#SALE5823",
            "saleDate": "2023-10-27",
            "cashier": {"name": "John Doe"},
            "items": [{"productId": 1}, {"productId": 2}, {"productId": 3}],
            "net": 15.68,
            "tax": 1.57
        });
        let tx = Transaction::normalize(&raw, 0).unwrap();
        assert_eq!(tx.cashier.as_deref(), Some("John Doe"));
        assert_eq!(tx.item_count, Some(3));
        assert_eq!(tx.amount, 15.68);
        assert_eq!(tx.tax, Some(1.57));
        assert_eq!(
            tx.date,
            Some(Utc.with_ymd_and_hms(2023, 10, 27, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn null_and_scalar_records_are_dropped() {
        assert!(Product::normalize(&Value::Null, 0).is_none());
        assert!(Supplier::normalize(&json!(3), 0).is_none());
        let records: Vec<Supplier> =
            normalize_all(&[json!({"id": 1, "name": "A"}), Value::Null, json!("x")]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_ids_get_placeholders() {
        let batches: Vec<StockBatch> =
            normalize_all(&[json!({"quantity": 3}), json!({"batchNumber": "B-7"})]);
        assert_eq!(batches[0].batch_number, "BATCH-1");
        assert_eq!(batches[1].batch_number, "B-7");

        let order = PurchaseOrder::normalize(&json!({}), 4).unwrap();
        assert_eq!(order.id, "PO-5");
        assert_eq!(order.po_number, "N/A");
        assert_eq!(order.supplier_name, "N/A");
        assert_eq!(order.status, "Pending");
    }

    #[test]
    fn batch_falls_back_to_record_id() {
        let batch = StockBatch::normalize(&json!({"id": 42, "qty": "5"}), 0).unwrap();
        assert_eq!(batch.batch_number, "42");
        assert_eq!(batch.quantity, 5);
    }

    #[test]
    fn product_from_alternate_shape() {
        let raw = json!({
            "productId": "P-2",
            "productName": "Whole Wheat Bread",
            "productCode": "SKU-002",
            "price": "3.00",
            "categoryName": "Bakery",
            "reorderPoint": "10",
            "active": false
        });
        let product = Product::normalize(&raw, 0).unwrap();
        assert_eq!(product.id, "P-2");
        assert_eq!(product.name, "Whole Wheat Bread");
        assert_eq!(product.sku, "SKU-002");
        assert_eq!(product.unit_price, 3.0);
        assert_eq!(product.tax_rate, None);
        assert_eq!(product.category, "Bakery");
        assert_eq!(product.reorder_level, 10);
        assert!(!product.is_active);
    }

    #[test]
    fn product_category_object_and_negative_price() {
        let raw = json!({"id": 1, "category": {"id": 3, "name": "Produce"}, "unitPrice": -4});
        let product = Product::normalize(&raw, 0).unwrap();
        assert_eq!(product.category, "Produce");
        assert_eq!(product.unit_price, 0.0);
        assert!(product.is_active);
    }

    #[test]
    fn purchase_order_nested_supplier() {
        let raw = json!({
            "orderId": "X-12",
            "poNumber": "PO-1002",
            "supplier": {"id": 5, "name": "Acme Foods"},
            "orderDate": "2024-02-20T10:30:00Z",
            "orderStatus": "Received"
        });
        let order = PurchaseOrder::normalize(&raw, 0).unwrap();
        assert_eq!(order.id, "X-12");
        assert_eq!(order.supplier_name, "Acme Foods");
        assert_eq!(order.supplier_id.as_deref(), Some("5"));
        assert_eq!(order.status, "Received");
        assert!(order.expected_date.is_some());
    }

    #[test]
    fn batch_dates() {
        let raw = json!({
            "batchNumber": "B-1",
            "expiryDate": "2025-01-31",
            "createdAt": "2024-11-02T08:15:00"
        });
        let batch = StockBatch::normalize(&raw, 0).unwrap();
        assert_eq!(batch.expiry_date, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(
            batch.created_at,
            Some(Utc.with_ymd_and_hms(2024, 11, 2, 8, 15, 0).unwrap())
        );
    }

    #[test]
    fn canonical_records_are_fixed_points() {
        let tx = Transaction::normalize(
            &json!({"transactionId": "T1", "total": "19.99", "completed": true}),
            0,
        )
        .unwrap();
        assert_eq!(renormalize(&tx), Some(tx.clone()));

        let order = PurchaseOrder::normalize(
            &json!({"orderNumber": "PO-1", "supplier": {"id": 2, "name": "Acme"}, "createdAt": "2024-01-01"}),
            3,
        )
        .unwrap();
        assert_eq!(renormalize(&order), Some(order.clone()));

        let batch = StockBatch::normalize(&json!({"qty": 2, "expiry": "2026-02-01"}), 1).unwrap();
        assert_eq!(renormalize(&batch), Some(batch.clone()));

        let supplier = Supplier::normalize(&json!({"supplierId": 9, "contactName": "Lee"}), 0).unwrap();
        assert_eq!(renormalize(&supplier), Some(supplier.clone()));

        let product = Product::normalize(&json!({"title": "Tea", "price": 2.5, "gstRate": "12"}), 0)
            .unwrap();
        assert_eq!(renormalize(&product), Some(product.clone()));
    }

    #[test]
    fn supplier_names_resolved_by_id() {
        let mut orders: Vec<PurchaseOrder> = normalize_all(&[
            json!({"id": 1, "supplierId": 4}),
            json!({"id": 2, "supplierId": 99}),
            json!({"id": 3, "supplierName": "Direct"}),
        ]);
        let suppliers: Vec<Supplier> = normalize_all(&[json!({"id": 4, "name": "Acme"})]);

        resolve_supplier_names(&mut orders, &suppliers);

        assert_eq!(orders[0].supplier_name, "Acme");
        assert_eq!(orders[1].supplier_name, "99");
        assert_eq!(orders[2].supplier_name, "Direct");
    }

    #[test]
    fn record_response_is_unwrapped() {
        let resp = json!({"data": {"id": 7, "name": "Acme", "email": "a@acme.test"}});
        let supplier: Supplier = normalize_record(&resp, 0).unwrap();
        assert_eq!(supplier.id, "7");
        assert_eq!(supplier.email, "a@acme.test");
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use super::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1_000i64..1_000).prop_map(|n| json!(n)),
            // Epoch-millis range, past year 9999 in both directions.
            (-70_000_000_000_000i64..300_000_000_000_000).prop_map(|n| json!(n)),
            (-1_000.0f64..1_000.0).prop_map(|f| json!(f)),
            "[a-z0-9 .-]{0,8}".prop_map(Value::String),
        ]
    }

    fn raw_record(keys: &'static [&'static str]) -> impl Strategy<Value = Value> {
        proptest::collection::vec((proptest::sample::select(keys), scalar()), 0..8).prop_map(
            |pairs| {
                let map: Map<String, Value> = pairs
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                Value::Object(map)
            },
        )
    }

    const PRODUCT_KEYS: &[&str] = &[
        "id", "productId", "name", "title", "sku", "code", "price", "unitPrice", "taxRate",
        "gstRate", "category", "categoryName", "reorderLevel", "minStock", "active", "barcode",
    ];

    const TRANSACTION_KEYS: &[&str] = &[
        "id", "transactionId", "date", "saleDate", "amount", "total", "status", "completed",
        "cashierName", "itemCount", "tax",
    ];

    proptest! {
        #[test]
        fn product_normalization_is_idempotent(raw in raw_record(PRODUCT_KEYS), index in 0usize..50) {
            let first = Product::normalize(&raw, index).unwrap();
            let again = Product::normalize(&serde_json::to_value(&first).unwrap(), index).unwrap();
            prop_assert_eq!(first, again);
        }

        #[test]
        fn transaction_normalization_is_idempotent(raw in raw_record(TRANSACTION_KEYS), index in 0usize..50) {
            let first = Transaction::normalize(&raw, index).unwrap();
            let again = Transaction::normalize(&serde_json::to_value(&first).unwrap(), index).unwrap();
            prop_assert_eq!(first, again);
        }

        #[test]
        fn transaction_dates_survive_renormalization(millis in -70_000_000_000_000i64..300_000_000_000_000) {
            let first = Transaction::normalize(&json!({"id": "T1", "date": millis}), 0).unwrap();
            let again = Transaction::normalize(&serde_json::to_value(&first).unwrap(), 0).unwrap();
            prop_assert_eq!(first.date, again.date);
        }

        #[test]
        fn prices_are_never_negative(price in proptest::num::f64::ANY) {
            let raw = json!({"unitPrice": price});
            let product = Product::normalize(&raw, 0).unwrap();
            prop_assert!(product.unit_price >= 0.0);
        }
    }
}
