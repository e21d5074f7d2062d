use anyhow::Result;
use chrono::{DateTime, Utc};
use inventory_lib::types::{Product, PurchaseOrder, StockBatch, Supplier, Transaction};
use inventory_lib::{CartLine, PageWindow};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "SKU")]
    #[serde(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Tax %")]
    #[serde(rename = "Tax %")]
    tax_rate: String,
    #[tabled(rename = "Reorder")]
    #[serde(rename = "Reorder")]
    reorder_level: i64,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
struct SupplierRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    #[serde(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Contact")]
    #[serde(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
struct PurchaseOrderRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "PO Number")]
    #[serde(rename = "PO Number")]
    po_number: String,
    #[tabled(rename = "Supplier")]
    #[serde(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Expected")]
    #[serde(rename = "Expected")]
    expected: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct BatchRow {
    #[tabled(rename = "Batch")]
    #[serde(rename = "Batch")]
    batch_number: String,
    #[tabled(rename = "Quantity")]
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[tabled(rename = "Cost")]
    #[serde(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Expiry")]
    #[serde(rename = "Expiry")]
    expiry: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Received")]
    #[serde(rename = "Received")]
    received: String,
}

#[derive(Tabled, Serialize)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Cashier")]
    #[serde(rename = "Cashier")]
    cashier: String,
    #[tabled(rename = "Items")]
    #[serde(rename = "Items")]
    items: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tax")]
    #[serde(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct CartRow {
    #[tabled(rename = "Product")]
    #[serde(rename = "Product")]
    product_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    #[serde(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Unit Price")]
    #[serde(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Tax")]
    #[serde(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Line Total")]
    #[serde(rename = "Line Total")]
    line_total: String,
}

#[derive(Tabled, Serialize)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    #[serde(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_product_rows(products: &[&Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            id: p.id.clone(),
            name: p.name.clone(),
            sku: p.sku.clone(),
            category: p.category.clone(),
            price: format_money(p.unit_price),
            tax_rate: p.tax_rate.map(|r| format!("{}", r)).unwrap_or_default(),
            reorder_level: p.reorder_level,
            active: yes_no(p.is_active),
        })
        .collect()
}

fn build_supplier_rows(suppliers: &[&Supplier]) -> Vec<SupplierRow> {
    suppliers
        .iter()
        .map(|s| SupplierRow {
            id: s.id.clone(),
            name: s.name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            contact: s.contact_person.clone(),
            active: yes_no(s.is_active),
        })
        .collect()
}

fn build_purchase_order_rows(orders: &[&PurchaseOrder]) -> Vec<PurchaseOrderRow> {
    orders
        .iter()
        .map(|o| PurchaseOrderRow {
            id: o.id.clone(),
            po_number: o.po_number.clone(),
            supplier: o.supplier_name.clone(),
            expected: format_date(o.expected_date),
            status: o.status.clone(),
        })
        .collect()
}

fn build_batch_rows(batches: &[&StockBatch]) -> Vec<BatchRow> {
    batches
        .iter()
        .map(|b| BatchRow {
            batch_number: b.batch_number.clone(),
            quantity: b.quantity,
            cost: b.cost_price.map(format_money).unwrap_or_else(|| "-".to_string()),
            expiry: b
                .expiry_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            location: b.location.clone().unwrap_or_else(|| "-".to_string()),
            received: format_date(b.created_at),
        })
        .collect()
}

fn build_transaction_rows(transactions: &[&Transaction]) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: format_date(t.date),
            cashier: t.cashier.clone().unwrap_or_else(|| "-".to_string()),
            items: t
                .item_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            amount: format_money(t.amount),
            tax: t.tax.map(format_money).unwrap_or_else(|| "-".to_string()),
            status: t.status.to_string(),
        })
        .collect()
}

fn build_cart_rows(lines: &[CartLine]) -> Vec<CartRow> {
    lines
        .iter()
        .map(|l| CartRow {
            product_id: l.product_id.clone(),
            name: l.name.clone(),
            quantity: l.quantity,
            unit_price: format_money(l.unit_price),
            tax: format_money(l.tax()),
            line_total: format_money(l.subtotal() + l.tax()),
        })
        .collect()
}

// -- Rendering --

fn print_rows<R, T>(rows: Vec<R>, records: &[T], format: &OutputFormat) -> Result<()>
where
    R: Tabled + Serialize,
    T: Serialize,
{
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&records),
    }
    Ok(())
}

pub fn print_products(products: &[&Product], format: &OutputFormat) -> Result<()> {
    print_rows(build_product_rows(products), products, format)
}

pub fn print_suppliers(suppliers: &[&Supplier], format: &OutputFormat) -> Result<()> {
    print_rows(build_supplier_rows(suppliers), suppliers, format)
}

pub fn print_purchase_orders(orders: &[&PurchaseOrder], format: &OutputFormat) -> Result<()> {
    print_rows(build_purchase_order_rows(orders), orders, format)
}

pub fn print_batches(batches: &[&StockBatch], format: &OutputFormat) -> Result<()> {
    print_rows(build_batch_rows(batches), batches, format)
}

pub fn print_transactions(transactions: &[&Transaction], format: &OutputFormat) -> Result<()> {
    print_rows(build_transaction_rows(transactions), transactions, format)
}

pub fn print_cart(lines: &[CartLine], format: &OutputFormat) -> Result<()> {
    let records: Vec<serde_json::Value> = lines
        .iter()
        .map(|l| {
            serde_json::json!({
                "productId": l.product_id,
                "name": l.name,
                "quantity": l.quantity,
                "unitPrice": l.unit_price,
                "taxRate": l.tax_rate,
            })
        })
        .collect();
    print_rows(build_cart_rows(lines), &records, format)
}

/// Dashboard figures as a two-column table, or a JSON object.
pub fn print_metrics(metrics: &[(&str, String)], format: &OutputFormat) -> Result<()> {
    let rows: Vec<MetricRow> = metrics
        .iter()
        .map(|(metric, value)| MetricRow {
            metric: metric.to_string(),
            value: value.clone(),
        })
        .collect();
    let object: serde_json::Map<String, serde_json::Value> = metrics
        .iter()
        .map(|(metric, value)| (metric.to_string(), serde_json::Value::from(value.as_str())))
        .collect();
    match format {
        OutputFormat::Json => {
            print_json(&object);
            Ok(())
        }
        _ => print_rows(rows, &[object], format),
    }
}

/// Page summary and the visible page buttons, on stderr so stdout stays
/// machine-readable.
pub fn print_page_summary(window: &PageWindow) {
    eprintln!("{} ({})", window.summary(), window.label());
    if window.total_pages > 1 {
        eprintln!("{}", page_buttons(window));
    }
}

fn page_buttons(window: &PageWindow) -> String {
    let mut parts = Vec::new();
    if window.has_previous() {
        parts.push("<".to_string());
    }
    for page in window.visible_page_buttons.clone() {
        if page == window.safe_page_index {
            parts.push(format!("[{}]", page + 1));
        } else {
            parts.push((page + 1).to_string());
        }
    }
    if window.has_next() {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn format_money(value: f64) -> String {
    // adding 0.0 turns -0.0 into 0.0
    let rounded = inventory_lib::cart::round_currency(value) + 0.0;
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded)
    }
}

fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
