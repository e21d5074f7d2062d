use chrono::NaiveDate;
use inventory_api::types::{
    BatchInput, ProductInput, PurchaseOrderInput, PurchaseOrderStatus, SupplierInput,
};

use crate::error::InventoryError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_TEXT_LENGTH: usize = 200;
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, InventoryError> {
    if input.len() > max_len {
        return Err(InventoryError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(InventoryError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Like [`sanitize_text`] for a named form field; reports which field failed.
fn required(field: &str, input: &str, max_len: usize) -> Result<String, InventoryError> {
    sanitize_text(input, max_len)
        .map_err(|_| InventoryError::InvalidInput(format!("{} is required", field)))
}

/// Optional form fields: blank input is `None`, anything else is sanitized.
fn optional(input: Option<&str>, max_len: usize) -> Result<Option<String>, InventoryError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => sanitize_text(value, max_len).map(Some),
    }
}

/// Validate a search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, InventoryError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, InventoryError> {
    if page < 1 {
        return Err(InventoryError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<i64, InventoryError> {
    if !(1..=100).contains(&page_size) {
        return Err(InventoryError::InvalidInput(
            "page_size must be between 1 and 100".to_string(),
        ));
    }
    Ok(page_size)
}

/// Validate a YYYY-MM-DD date string.
pub fn validate_date(input: &str) -> Result<NaiveDate, InventoryError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        InventoryError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
            trimmed
        ))
    })
}

/// Validate a report range: both dates parse and `from` is not after `to`.
pub fn validate_date_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), InventoryError> {
    let from = validate_date(from)?;
    let to = validate_date(to)?;
    if from > to {
        return Err(InventoryError::InvalidInput(format!(
            "start date {} is after end date {}",
            from, to
        )));
    }
    Ok((from, to))
}

/// Validate login credentials. The password is checked for presence only.
pub fn validate_login(username: &str, password: &str) -> Result<(String, String), InventoryError> {
    let username = required("username", username, MAX_TEXT_LENGTH)?;
    if password.is_empty() {
        return Err(InventoryError::InvalidInput(
            "password is required".to_string(),
        ));
    }
    Ok((username, password.to_string()))
}

/// Raw supplier form fields as typed by the user.
#[derive(Clone, Debug, Default)]
pub struct SupplierForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub is_active: bool,
}

pub fn validate_supplier(form: &SupplierForm) -> Result<SupplierInput, InventoryError> {
    let name = required("name", &form.name, MAX_TEXT_LENGTH)?;
    let email = required("email", &form.email, MAX_TEXT_LENGTH)?;
    if !email.contains('@') {
        return Err(InventoryError::InvalidInput(format!(
            "invalid email '{}'",
            email
        )));
    }
    Ok(SupplierInput {
        name,
        email,
        phone: optional(form.phone.as_deref(), MAX_TEXT_LENGTH)?.unwrap_or_default(),
        address: optional(form.address.as_deref(), MAX_TEXT_LENGTH)?,
        contact_person: optional(form.contact_person.as_deref(), MAX_TEXT_LENGTH)?,
        is_active: form.is_active,
    })
}

/// Raw purchase order form fields.
#[derive(Clone, Debug, Default)]
pub struct PurchaseOrderForm {
    pub order_number: String,
    pub supplier_id: String,
    pub expected_date: String,
    pub notes: Option<String>,
    pub status: Option<String>,
}

pub fn validate_purchase_order(
    form: &PurchaseOrderForm,
) -> Result<PurchaseOrderInput, InventoryError> {
    let order_number = required("order number", &form.order_number, MAX_TEXT_LENGTH)?;
    let supplier_id = required("supplier", &form.supplier_id, MAX_TEXT_LENGTH)?;
    let supplier_id: i64 = supplier_id.parse().map_err(|_| {
        InventoryError::InvalidInput(format!("invalid supplier id '{}'", supplier_id))
    })?;
    let expected_date = validate_date(&form.expected_date)?;
    let status = match form.status.as_deref().map(str::trim) {
        None | Some("") => PurchaseOrderStatus::default(),
        Some(value) => value.parse().map_err(|_| {
            InventoryError::InvalidInput(format!(
                "unknown status '{}'. Valid values: pending, approved, received, cancelled",
                value
            ))
        })?,
    };
    Ok(PurchaseOrderInput {
        order_number,
        supplier_id,
        expected_date,
        notes: optional(form.notes.as_deref(), MAX_NOTES_LENGTH)?.unwrap_or_default(),
        status,
    })
}

/// Raw product form fields.
#[derive(Clone, Debug, Default)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub unit_price: f64,
    pub tax_rate: Option<f64>,
    pub reorder_level: i64,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

pub fn validate_product(form: &ProductForm) -> Result<ProductInput, InventoryError> {
    let name = required("name", &form.name, MAX_TEXT_LENGTH)?;
    let sku = required("sku", &form.sku, MAX_TEXT_LENGTH)?;
    if !form.unit_price.is_finite() || form.unit_price < 0.0 {
        return Err(InventoryError::InvalidInput(
            "unit price must be a non-negative number".to_string(),
        ));
    }
    if let Some(rate) = form.tax_rate {
        if !(0.0..=100.0).contains(&rate) {
            return Err(InventoryError::InvalidInput(
                "tax rate must be between 0 and 100".to_string(),
            ));
        }
    }
    if form.reorder_level < 0 {
        return Err(InventoryError::InvalidInput(
            "reorder level must be >= 0".to_string(),
        ));
    }
    Ok(ProductInput {
        name,
        sku,
        category: optional(form.category.as_deref(), MAX_TEXT_LENGTH)?.unwrap_or_default(),
        unit_price: form.unit_price,
        tax_rate: form.tax_rate,
        reorder_level: form.reorder_level,
        barcode: optional(form.barcode.as_deref(), MAX_TEXT_LENGTH)?,
        description: optional(form.description.as_deref(), MAX_NOTES_LENGTH)?,
        is_active: form.is_active,
    })
}

/// Raw stock batch form fields.
#[derive(Clone, Debug, Default)]
pub struct BatchForm {
    pub product_id: String,
    pub quantity: i64,
    pub cost_price: f64,
    pub expiry_date: Option<String>,
    pub location: Option<String>,
}

/// `received_on` stamps the batch's creation date.
pub fn validate_batch(form: &BatchForm, received_on: NaiveDate) -> Result<BatchInput, InventoryError> {
    let product_id = required("product", &form.product_id, MAX_TEXT_LENGTH)?;
    if form.quantity < 0 {
        return Err(InventoryError::InvalidInput(
            "quantity must be >= 0".to_string(),
        ));
    }
    if !form.cost_price.is_finite() || form.cost_price < 0.0 {
        return Err(InventoryError::InvalidInput(
            "cost price must be a non-negative number".to_string(),
        ));
    }
    let expiry_date = match form.expiry_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(validate_date(value)?),
    };
    Ok(BatchInput {
        product_id,
        quantity: form.quantity,
        cost_price: form.cost_price,
        expiry_date,
        created_at: received_on,
        location: optional(form.location.as_deref(), MAX_TEXT_LENGTH)?,
    })
}
