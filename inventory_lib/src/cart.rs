//! Point-of-sale cart.
//!
//! Amounts are kept as `f64` to match the API's decimal fields; totals are
//! rounded to cents only for display via [`round_currency`].

use inventory_api::types::{PaymentMode, Product, SaleItem, SaleRequest};

use crate::error::InventoryError;

/// Rounds half away from zero to two decimal places.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub tax_rate: Option<f64>,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Line tax: `unit_price * quantity * tax_rate / 100`. No rate means no tax.
    pub fn tax(&self) -> f64 {
        self.subtotal() * self.tax_rate.unwrap_or(0.0) / 100.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`. A product already in the cart gets its
    /// quantity incremented instead of a second line.
    pub fn add(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: 1,
                unit_price: product.unit_price,
                tax_rate: product.tax_rate,
            }),
        }
    }

    /// Removes the product's line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), InventoryError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| {
                InventoryError::InvalidInput(format!("product '{}' is not in the cart", product_id))
            })?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn tax(&self) -> f64 {
        self.lines.iter().map(CartLine::tax).sum()
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Builds the checkout payload. Fails on an empty cart.
    pub fn to_sale_request(
        &self,
        cashier_id: i64,
        payment_mode: PaymentMode,
    ) -> Result<SaleRequest, InventoryError> {
        if self.is_empty() {
            return Err(InventoryError::InvalidInput("cart is empty".to_string()));
        }
        Ok(SaleRequest {
            cashier_id,
            items: self
                .lines
                .iter()
                .map(|l| SaleItem {
                    product_id: l.product_id.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    tax_rate: l.tax_rate,
                })
                .collect(),
            payment_mode,
            discount_total: 0.0,
        })
    }
}
