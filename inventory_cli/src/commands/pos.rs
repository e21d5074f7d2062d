//! The `pos` subcommand: build a cart from product ids and check it out.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use inventory_lib::types::{PaymentMode, Product};
use inventory_lib::{Cart, EntityKind};
use serde_json::Value;

use super::{single_record, Context};
use crate::output::{format_money, print_cart, print_json};

#[derive(Subcommand)]
pub enum PosCommand {
    /// Ring up items and submit the sale
    Checkout(CheckoutArgs),
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Item as PRODUCT_ID or PRODUCT_ID:QUANTITY (repeatable)
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,

    /// Payment mode: cash or card
    #[arg(long, default_value = "cash")]
    pub payment: String,

    /// Cashier account ID recorded on the sale
    #[arg(long, default_value = "1")]
    pub cashier_id: i64,

    /// Show the cart and totals without submitting the sale
    #[arg(long)]
    pub dry_run: bool,
}

/// Splits `ID[:QTY]`; the quantity defaults to 1.
fn parse_item(item: &str) -> Result<(String, i64)> {
    let (id, quantity) = match item.rsplit_once(':') {
        Some((id, qty)) => {
            let qty: i64 = qty
                .trim()
                .parse()
                .map_err(|_| anyhow!("invalid quantity in '{}'", item))?;
            (id, qty)
        }
        None => (item, 1),
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("missing product id in '{}'", item);
    }
    if quantity < 1 {
        bail!("quantity must be >= 1 in '{}'", item);
    }
    Ok((id.to_string(), quantity))
}

/// Normalizes the product looked up for `requested_id`. A reply without an id
/// keeps the requested id instead of a placeholder label, so cart lines and the
/// sale payload always reference the real product.
fn checkout_product(response: &Value, requested_id: &str) -> Result<Product> {
    let mut product: Product = single_record(response)?;
    if EntityKind::Product.is_placeholder_id(&product.id) {
        product.id = requested_id.to_string();
    }
    Ok(product)
}

pub async fn run(command: &PosCommand, ctx: &Context) -> Result<()> {
    match command {
        PosCommand::Checkout(args) => checkout(args, ctx).await,
    }
}

async fn checkout(args: &CheckoutArgs, ctx: &Context) -> Result<()> {
    let payment_mode: PaymentMode = args
        .payment
        .parse()
        .map_err(|_| anyhow!("unknown payment mode '{}'. Valid values: cash, card", args.payment))?;
    let items = args
        .items
        .iter()
        .map(|item| parse_item(item))
        .collect::<Result<Vec<_>>>()?;

    let mut cart = Cart::new();
    for (product_id, quantity) in &items {
        let product = checkout_product(&ctx.client.get_product(product_id).await?, product_id)?;
        if !product.is_active {
            bail!("product {} ({}) is inactive", product.id, product.name);
        }
        cart.add(&product);
        let in_cart = cart
            .lines()
            .iter()
            .find(|line| line.product_id == product.id)
            .map(|line| line.quantity)
            .unwrap_or(0);
        cart.set_quantity(&product.id, in_cart - 1 + quantity)?;
    }

    print_cart(cart.lines(), &ctx.format)?;
    eprintln!(
        "Subtotal {}  Tax {}  Total {}",
        format_money(cart.subtotal()),
        format_money(cart.tax()),
        format_money(cart.total())
    );

    if args.dry_run {
        return Ok(());
    }
    let request = cart.to_sale_request(args.cashier_id, payment_mode)?;
    let resp = ctx.client.create_sale(&request).await?;
    eprintln!(
        "Sale recorded: {} paid by {}",
        format_money(cart.total()),
        payment_mode
    );
    print_json(&resp);
    Ok(())
}
