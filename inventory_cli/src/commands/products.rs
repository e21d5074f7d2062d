//! The `products` subcommand: browse and edit the product catalogue.

use anyhow::Result;
use clap::{Args, Subcommand};
use inventory_lib::types::Product;
use inventory_lib::validation::{self, ProductForm};
use inventory_lib::{ProductQuery, Query};

use super::{load_list, saved_record, single_record, Context, ListArgs};
use crate::output::{print_page_summary, print_products};

/// Products requested from the server per listing; paging happens locally.
const FETCH_LIMIT: i64 = 100;

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products
    List(ProductListArgs),
    /// Show a single product
    Show {
        /// Product ID
        #[arg(long)]
        id: String,
    },
    /// Create a product
    Create(ProductFormArgs),
    /// Update a product
    Update {
        /// Product ID
        #[arg(long)]
        id: String,

        #[command(flatten)]
        form: ProductFormArgs,
    },
}

#[derive(Args)]
pub struct ProductListArgs {
    /// Server-side name/SKU filter
    #[arg(long)]
    pub term: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args)]
pub struct ProductFormArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub sku: String,

    #[arg(long)]
    pub category: Option<String>,

    /// Selling price per unit
    #[arg(long)]
    pub unit_price: f64,

    /// Tax rate in percent
    #[arg(long)]
    pub tax_rate: Option<f64>,

    #[arg(long, default_value = "0")]
    pub reorder_level: i64,

    #[arg(long)]
    pub barcode: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Create or mark the product as inactive
    #[arg(long)]
    pub inactive: bool,
}

impl ProductFormArgs {
    fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            sku: self.sku.clone(),
            category: self.category.clone(),
            unit_price: self.unit_price,
            tax_rate: self.tax_rate,
            reorder_level: self.reorder_level,
            barcode: self.barcode.clone(),
            description: self.description.clone(),
            is_active: !self.inactive,
        }
    }
}

pub async fn run(command: &ProductsCommand, ctx: &Context) -> Result<()> {
    match command {
        ProductsCommand::List(args) => {
            let mut query = ProductQuery::default()
                .with_page(0)
                .with_page_size(FETCH_LIMIT);
            if let Some(term) = &args.term {
                query = query.with_term(&validation::validate_search(term)?);
            }
            let controller =
                load_list::<Product, _, _, _>(ctx, &args.list, || ctx.client.get_products(&query))
                    .await?;
            print_products(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
        ProductsCommand::Show { id } => {
            let product: Product = single_record(&ctx.client.get_product(id).await?)?;
            print_products(&[&product], &ctx.format)?;
        }
        ProductsCommand::Create(form) => {
            let input = validation::validate_product(&form.to_form())?;
            let resp = ctx.client.create_product(&input).await?;
            if let Some(product) = saved_record::<Product>(&resp, "Created") {
                print_products(&[&product], &ctx.format)?;
            }
        }
        ProductsCommand::Update { id, form } => {
            let input = validation::validate_product(&form.to_form())?;
            let resp = ctx.client.update_product(id, &input).await?;
            if let Some(product) = saved_record::<Product>(&resp, "Updated") {
                print_products(&[&product], &ctx.format)?;
            }
        }
    }
    Ok(())
}
