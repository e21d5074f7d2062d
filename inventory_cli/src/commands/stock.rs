//! The `stock` subcommand: batches held per product.

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use inventory_lib::types::StockBatch;
use inventory_lib::validation::{self, BatchForm};

use super::{load_list, saved_record, Context, ListArgs};
use crate::output::{print_batches, print_page_summary};

#[derive(Subcommand)]
pub enum StockCommand {
    /// List the stock batches of a product
    List {
        /// Product ID
        #[arg(long)]
        product_id: String,

        #[command(flatten)]
        list: ListArgs,
    },
    /// Register a received stock batch
    AddBatch(BatchArgs),
}

#[derive(Args)]
pub struct BatchArgs {
    /// Product ID
    #[arg(long)]
    pub product_id: String,

    #[arg(long)]
    pub quantity: i64,

    /// Purchase cost per unit
    #[arg(long, default_value = "0")]
    pub cost_price: f64,

    /// Expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expiry_date: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

pub async fn run(command: &StockCommand, ctx: &Context) -> Result<()> {
    match command {
        StockCommand::List { product_id, list } => {
            let product_id = validation::sanitize_text(product_id, validation::MAX_TEXT_LENGTH)?;
            let controller = load_list::<StockBatch, _, _, _>(ctx, list, || {
                ctx.client.get_stock_by_product(&product_id)
            })
            .await?;
            print_batches(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
        StockCommand::AddBatch(args) => {
            let form = BatchForm {
                product_id: args.product_id.clone(),
                quantity: args.quantity,
                cost_price: args.cost_price,
                expiry_date: args.expiry_date.clone(),
                location: args.location.clone(),
            };
            let input = validation::validate_batch(&form, Utc::now().date_naive())?;
            let resp = ctx.client.create_batch(&input).await?;
            if let Some(batch) = saved_record::<StockBatch>(&resp, "Added") {
                print_batches(&[&batch], &ctx.format)?;
            }
        }
    }
    Ok(())
}
