//! The `dashboard` subcommand: manager and sales overviews.

use anyhow::Result;
use clap::{Args, Subcommand};
use inventory_lib::dashboard::{load_manager_summary, load_sales_summary};
use inventory_lib::validation;

use super::sales::DateRangeArgs;
use super::Context;
use crate::output::{format_money, print_metrics, print_page_summary, print_purchase_orders};

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// Supplier, pending order and low-stock counts with recent purchase orders
    Manager(ManagerArgs),
    /// Totals for a sales report range
    Sales(DateRangeArgs),
}

#[derive(Args)]
pub struct ManagerArgs {
    /// Page of recent purchase orders
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(command: &DashboardCommand, ctx: &Context) -> Result<()> {
    match command {
        DashboardCommand::Manager(args) => {
            let page = validation::validate_page(args.page)?;
            let mut summary = load_manager_summary(&ctx.client).await;
            for failure in &summary.failures {
                eprintln!("Warning: {}", failure);
            }
            print_metrics(
                &[
                    ("Total Suppliers", summary.supplier_count.to_string()),
                    ("Pending Orders", summary.pending_order_count.to_string()),
                    ("Low Stock Items", summary.low_stock_count.to_string()),
                ],
                &ctx.format,
            )?;
            summary.recent_orders.set_page(page - 1);
            print_purchase_orders(&summary.recent_orders.current_page(), &ctx.format)?;
            print_page_summary(&summary.recent_orders.window());
        }
        DashboardCommand::Sales(args) => {
            let query = args.to_query()?;
            let summary = load_sales_summary(&ctx.client, &query).await;
            for failure in &summary.failures {
                eprintln!("Warning: {}", failure);
            }
            print_metrics(
                &[
                    ("From", query.from.to_string()),
                    ("To", query.to.to_string()),
                    ("Transactions", summary.transaction_count.to_string()),
                    ("Completed Total", format_money(summary.completed_total)),
                    ("Pending", summary.pending_count.to_string()),
                    ("Active Products", summary.active_product_count.to_string()),
                ],
                &ctx.format,
            )?;
        }
    }
    Ok(())
}
