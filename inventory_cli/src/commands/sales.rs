//! The `sales` subcommand: sales reports and individual transactions.

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use inventory_lib::types::Transaction;
use inventory_lib::validation;
use inventory_lib::{Query, SalesQuery, SalesReportQuery};

use super::{load_list, single_record, Context, ListArgs};
use crate::output::{print_page_summary, print_transactions};

const FETCH_LIMIT: i64 = 100;

#[derive(Subcommand)]
pub enum SalesCommand {
    /// Sales report for a date range
    Report {
        #[command(flatten)]
        range: DateRangeArgs,

        #[command(flatten)]
        list: ListArgs,
    },
    /// List recent sales
    List(ListArgs),
    /// Show a single sale
    Show {
        /// Sale ID
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct DateRangeArgs {
    /// First day of the report (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the report (YYYY-MM-DD), defaults to `--from`
    #[arg(long)]
    pub to: Option<String>,
}

impl DateRangeArgs {
    pub fn to_query(&self) -> Result<SalesReportQuery> {
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let from = self.from.clone().unwrap_or(today);
        let to = self.to.clone().unwrap_or_else(|| from.clone());
        let (from, to) = validation::validate_date_range(&from, &to)?;
        Ok(SalesReportQuery::new(from, to))
    }
}

pub async fn run(command: &SalesCommand, ctx: &Context) -> Result<()> {
    match command {
        SalesCommand::Report { range, list } => {
            let query = range.to_query()?;
            let controller = load_list::<Transaction, _, _, _>(ctx, list, || {
                ctx.client.get_sales_report(&query)
            })
            .await?;
            print_transactions(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
        SalesCommand::List(args) => {
            let query = SalesQuery::default().with_page(0).with_page_size(FETCH_LIMIT);
            let controller =
                load_list::<Transaction, _, _, _>(ctx, args, || ctx.client.get_sales(&query))
                    .await?;
            print_transactions(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
        SalesCommand::Show { id } => {
            let sale: Transaction = single_record(&ctx.client.get_sale(id).await?)?;
            print_transactions(&[&sale], &ctx.format)?;
        }
    }
    Ok(())
}
