//! The `purchase-orders` subcommand.

use anyhow::Result;
use clap::{Args, Subcommand};
use inventory_lib::dashboard::by_expected_date_desc;
use inventory_lib::types::{PurchaseOrder, Supplier};
use inventory_lib::validation::{self, PurchaseOrderForm};
use inventory_lib::{
    normalize_response, resolve_supplier_names, ListController, Mutation, PurchaseOrderQuery,
    Query,
};

use super::{ensure_loaded, saved_record, Context, ListArgs};
use crate::output::{print_page_summary, print_purchase_orders};

const FETCH_LIMIT: i64 = 100;

#[derive(Subcommand)]
pub enum PurchaseOrdersCommand {
    /// List purchase orders, newest expected date first
    List(ListArgs),
    /// Create a purchase order
    Create(PurchaseOrderFormArgs),
    /// Update a purchase order
    Update {
        /// Purchase order ID
        #[arg(long)]
        id: String,

        #[command(flatten)]
        form: PurchaseOrderFormArgs,
    },
    /// Delete a purchase order, then show the remaining list
    Delete {
        /// Purchase order ID
        #[arg(long)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args)]
pub struct PurchaseOrderFormArgs {
    #[arg(long)]
    pub order_number: String,

    #[arg(long)]
    pub supplier_id: String,

    /// Expected delivery date (YYYY-MM-DD)
    #[arg(long)]
    pub expected_date: String,

    #[arg(long)]
    pub notes: Option<String>,

    /// pending, approved, received, cancelled
    #[arg(long)]
    pub status: Option<String>,
}

impl PurchaseOrderFormArgs {
    fn to_form(&self) -> PurchaseOrderForm {
        PurchaseOrderForm {
            order_number: self.order_number.clone(),
            supplier_id: self.supplier_id.clone(),
            expected_date: self.expected_date.clone(),
            notes: self.notes.clone(),
            status: self.status.clone(),
        }
    }
}

/// Loads orders and suppliers together so orders that only carry a supplier
/// id can show the supplier's name.
async fn load_orders(ctx: &Context, args: &ListArgs) -> Result<ListController<PurchaseOrder>> {
    let query = PurchaseOrderQuery::default()
        .with_page(0)
        .with_page_size(FETCH_LIMIT);
    let mut controller = ListController::new(ctx.page_size).with_sort(by_expected_date_desc);
    let (_, suppliers) = tokio::join!(
        controller.load(|| ctx.client.get_purchase_orders(&query)),
        ctx.client.get_suppliers(),
    );
    ensure_loaded(&controller)?;

    match suppliers {
        Ok(resp) => {
            let suppliers: Vec<Supplier> = normalize_response(&resp);
            controller.update_records(|orders| resolve_supplier_names(orders, &suppliers));
        }
        Err(e) => tracing::warn!("Supplier names unavailable: {}", e),
    }
    args.apply(&mut controller)?;
    Ok(controller)
}

pub async fn run(command: &PurchaseOrdersCommand, ctx: &Context) -> Result<()> {
    match command {
        PurchaseOrdersCommand::List(args) => {
            let controller = load_orders(ctx, args).await?;
            print_purchase_orders(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
        PurchaseOrdersCommand::Create(form) => {
            let input = validation::validate_purchase_order(&form.to_form())?;
            let resp = ctx.client.create_purchase_order(&input).await?;
            if let Some(order) = saved_record::<PurchaseOrder>(&resp, "Created") {
                print_purchase_orders(&[&order], &ctx.format)?;
            }
        }
        PurchaseOrdersCommand::Update { id, form } => {
            let input = validation::validate_purchase_order(&form.to_form())?;
            let resp = ctx.client.update_purchase_order(id, &input).await?;
            if let Some(order) = saved_record::<PurchaseOrder>(&resp, "Updated") {
                print_purchase_orders(&[&order], &ctx.format)?;
            }
        }
        PurchaseOrdersCommand::Delete { id, list } => {
            let mut controller = load_orders(ctx, list).await?;
            ctx.client.delete_purchase_order(id).await?;
            controller.after_mutate(Mutation::Deleted(id.clone()));
            eprintln!("Deleted purchase order {}", id);
            print_purchase_orders(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
    }
    Ok(())
}
