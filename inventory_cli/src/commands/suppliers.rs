//! The `suppliers` subcommand.

use anyhow::Result;
use clap::{Args, Subcommand};
use inventory_lib::types::Supplier;
use inventory_lib::validation::{self, SupplierForm};
use inventory_lib::Mutation;

use super::{load_list, saved_record, Context, ListArgs};
use crate::output::{print_page_summary, print_suppliers};

#[derive(Subcommand)]
pub enum SuppliersCommand {
    /// List suppliers
    List(ListArgs),
    /// Create a supplier
    Create(SupplierFormArgs),
    /// Update a supplier
    Update {
        /// Supplier ID
        #[arg(long)]
        id: String,

        #[command(flatten)]
        form: SupplierFormArgs,
    },
    /// Delete a supplier, then show the remaining list
    Delete {
        /// Supplier ID
        #[arg(long)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args)]
pub struct SupplierFormArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub contact_person: Option<String>,

    /// Mark the supplier as inactive
    #[arg(long)]
    pub inactive: bool,
}

impl SupplierFormArgs {
    fn to_form(&self) -> SupplierForm {
        SupplierForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            contact_person: self.contact_person.clone(),
            is_active: !self.inactive,
        }
    }
}

pub async fn run(command: &SuppliersCommand, ctx: &Context) -> Result<()> {
    match command {
        SuppliersCommand::List(args) => {
            let controller =
                load_list::<Supplier, _, _, _>(ctx, args, || ctx.client.get_suppliers()).await?;
            print_suppliers(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
        SuppliersCommand::Create(form) => {
            let input = validation::validate_supplier(&form.to_form())?;
            let resp = ctx.client.create_supplier(&input).await?;
            if let Some(supplier) = saved_record::<Supplier>(&resp, "Created") {
                print_suppliers(&[&supplier], &ctx.format)?;
            }
        }
        SuppliersCommand::Update { id, form } => {
            let input = validation::validate_supplier(&form.to_form())?;
            let resp = ctx.client.update_supplier(id, &input).await?;
            if let Some(supplier) = saved_record::<Supplier>(&resp, "Updated") {
                print_suppliers(&[&supplier], &ctx.format)?;
            }
        }
        SuppliersCommand::Delete { id, list } => {
            let mut controller =
                load_list::<Supplier, _, _, _>(ctx, list, || ctx.client.get_suppliers()).await?;
            ctx.client.delete_supplier(id).await?;
            controller.after_mutate(Mutation::Deleted(id.clone()));
            eprintln!("Deleted supplier {}", id);
            print_suppliers(&controller.current_page(), &ctx.format)?;
            print_page_summary(&controller.window());
        }
    }
    Ok(())
}
