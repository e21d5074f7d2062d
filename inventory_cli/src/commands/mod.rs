//! CLI subcommand implementations.

pub mod auth;
pub mod dashboard;
pub mod pos;
pub mod products;
pub mod purchase_orders;
pub mod sales;
pub mod stock;
pub mod suppliers;

use std::future::Future;

use anyhow::{bail, Result};
use clap::Args;
use inventory_lib::controller::Identified;
use inventory_lib::validation;
use inventory_lib::{Client, InventoryError, ListController, Normalize};
use serde::Serialize;
use serde_json::Value;

use crate::output::OutputFormat;

/// What every subcommand needs: the API client and the output settings.
pub struct Context {
    pub client: Client,
    pub format: OutputFormat,
    pub page_size: usize,
}

/// Search and paging flags shared by the list subcommands.
#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Only show records containing this text in any field (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,
}

impl ListArgs {
    /// Applies the search term, then moves to the requested page. A blank
    /// term matches everything.
    pub fn apply<T>(&self, controller: &mut ListController<T>) -> Result<()>
    where
        T: Normalize + Identified + Serialize,
    {
        if let Some(search) = &self.search {
            let term = if search.trim().is_empty() {
                String::new()
            } else {
                validation::validate_search(search)?
            };
            controller.set_search_term(&term);
        }
        let page = validation::validate_page(self.page)?;
        controller.set_page(page - 1);
        Ok(())
    }
}

/// Loads a list through `fetch` and positions it per `args`.
///
/// Fails when the load ended in the error state.
pub async fn load_list<T, F, Fut, E>(
    ctx: &Context,
    args: &ListArgs,
    fetch: F,
) -> Result<ListController<T>>
where
    T: Normalize + Identified + Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value, E>>,
    E: Into<InventoryError>,
{
    let mut controller = ListController::new(ctx.page_size);
    controller.load(fetch).await;
    ensure_loaded(&controller)?;
    args.apply(&mut controller)?;
    Ok(controller)
}

pub fn ensure_loaded<T>(controller: &ListController<T>) -> Result<()>
where
    T: Normalize + Identified + Serialize,
{
    if let Some(msg) = controller.error() {
        bail!("{}", msg);
    }
    Ok(())
}

/// Normalizes a single-record response, failing when it holds no record.
pub fn single_record<T: Normalize>(response: &Value) -> Result<T> {
    match inventory_lib::normalize_record(response, 0) {
        Some(record) => Ok(record),
        None => bail!("response did not contain a {} record", T::KIND),
    }
}

/// Reports a create/update. The server may answer with the saved record or
/// with an empty body, so the record is optional.
pub fn saved_record<T: Normalize + Identified>(response: &Value, action: &str) -> Option<T> {
    let record: Option<T> = inventory_lib::normalize_record(response, 0);
    match &record {
        Some(saved) => eprintln!("{} {} {}", action, T::KIND, saved.record_id()),
        None => eprintln!("{} {}", action, T::KIND),
    }
    record
}
