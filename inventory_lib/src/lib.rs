//! Library layer for the inventory tools: response normalization, client-side
//! search and paging, form validation, the POS cart, and dashboard summaries.
//!
//! Wraps the `inventory_api` crate. List responses of any envelope shape are
//! unwrapped and normalized into its canonical record types, then searched and
//! paged locally by a [`ListController`].

pub mod cart;
pub mod coerce;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod entity;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pager;
pub mod token_store;
pub mod unwrap;
pub mod validation;

pub use inventory_api;
pub use inventory_api::types;
pub use inventory_api::{
    AuthTokens, Client, CredentialProvider, MemoryCredentials, ProductQuery, PurchaseOrderQuery,
    Query, SalesQuery, SalesReportQuery,
};

pub use cart::{Cart, CartLine};
pub use config::AppConfig;
pub use controller::{FetchState, Identified, ListController, Liveness, Mutation};
pub use entity::EntityKind;
pub use error::InventoryError;
pub use normalize::{normalize_record, normalize_response, resolve_supplier_names, Normalize};
pub use pager::{paginate, PageWindow};
pub use token_store::FileCredentials;
pub use unwrap::{unwrap_list, unwrap_record};
