mod client;
mod credentials;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::credentials::{AuthTokens, CredentialProvider, MemoryCredentials};
pub use self::errors::Error;
pub use self::query::{ProductQuery, PurchaseOrderQuery, Query, SalesQuery, SalesReportQuery};
