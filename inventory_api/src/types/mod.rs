mod auth;
pub use self::auth::{LoginRequest, RefreshRequest, Session};

mod product;
pub use self::product::{Product, ProductInput};

mod purchase_order;
pub use self::purchase_order::{PurchaseOrder, PurchaseOrderInput, PurchaseOrderStatus};

mod sale;
pub use self::sale::{PaymentMode, SaleItem, SaleRequest, Transaction, TransactionStatus};

mod stock;
pub use self::stock::{BatchInput, StockBatch};

mod supplier;
pub use self::supplier::{Supplier, SupplierInput};
