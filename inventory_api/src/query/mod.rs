mod common;
pub use self::common::{Query, QueryCommon};

mod product;
pub use self::product::ProductQuery;

mod purchase_order;
pub use self::purchase_order::PurchaseOrderQuery;

mod sales;
pub use self::sales::{SalesQuery, SalesReportQuery};
