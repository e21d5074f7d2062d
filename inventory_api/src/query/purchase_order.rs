use url::Url;

use super::common::{Query, QueryCommon};

/// Query for `GET /purchase-orders`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PurchaseOrderQuery {
    pub common: QueryCommon,
}

impl Query for PurchaseOrderQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}
