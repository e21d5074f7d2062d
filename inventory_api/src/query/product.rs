use url::Url;

use super::common::{Query, QueryCommon};

/// Query for `GET /products`. Name and SKU filters are applied server-side
/// when the API supports them; the client-side filter still runs afterwards.
#[derive(Clone, Debug, Default)]
pub struct ProductQuery {
    pub common: QueryCommon,
    pub name: Option<String>,
    pub sku: Option<String>,
}

impl Query for ProductQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(name) = &self.name {
            url.query_pairs_mut().append_pair("name", name.as_str());
        }
        if let Some(sku) = &self.sku {
            url.query_pairs_mut().append_pair("sku", sku.as_str());
        }
        url
    }
}

impl ProductQuery {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_sku(mut self, sku: &str) -> Self {
        self.sku = Some(sku.to_string());
        self
    }

    /// The POS search box sends the same term as both name and SKU.
    pub fn with_term(self, term: &str) -> Self {
        self.with_name(term).with_sku(term)
    }
}
