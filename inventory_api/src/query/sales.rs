use chrono::NaiveDate;
use url::Url;

use super::common::{Query, QueryCommon};

/// Query for `GET /api/sales`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SalesQuery {
    pub common: QueryCommon,
}

impl Query for SalesQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

/// Date-ranged query for `GET /reports/sales`. Both bounds are inclusive
/// calendar days, sent as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug)]
pub struct SalesReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SalesReportQuery {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// A report covering a single day.
    pub fn for_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("from", &self.from.format("%Y-%m-%d").to_string())
            .append_pair("to", &self.to.format("%Y-%m-%d").to_string());
        url
    }
}
