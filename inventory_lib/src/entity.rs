//! Entity kinds and the per-kind envelope key table.

/// Keys every list endpoint may wrap its payload in, in probe order.
pub const COMMON_ENVELOPE_KEYS: &[&str] = &["data", "content", "items", "results"];

/// The record kinds the list views work with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Transaction,
    PurchaseOrder,
    Supplier,
    StockBatch,
}

impl EntityKind {
    /// Envelope keys probed by the unwrapper for this kind, in order.
    ///
    /// The common keys come first; the rest are aliases individual endpoints
    /// have been seen to use. New shapes are supported by appending here.
    pub fn envelope_keys(self) -> &'static [&'static str] {
        match self {
            EntityKind::Product => &["data", "content", "items", "results", "products"],
            EntityKind::Transaction => &[
                "data",
                "content",
                "items",
                "results",
                "sales",
                "records",
                "transactions",
            ],
            EntityKind::PurchaseOrder => &[
                "data",
                "content",
                "items",
                "results",
                "orders",
                "purchaseOrders",
            ],
            EntityKind::Supplier => &["data", "content", "items", "results", "suppliers"],
            EntityKind::StockBatch => &["data", "content", "items", "results", "batches", "records"],
        }
    }

    /// Prefix of the display label used when a record arrives without an id.
    pub fn placeholder_prefix(self) -> &'static str {
        match self {
            EntityKind::Product => "PRODUCT",
            EntityKind::Transaction => "TX",
            EntityKind::PurchaseOrder => "PO",
            EntityKind::Supplier => "SUPPLIER",
            EntityKind::StockBatch => "BATCH",
        }
    }

    /// `PREFIX-n`, 1-based, for the record at `index` in the unwrapped list.
    pub fn placeholder_id(self, index: usize) -> String {
        format!("{}-{}", self.placeholder_prefix(), index + 1)
    }

    /// Whether `id` has the `PREFIX-n` shape of a synthesized label.
    pub fn is_placeholder_id(self, id: &str) -> bool {
        id.strip_prefix(self.placeholder_prefix())
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EntityKind::Product => "product",
                EntityKind::Transaction => "transaction",
                EntityKind::PurchaseOrder => "purchase order",
                EntityKind::Supplier => "supplier",
                EntityKind::StockBatch => "stock batch",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EntityKind; 5] = [
        EntityKind::Product,
        EntityKind::Transaction,
        EntityKind::PurchaseOrder,
        EntityKind::Supplier,
        EntityKind::StockBatch,
    ];

    #[test]
    fn every_kind_probes_common_keys_first() {
        for kind in ALL {
            assert_eq!(&kind.envelope_keys()[..4], COMMON_ENVELOPE_KEYS, "{kind}");
        }
    }

    #[test]
    fn transaction_aliases_follow_common_keys() {
        assert_eq!(
            &EntityKind::Transaction.envelope_keys()[4..],
            &["sales", "records", "transactions"]
        );
    }

    #[test]
    fn placeholder_ids_are_one_based() {
        assert_eq!(EntityKind::StockBatch.placeholder_id(0), "BATCH-1");
        assert_eq!(EntityKind::Transaction.placeholder_id(4), "TX-5");
    }

    #[test]
    fn placeholder_shape_is_recognized() {
        assert!(EntityKind::Supplier.is_placeholder_id("SUPPLIER-12"));
        assert!(!EntityKind::Supplier.is_placeholder_id("SUPPLIER-"));
        assert!(!EntityKind::Supplier.is_placeholder_id("SUPPLIER-1a"));
        assert!(!EntityKind::Supplier.is_placeholder_id("PRODUCT-1"));
        assert!(!EntityKind::Supplier.is_placeholder_id("42"));
    }
}
