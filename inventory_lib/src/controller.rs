//! List data controller: fetch, normalize, search, and page one list view.

use std::cmp::Ordering;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use inventory_api::types::{Product, PurchaseOrder, StockBatch, Supplier, Transaction};
use serde::Serialize;
use serde_json::Value;

use crate::error::InventoryError;
use crate::filter::{matches, normalize_term};
use crate::normalize::{normalize_response, Normalize};
use crate::pager::{paginate, PageWindow};

/// Where a controller is in its fetch cycle.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last load failed; the list is empty.
    Error(String),
}

/// A server-confirmed change to apply to the loaded list.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation<T> {
    Created(T),
    Updated(T),
    /// Id of the removed record.
    Deleted(String),
}

/// Records with a stable identity inside a list.
pub trait Identified {
    fn record_id(&self) -> &str;
}

impl Identified for Product {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Identified for Transaction {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Identified for PurchaseOrder {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Identified for Supplier {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Identified for StockBatch {
    fn record_id(&self) -> &str {
        &self.batch_number
    }
}

/// Shared flag telling an in-flight load whether its view still exists.
#[derive(Clone, Debug, Default)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    /// Marks the owning view as gone. Later load completions are discarded.
    pub fn release(&self) {
        self.0.store(true, AtomicOrdering::SeqCst);
    }

    pub fn is_alive(&self) -> bool {
        !self.0.load(AtomicOrdering::SeqCst)
    }
}

type SortFn<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Holds one list view's records and derives the visible page from them.
///
/// The filtered set and page index are recomputed after every change, so the
/// page is always a valid index into the current filtered set.
pub struct ListController<T> {
    state: FetchState,
    records: Vec<T>,
    filtered: Vec<usize>,
    search_term: String,
    page: usize,
    page_size: usize,
    sort: Option<SortFn<T>>,
    liveness: Liveness,
}

impl<T> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("records", &self.records.len())
            .field("filtered", &self.filtered.len())
            .field("search_term", &self.search_term)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl<T> ListController<T>
where
    T: Normalize + Identified + Serialize,
{
    pub fn new(page_size: usize) -> Self {
        Self {
            state: FetchState::Idle,
            records: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            page: 0,
            page_size: page_size.max(1),
            sort: None,
            liveness: Liveness::default(),
        }
    }

    /// Orders records after every load and mutation.
    pub fn with_sort(mut self, compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort = Some(Box::new(compare));
        self
    }

    /// Handle for the owning view to release on teardown.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    pub fn begin_load(&mut self) {
        self.state = FetchState::Loading;
    }

    /// Applies a fetch result. Once the view has been released the result is
    /// discarded and an in-flight load falls back to `Idle`.
    pub fn finish_load(&mut self, result: Result<Value, InventoryError>) {
        if !self.liveness.is_alive() {
            tracing::debug!("Discarding load result for released view");
            if self.state == FetchState::Loading {
                self.state = FetchState::Idle;
            }
            return;
        }
        match result {
            Ok(response) => {
                self.records = normalize_response(&response);
                self.state = FetchState::Ready;
            }
            Err(e) => {
                tracing::error!("Failed to load {} list: {}", T::KIND, e);
                self.records.clear();
                self.state = FetchState::Error(e.to_string());
            }
        }
        self.page = 0;
        self.refresh_view();
    }

    /// Runs `fetch` and stores its normalized result.
    ///
    /// Always leaves the controller in `Ready` or `Error`, unless the view was
    /// released meanwhile.
    pub async fn load<F, Fut, E>(&mut self, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
        E: Into<InventoryError>,
    {
        if !self.liveness.is_alive() {
            return;
        }
        self.begin_load();
        let result = fetch().await.map_err(Into::into);
        self.finish_load(result);
    }

    /// Sets the search term and returns to the first page.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.page = 0;
        self.refresh_view();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Moves to `page_index`, clamped to the filtered set.
    pub fn set_page(&mut self, page_index: i64) {
        self.page = paginate(self.filtered.len(), self.page_size, page_index).safe_page_index;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page as i64 + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page as i64 - 1);
    }

    pub fn window(&self) -> PageWindow {
        paginate(self.filtered.len(), self.page_size, self.page as i64)
    }

    /// Records on the current page of the filtered set.
    pub fn current_page(&self) -> Vec<&T> {
        self.window()
            .slice(&self.filtered)
            .iter()
            .map(|&index| &self.records[index])
            .collect()
    }

    /// Size of the filtered set.
    pub fn total_count(&self) -> usize {
        self.filtered.len()
    }

    /// Every loaded record, ignoring the search term.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Edits the loaded records in place, then re-sorts and re-filters.
    pub fn update_records(&mut self, edit: impl FnOnce(&mut [T])) {
        edit(&mut self.records);
        self.refresh_view();
    }

    /// Splices a confirmed create/update/delete into the loaded list.
    ///
    /// Creates and updates replace any record with the same id so the list
    /// never shows duplicates. Placeholder ids are display labels, not
    /// identities, so a record carrying one is always inserted. The current
    /// page is re-clamped afterwards.
    pub fn after_mutate(&mut self, mutation: Mutation<T>) {
        match mutation {
            Mutation::Created(record) => {
                if !T::KIND.is_placeholder_id(record.record_id()) {
                    self.records
                        .retain(|existing| existing.record_id() != record.record_id());
                }
                self.records.insert(0, record);
            }
            Mutation::Updated(record) => {
                let position = if T::KIND.is_placeholder_id(record.record_id()) {
                    None
                } else {
                    self.records
                        .iter()
                        .position(|existing| existing.record_id() == record.record_id())
                };
                match position {
                    Some(position) => self.records[position] = record,
                    None => self.records.insert(0, record),
                }
            }
            Mutation::Deleted(id) => self.records.retain(|existing| existing.record_id() != id),
        }
        self.refresh_view();
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    fn refresh_view(&mut self) {
        if let Some(compare) = &self.sort {
            self.records.sort_by(|a, b| compare(a, b));
        }
        let term = normalize_term(&self.search_term);
        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches(*record, &term))
            .map(|(index, _)| index)
            .collect();
        self.set_page(self.page as i64);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::normalize_record;

    fn suppliers(count: usize) -> Value {
        let items: Vec<Value> = (1..=count)
            .map(|i| json!({"id": i, "name": format!("Supplier {i}")}))
            .collect();
        json!({ "data": items })
    }

    fn ready(count: usize, page_size: usize) -> ListController<Supplier> {
        let mut controller = ListController::new(page_size);
        controller.finish_load(Ok(suppliers(count)));
        controller
    }

    #[tokio::test]
    async fn load_reaches_ready() {
        let mut controller = ListController::<Supplier>::new(6);
        assert_eq!(controller.state(), &FetchState::Idle);

        controller
            .load(|| async { Ok::<_, InventoryError>(suppliers(8)) })
            .await;

        assert_eq!(controller.state(), &FetchState::Ready);
        assert_eq!(controller.total_count(), 8);
        assert_eq!(controller.current_page().len(), 6);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn failed_load_sets_error_and_empties_list() {
        let mut controller = ready(4, 6);
        controller
            .load(|| async {
                Err::<Value, _>(inventory_api::Error::HttpStatus {
                    status: 503,
                    body: String::new(),
                })
            })
            .await;

        assert!(controller.error().is_some_and(|msg| msg.contains("503")));
        assert!(controller.records().is_empty());
        assert_eq!(controller.window().total_pages, 1);
    }

    #[tokio::test]
    async fn released_view_ignores_completion() {
        let mut controller = ready(2, 6);
        controller.liveness().release();
        controller
            .load(|| async { Ok::<_, InventoryError>(suppliers(9)) })
            .await;
        assert_eq!(controller.total_count(), 2);

        controller.finish_load(Ok(suppliers(5)));
        assert_eq!(controller.total_count(), 2);
    }

    #[test]
    fn release_during_load_settles_idle() {
        let mut controller = ListController::<Supplier>::new(6);
        controller.begin_load();
        assert!(controller.is_loading());

        controller.liveness().release();
        controller.finish_load(Ok(suppliers(3)));

        assert_eq!(controller.state(), &FetchState::Idle);
        assert!(!controller.is_loading());
        assert!(controller.records().is_empty());
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut controller = ListController::<Supplier>::new(3);
        controller.finish_load(Ok(json!([
            {"id": 1, "name": "Acme Foods"},
            {"id": 2, "name": "Bolt"},
            {"id": 3, "name": "Cedar"},
            {"id": 4, "name": "Delta", "email": "orders@acme.test"},
            {"id": 5, "name": "Echo"},
            {"id": 6, "name": "Fox"},
            {"id": 7, "name": "Golf"},
            {"id": 8, "name": "Hotel"},
            {"id": 9, "name": "India"},
            {"id": 10, "name": "ACME Two"},
        ])));
        controller.set_page(2);
        assert_eq!(controller.window().safe_page_index, 2);

        controller.set_search_term("acme");

        assert_eq!(controller.window().safe_page_index, 0);
        let ids: Vec<&str> = controller.current_page().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4", "10"]);
    }

    #[test]
    fn delete_reclamps_page() {
        let mut controller = ready(7, 6);
        controller.set_page(1);
        assert_eq!(controller.current_page().len(), 1);

        controller.after_mutate(Mutation::Deleted("7".to_string()));

        assert_eq!(controller.total_count(), 6);
        assert_eq!(controller.window().safe_page_index, 0);
        assert_eq!(controller.current_page().len(), 6);
    }

    #[test]
    fn create_and_update_never_duplicate() {
        let mut controller = ready(3, 6);
        let updated: Supplier =
            normalize_record(&json!({"data": {"id": 2, "name": "Renamed"}}), 0).unwrap();
        controller.after_mutate(Mutation::Updated(updated.clone()));
        controller.after_mutate(Mutation::Created(updated));

        assert_eq!(controller.total_count(), 3);
        assert_eq!(controller.current_page()[0].name, "Renamed");
    }

    #[test]
    fn id_less_replies_never_evict_loaded_rows() {
        let mut controller = ListController::<Supplier>::new(6);
        controller.finish_load(Ok(json!([
            {"name": "Existing no-id"},
            {"id": 2, "name": "Bolt"},
        ])));
        assert_eq!(controller.records()[0].id, "SUPPLIER-1");

        let created: Supplier = normalize_record(&json!({"data": {"name": "New"}}), 0).unwrap();
        assert_eq!(created.id, "SUPPLIER-1");
        controller.after_mutate(Mutation::Created(created));

        let updated: Supplier = normalize_record(&json!({"name": "Edited"}), 0).unwrap();
        controller.after_mutate(Mutation::Updated(updated));

        let names: Vec<&str> = controller.records().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Edited", "New", "Existing no-id", "Bolt"]);
        assert_eq!(controller.total_count(), 4);
    }

    #[test]
    fn paging_steps_stay_in_range() {
        let mut controller = ready(13, 6);
        controller.previous_page();
        assert_eq!(controller.window().safe_page_index, 0);
        controller.next_page();
        controller.next_page();
        controller.next_page();
        assert_eq!(controller.window().safe_page_index, 2);
        assert_eq!(controller.window().summary(), "Showing 13 to 13 of 13 results");
    }

    #[test]
    fn sort_applies_after_load_and_mutation() {
        let mut controller =
            ListController::<Supplier>::new(6).with_sort(|a, b| a.name.cmp(&b.name));
        controller.finish_load(Ok(json!([{"id": 1, "name": "Zulu"}, {"id": 2, "name": "Alpha"}])));
        let created = Supplier::normalize(&json!({"id": 3, "name": "Mike"}), 0).unwrap();
        controller.after_mutate(Mutation::Created(created));

        let names: Vec<&str> = controller.records().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mike", "Zulu"]);
    }
}
