//! List view state
//!
//! [`ListView`] owns everything a list page displays: committed search text,
//! filters, sort, pagination, column layout, selection and the record drawer.
//! Every query mutation re-runs the pure pipeline (filter -> sort) over the
//! source rows and stores the resulting index order; pagination is a window
//! into that order. Presentation layers only call actions and read accessors;
//! they never reach into the pipeline stages directly.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::grid::columns::ColumnLayout;
use crate::grid::debounce::Debouncer;
use crate::grid::filter::{filter_rows, Filter, FilterSet};
use crate::grid::page::{page_slice, total_pages};
use crate::grid::prefs::StoreError;
use crate::grid::record::Row;
use crate::grid::sort::{cycle, sort_rows, SortSpec};

/// Initial settings for a list view
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Fields scanned by free-text search; empty disables search
    pub search_fields: Vec<String>,
    /// Sort applied on open and restored by reset
    pub default_sort: Option<SortSpec>,
    /// Rows per page
    pub page_size: usize,
    /// Delay before typed search text is committed
    pub debounce: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_fields: Vec::new(),
            default_sort: None,
            page_size: 25,
            debounce: Duration::from_millis(300),
        }
    }
}

/// Owned state of one list page
pub struct ListView<R: Row> {
    rows: Vec<R>,
    config: ViewConfig,

    /// Committed search text (participates in filtering)
    search: String,
    /// Raw text as typed, ahead of the debounce
    search_input: String,
    debouncer: Debouncer,

    filters: FilterSet,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
    columns: ColumnLayout,

    /// Selected source-row indices; survives paging, not query changes
    selection: BTreeSet<usize>,
    /// Source-row index shown in the record drawer
    detail: Option<usize>,

    /// Filtered + sorted source indices
    processed: Vec<usize>,
}

impl<R: Row> ListView<R> {
    pub fn new(rows: Vec<R>, columns: ColumnLayout, config: ViewConfig) -> Self {
        let mut view = Self {
            rows,
            search: String::new(),
            search_input: String::new(),
            debouncer: Debouncer::new(config.debounce),
            filters: FilterSet::new(),
            sort: config.default_sort.clone(),
            page: 1,
            page_size: config.page_size,
            columns,
            selection: BTreeSet::new(),
            detail: None,
            processed: Vec::new(),
            config,
        };
        view.recompute();
        view
    }

    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    fn recompute(&mut self) {
        let kept = filter_rows(
            &self.rows,
            &self.search,
            &self.config.search_fields,
            &self.filters,
        );
        self.processed = sort_rows(&self.rows, &kept, self.sort.as_ref());

        // Never leave the view parked on a page that no longer exists
        let total = self.total_pages();
        if self.page > total {
            self.page = 1;
        }
        if let Some(open) = self.detail {
            if !self.processed.contains(&open) {
                self.detail = None;
            }
        }
    }

    /// A search/filter/sort change invalidates the old result view
    fn after_query_change(&mut self) {
        self.page = 1;
        self.selection.clear();
        self.recompute();
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Swap in a fresh record collection (e.g. after a reload)
    ///
    /// Selection and drawer refer to indices in the old collection and are
    /// cleared; search, filters, sort, page size and columns are kept.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.selection.clear();
        self.detail = None;
        self.recompute();
    }

    /// Filtered and sorted source indices
    pub fn processed(&self) -> &[usize] {
        &self.processed
    }

    /// Rows surviving the current query, before pagination
    pub fn result_count(&self) -> usize {
        self.processed.len()
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Committed search text
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Raw input, ahead of the debounce
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Record a keystroke; the text commits after the debounce interval
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.search_input = text.clone();
        self.debouncer.submit(text, now);
    }

    /// Advance the debounce clock; returns true if search text committed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) => {
                self.commit_search(text);
                true
            }
            None => false,
        }
    }

    /// Commit any pending typed text immediately (e.g. on Enter)
    pub fn flush_search(&mut self) {
        if let Some(text) = self.debouncer.flush() {
            self.commit_search(text);
        }
    }

    /// Set search text directly, bypassing the debounce
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search_input = text.clone();
        self.debouncer.cancel();
        self.commit_search(text);
    }

    fn commit_search(&mut self, text: String) {
        if text != self.search {
            self.search = text;
            self.after_query_change();
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn set_filter(&mut self, field: impl Into<String>, filter: Filter) {
        self.filters.set(field, filter);
        self.after_query_change();
    }

    pub fn remove_filter(&mut self, field: &str) {
        if self.filters.remove(field).is_some() {
            self.after_query_change();
        }
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.after_query_change();
    }

    /// Clear the filter map; committed search text is untouched
    pub fn reset_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.after_query_change();
        }
    }

    /// Number of constraining filter entries; search is counted separately
    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    // ------------------------------------------------------------------
    // Sort
    // ------------------------------------------------------------------

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn set_sort(&mut self, spec: Option<SortSpec>) {
        if spec != self.sort {
            self.sort = spec;
            self.after_query_change();
        }
    }

    /// Header-click cycle: asc -> desc -> none
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = cycle(self.sort.as_ref(), field);
        self.after_query_change();
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.processed.len(), self.page_size)
    }

    /// Jump to a page; anything out of range lands back on page 1
    pub fn set_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.page = if page >= 1 && page <= total { page } else { 1 };
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        if self.page < total {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Changing granularity invalidates the old offset
    pub fn set_page_size(&mut self, size: usize) {
        if size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Source indices on the current page
    pub fn page_indices(&self) -> &[usize] {
        page_slice(&self.processed, self.page, self.page_size)
    }

    /// Rows on the current page, in display order
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices().iter().map(|&i| &self.rows[i]).collect()
    }

    // ------------------------------------------------------------------
    // Selection & record drawer
    // ------------------------------------------------------------------

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Select a row by source index; rejected if not in the current results
    pub fn select(&mut self, index: usize) -> bool {
        if self.processed.contains(&index) {
            self.selection.insert(index);
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self, index: usize) {
        self.selection.remove(&index);
    }

    /// Replace the selection; indices outside the current results are dropped
    pub fn set_selected(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.selection = indices
            .into_iter()
            .filter(|i| self.processed.contains(i))
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Open the record drawer on a row in the current results
    pub fn open_detail(&mut self, index: usize) -> bool {
        if self.processed.contains(&index) {
            self.detail = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<usize> {
        self.detail
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnLayout {
        &mut self.columns
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Restore every sub-state to its initial default
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        self.filters.clear();
        self.search.clear();
        self.search_input.clear();
        self.debouncer.cancel();
        self.sort = self.config.default_sort.clone();
        self.page = 1;
        self.page_size = self.config.page_size;
        self.selection.clear();
        self.detail = None;
        self.recompute();
        self.columns.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::columns::ColumnDef;
    use crate::grid::prefs::MemoryStore;
    use crate::grid::record::Value;
    use std::collections::BTreeMap;

    type MapRow = BTreeMap<String, Value>;

    fn person(name: &str, age: Option<f64>) -> MapRow {
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), Value::from(name));
        row.insert("age".to_string(), Value::from(age));
        row
    }

    fn people(n: usize) -> Vec<MapRow> {
        (0..n)
            .map(|i| person(&format!("person-{i:02}"), Some(i as f64)))
            .collect()
    }

    fn test_layout() -> ColumnLayout {
        ColumnLayout::new(
            vec![ColumnDef::new("name", "Name"), ColumnDef::new("age", "Age")],
            "test",
            Box::new(MemoryStore::new()),
        )
    }

    fn view(rows: Vec<MapRow>) -> ListView<MapRow> {
        ListView::new(
            rows,
            test_layout(),
            ViewConfig {
                search_fields: vec!["name".to_string()],
                page_size: 10,
                ..ViewConfig::default()
            },
        )
    }

    #[test]
    fn test_twenty_three_rows_paginate_as_three_pages() {
        let mut v = view(people(23));

        assert_eq!(v.total_pages(), 3);
        assert_eq!(v.page_rows().len(), 10);
        v.set_page(3);
        assert_eq!(v.page_rows().len(), 3);

        // Out-of-range request lands on page 1
        v.set_page(5);
        assert_eq!(v.page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut v = view(people(23));
        v.set_page(3);

        v.set_page_size(5);
        assert_eq!(v.page(), 1);
        assert_eq!(v.total_pages(), 5);
    }

    #[test]
    fn test_pages_cover_processed_exactly() {
        let mut v = view(people(23));
        let mut seen = Vec::new();
        for page in 1..=v.total_pages() {
            v.set_page(page);
            seen.extend_from_slice(v.page_indices());
        }
        assert_eq!(seen, v.processed());
    }

    #[test]
    fn test_query_change_resets_page_and_selection() {
        let mut v = view(people(23));
        v.set_page(2);
        let idx = v.page_indices()[0];
        assert!(v.select(idx));

        v.set_search("person-1");
        assert_eq!(v.page(), 1);
        assert!(v.selected().is_empty());
        assert_eq!(v.result_count(), 10); // person-10 .. person-19
    }

    #[test]
    fn test_selection_survives_paging() {
        let mut v = view(people(23));
        assert!(v.select(0));
        v.set_page(2);
        v.next_page();
        assert!(v.is_selected(0));
    }

    #[test]
    fn test_selection_rejects_filtered_out_rows() {
        let mut v = view(people(23));
        v.set_search("person-00");
        assert_eq!(v.result_count(), 1);

        assert!(!v.select(5));
        v.set_selected([0, 5, 9]);
        assert_eq!(v.selected().iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_sort_change_clears_selection_and_page() {
        let mut v = view(people(23));
        v.set_page(2);
        assert!(v.select(v.page_indices()[0]));

        v.toggle_sort("age");
        assert_eq!(v.page(), 1);
        assert!(v.selected().is_empty());
        assert_eq!(v.sort().unwrap(), &SortSpec::asc("age"));

        v.toggle_sort("age");
        assert_eq!(v.sort().unwrap(), &SortSpec::desc("age"));
        v.toggle_sort("age");
        assert!(v.sort().is_none());
    }

    #[test]
    fn test_filter_shrink_clamps_current_page() {
        let mut v = view(people(23));
        v.set_page(3);

        // Narrow the results to a single page; page 3 no longer exists
        v.set_filter(
            "age",
            Filter::NumberRange {
                min: None,
                max: Some(4.0),
            },
        );
        assert_eq!(v.page(), 1);
        assert_eq!(v.result_count(), 5);
    }

    #[test]
    fn test_debounced_search_commits_once() {
        let mut v = view(people(23));
        let t0 = Instant::now();
        let step = Duration::from_millis(100);

        v.type_search("p", t0);
        v.type_search("person-0", t0 + step);
        assert_eq!(v.search(), "");
        assert_eq!(v.search_input(), "person-0");

        // First keystroke's deadline passes without effect
        assert!(!v.tick(t0 + Duration::from_millis(300)));
        assert_eq!(v.search(), "");

        assert!(v.tick(t0 + step + Duration::from_millis(300)));
        assert_eq!(v.search(), "person-0");
        assert_eq!(v.result_count(), 10);
    }

    #[test]
    fn test_flush_commits_pending_text() {
        let mut v = view(people(23));
        v.type_search("person-22", Instant::now());
        v.flush_search();
        assert_eq!(v.search(), "person-22");
        assert_eq!(v.result_count(), 1);
    }

    #[test]
    fn test_active_filter_count_excludes_search() {
        let mut v = view(people(23));
        v.set_search("person");
        assert_eq!(v.active_filter_count(), 0);

        v.set_filter(
            "age",
            Filter::NumberRange {
                min: Some(1.0),
                max: None,
            },
        );
        v.set_filter("name", Filter::Equals(Value::Text(String::new())));
        assert_eq!(v.active_filter_count(), 1);
    }

    #[test]
    fn test_set_rows_keeps_query_clears_selection() {
        let mut v = view(people(23));
        v.set_search("person-0");
        assert!(v.select(0));

        v.set_rows(people(5));
        assert!(v.selected().is_empty());
        assert_eq!(v.search(), "person-0");
        assert_eq!(v.result_count(), 5); // person-00 .. person-04
    }

    #[test]
    fn test_detail_closes_when_row_leaves_results() {
        let mut v = view(people(23));
        assert!(v.open_detail(3));
        assert_eq!(v.detail(), Some(3));

        v.set_search("person-1");
        assert_eq!(v.detail(), None);

        // Still open when the row survives the new query
        v.set_search("");
        assert!(v.open_detail(12));
        v.set_search("person-1");
        assert_eq!(v.detail(), Some(12));
    }

    #[test]
    fn test_reset_all_restores_defaults() {
        let mut v = view(people(23));
        v.set_search("person-1");
        v.set_filter("age", Filter::NumberRange { min: Some(2.0), max: None });
        v.toggle_sort("age");
        v.set_page_size(5);
        v.set_page(2);
        v.columns_mut().toggle("age").unwrap();

        v.reset_all().unwrap();
        assert_eq!(v.search(), "");
        assert_eq!(v.search_input(), "");
        assert!(v.filters().is_empty());
        assert!(v.sort().is_none());
        assert_eq!(v.page(), 1);
        assert_eq!(v.page_size(), 10);
        assert_eq!(v.result_count(), 23);
        assert!(v.columns().is_visible("age"));
    }

    #[test]
    fn test_empty_collection_degrades_quietly() {
        let mut v = view(Vec::new());
        assert_eq!(v.total_pages(), 0);
        assert!(v.page_rows().is_empty());
        assert_eq!(v.page(), 1);

        v.set_search("anything");
        v.set_page(7);
        assert_eq!(v.page(), 1);
        assert!(v.page_indices().is_empty());
    }
}
