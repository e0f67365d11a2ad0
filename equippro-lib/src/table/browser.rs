//! Browser state and transitions.

use std::sync::Arc;

use super::Command;
use super::FilterState;
use super::Schema;
use super::SortState;
use crate::model::Record;
use crate::model::Value;

/// Rows per page when the host does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Browser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Rows per page; at least 1.
    pub page_size: usize,
}

impl BrowserConfig {
    /// Creates a configuration with the given page size.
    ///
    /// A page size of 0 is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// A paginated, filterable, sortable view over a record collection.
///
/// The source collection only changes through [`update_cell`](Self::update_cell)
/// and [`replace_records`](Self::replace_records). Filtering and sorting
/// produce a derived view that is recomputed from scratch on every read, so
/// reads are idempotent and side-effect free.
///
/// Cloning is cheap: the collection and schema are shared until a cell is
/// edited.
///
/// # Example
///
/// ```
/// use equippro_lib::model::Record;
/// use equippro_lib::table::{Browser, BrowserConfig, Column, Command, Schema};
///
/// let schema = Schema::new(vec![Column::text("cin", "Cin")]);
/// let records = vec![Record::new().set("cin", "AB1"), Record::new().set("cin", "CD2")];
///
/// let browser = Browser::new(schema, records, BrowserConfig::default())
///     .reduce(Command::apply_filter("cin", "cd"));
///
/// assert_eq!(browser.visible_cells(), vec![vec!["CD2".to_string()]]);
/// ```
#[derive(Debug, Clone)]
pub struct Browser {
    records: Arc<Vec<Record>>,
    schema: Arc<Schema>,
    filters: FilterState,
    sort: SortState,
    page_index: usize,
    page_size: usize,
}

impl Browser {
    /// Creates a browser over `records` with default view state.
    pub fn new(schema: Schema, records: Vec<Record>, config: BrowserConfig) -> Self {
        Self {
            records: Arc::new(records),
            schema: Arc::new(schema),
            filters: FilterState::new(),
            sort: SortState::new(),
            page_index: 0,
            page_size: config.page_size.max(1),
        }
    }

    /// Creates an empty browser, to be filled by [`replace_records`](Self::replace_records).
    pub fn empty(schema: Schema, config: BrowserConfig) -> Self {
        Self::new(schema, Vec::new(), config)
    }

    /// Sets the initial filter state.
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self.page_index = 0;
        self
    }

    /// Sets the initial sort state.
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self.page_index = 0;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the unfiltered source collection, in original order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the column schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the active filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Returns the active sort.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the current page index (zero-based).
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of records matching the filters.
    pub fn filtered_len(&self) -> usize {
        self.records
            .iter()
            .filter(|r| self.filters.matches(r, &self.schema))
            .count()
    }

    /// Returns the number of pages of the filtered view; 0 when empty.
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size)
    }

    /// Returns `true` if a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if a next page exists.
    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    // =========================================================================
    // Derived view
    // =========================================================================

    /// Source indices of the filtered, sorted view.
    fn view_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filters.matches(r, &self.schema))
            .map(|(i, _)| i)
            .collect();

        if !self.sort.is_empty() {
            // Stable: equal records keep source order.
            indices.sort_by(|&a, &b| self.sort.compare(&self.records[a], &self.records[b]));
        }

        indices
    }

    /// Source indices of the current page.
    fn page_indices(&self) -> Vec<usize> {
        let start = self.page_index * self.page_size;
        self.view_indices()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Returns the records of the current page, in view order.
    ///
    /// At most [`page_size`](Self::page_size) records are returned, all of them
    /// borrowed from the source collection.
    pub fn visible_rows(&self) -> Vec<&Record> {
        self.page_indices()
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// Returns the rendered cells of the current page, in schema order.
    ///
    /// Missing fields render as blank.
    pub fn visible_cells(&self) -> Vec<Vec<String>> {
        self.visible_rows()
            .into_iter()
            .map(|record| {
                self.schema
                    .columns()
                    .iter()
                    .map(|c| c.render_cell(record.cell(&c.key)))
                    .collect()
            })
            .collect()
    }

    /// Maps the n-th visible row to its index in the source collection.
    pub fn source_index_of_visible(&self, n: usize) -> Option<usize> {
        self.page_indices().get(n).copied()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Consumes this snapshot and returns the one after `command`.
    pub fn reduce(mut self, command: Command) -> Self {
        self.dispatch(command);
        self
    }

    /// Applies `command` in place.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::ApplyFilter { key, value } => self.apply_filter(key, value),
            Command::ClearFilters => self.clear_filters(),
            Command::SetPage(index) => self.set_page(index),
            Command::NextPage => self.next_page(),
            Command::PreviousPage => self.previous_page(),
            Command::UpdateCell { row, key, value } => self.update_cell(row, key, value),
            Command::SetSort(sort) => self.set_sort(sort),
            Command::ToggleSort(key) => self.toggle_sort(&key),
            Command::ReplaceRecords(records) => self.replace_records(records),
        }
    }

    /// Adds, replaces, or (empty value) removes the filter on a column and
    /// returns to the first page.
    pub fn apply_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        log::debug!("table filter {} = {:?}", key, value);
        self.filters.set(key, value);
        self.page_index = 0;
    }

    /// Removes every filter and returns to the first page.
    pub fn clear_filters(&mut self) {
        log::debug!("table filters cleared");
        self.filters.clear();
        self.page_index = 0;
    }

    /// Moves to page `index`; ignored when outside `[0, page_count - 1]`.
    pub fn set_page(&mut self, index: usize) {
        if index < self.page_count() {
            self.page_index = index;
        } else {
            log::trace!("table page {} out of range, ignored", index);
        }
    }

    /// Moves to the next page, if any.
    pub fn next_page(&mut self) {
        self.set_page(self.page_index + 1);
    }

    /// Moves to the previous page, if any.
    pub fn previous_page(&mut self) {
        if let Some(index) = self.page_index.checked_sub(1) {
            self.set_page(index);
        }
    }

    /// Replaces the value at (`row`, `key`) of the unfiltered collection.
    ///
    /// All other records keep their content and order. Rows outside the
    /// collection are ignored. The page index is re-clamped, since the edit
    /// may move the row out of the filtered view.
    pub fn update_cell(&mut self, row: usize, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        match Arc::make_mut(&mut self.records).get_mut(row) {
            Some(record) => {
                log::debug!("table cell ({}, {}) updated", row, key);
                record.insert(key, value);
            }
            None => {
                log::trace!("table row {} out of range, update ignored", row);
                return;
            }
        }
        self.clamp_page();
    }

    /// Replaces the sort state and returns to the first page.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page_index = 0;
    }

    /// Cycles the sort on `key` (ascending, descending, unsorted).
    ///
    /// Unknown and non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) {
        if !self.schema.get(key).is_some_and(|c| c.sortable) {
            log::trace!("table column {} is not sortable", key);
            return;
        }
        let sort = self.sort.toggled(key);
        self.set_sort(sort);
    }

    /// Replaces the whole collection and resets filter, sort and page state.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        log::debug!("table reloaded with {} records", records.len());
        self.records = Arc::new(records);
        self.filters.clear();
        self.sort = SortState::new();
        self.page_index = 0;
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use crate::table::Direction;

    const STATUSES: [&str; 5] = ["open", "open", "closed", "open", "closed"];

    fn status_schema() -> Schema {
        Schema::new(vec![
            Column::text("id", "Id").sortable(),
            Column::exact("status", "Status").sortable(),
            Column::text("owner", "Owner"),
        ])
    }

    fn status_records() -> Vec<Record> {
        STATUSES
            .iter()
            .enumerate()
            .map(|(i, s)| Record::new().set("id", i as i64).set("status", *s))
            .collect()
    }

    fn status_browser(page_size: usize) -> Browser {
        Browser::new(status_schema(), status_records(), BrowserConfig::new(page_size))
    }

    fn ids(rows: &[&Record]) -> Vec<i64> {
        rows.iter()
            .map(|r| r.get_int("id").unwrap().unwrap())
            .collect()
    }

    /// Deterministic pseudo-random records for property-style checks.
    fn generated_records(n: usize, seed: u64) -> Vec<Record> {
        let owners = ["AB12", "ab99", "CD40", "ef", ""];
        let mut state = seed;
        (0..n)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let pick = (state >> 33) as usize;
                let mut record = Record::new()
                    .set("id", i as i64)
                    .set("status", STATUSES[pick % STATUSES.len()]);
                if pick % 7 != 0 {
                    record.insert("owner", owners[pick % owners.len()]);
                }
                record
            })
            .collect()
    }

    #[test]
    fn test_status_example() {
        let mut browser = status_browser(2);
        browser.apply_filter("status", "open");

        assert_eq!(browser.filtered_len(), 3);
        assert_eq!(browser.page_count(), 2);
        assert_eq!(ids(&browser.visible_rows()), vec![0, 1]);

        browser.set_page(1);
        assert_eq!(ids(&browser.visible_rows()), vec![3]);

        browser.set_page(2);
        assert_eq!(browser.page_index(), 1);
        assert_eq!(ids(&browser.visible_rows()), vec![3]);
    }

    #[test]
    fn test_clearing_filter_restores_original_order() {
        let mut browser = status_browser(10);
        browser.apply_filter("status", "open");
        browser.apply_filter("status", "");

        let rows: Vec<Record> = browser.visible_rows().into_iter().cloned().collect();
        assert_eq!(rows, status_records());

        browser.apply_filter("status", "closed");
        browser.clear_filters();
        assert_eq!(ids(&browser.visible_rows()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut browser = status_browser(1);
        browser.set_page(3);
        assert_eq!(browser.page_index(), 3);

        browser.apply_filter("status", "open");
        assert_eq!(browser.page_index(), 0);
    }

    #[test]
    fn test_page_navigation_flags() {
        let mut browser = status_browser(2);
        assert_eq!(browser.page_count(), 3);
        assert!(!browser.can_previous_page());
        assert!(browser.can_next_page());

        browser.next_page();
        browser.next_page();
        assert_eq!(browser.page_index(), 2);
        assert!(browser.can_previous_page());
        assert!(!browser.can_next_page());

        browser.next_page();
        assert_eq!(browser.page_index(), 2);

        browser.previous_page();
        assert_eq!(browser.page_index(), 1);
    }

    #[test]
    fn test_set_page_is_idempotent() {
        let mut browser = status_browser(2);
        browser.set_page(1);
        let first = ids(&browser.visible_rows());
        browser.set_page(1);
        assert_eq!(ids(&browser.visible_rows()), first);
        assert_eq!(first, vec![2, 3]);
    }

    #[test]
    fn test_empty_collection() {
        let mut browser = Browser::empty(status_schema(), BrowserConfig::default());
        assert_eq!(browser.page_count(), 0);
        assert!(browser.visible_rows().is_empty());
        assert!(!browser.can_previous_page());
        assert!(!browser.can_next_page());

        browser.set_page(0);
        assert_eq!(browser.page_index(), 0);
    }

    #[test]
    fn test_zero_page_size_is_raised_to_one() {
        let browser = status_browser(0);
        assert_eq!(browser.page_size(), 1);
        assert_eq!(browser.page_count(), 5);
    }

    #[test]
    fn test_update_cell_changes_only_target() {
        let mut browser = status_browser(10);
        browser.update_cell(2, "status", "open");

        let mut expected = status_records();
        expected[2].insert("status", "open");
        assert_eq!(browser.records(), expected.as_slice());
        assert_eq!(browser.records()[2].get_string("status").unwrap(), Some("open"));
    }

    #[test]
    fn test_update_cell_moves_row_out_of_filter_and_clamps_page() {
        let mut browser = status_browser(2);
        browser.apply_filter("status", "open");
        browser.set_page(1);
        assert_eq!(ids(&browser.visible_rows()), vec![3]);

        browser.update_cell(3, "status", "closed");
        assert_eq!(browser.filtered_len(), 2);
        assert_eq!(browser.page_index(), 0);
        assert_eq!(ids(&browser.visible_rows()), vec![0, 1]);
    }

    #[test]
    fn test_update_cell_brings_row_into_filter() {
        let mut browser = status_browser(10);
        browser.apply_filter("status", "open");
        browser.update_cell(4, "status", "open");
        assert_eq!(ids(&browser.visible_rows()), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_update_cell_out_of_range_is_ignored() {
        let mut browser = status_browser(10);
        browser.update_cell(99, "status", "open");
        assert_eq!(browser.records(), status_records().as_slice());
    }

    #[test]
    fn test_update_cell_does_not_touch_earlier_snapshots() {
        let before = status_browser(10);
        let after = before
            .clone()
            .reduce(Command::update_cell(0, "status", "closed"));

        assert_eq!(before.records()[0].get_string("status").unwrap(), Some("open"));
        assert_eq!(after.records()[0].get_string("status").unwrap(), Some("closed"));
    }

    #[test]
    fn test_missing_schema_key_renders_blank() {
        let browser = status_browser(1);
        assert_eq!(
            browser.visible_cells(),
            vec![vec!["0".to_string(), "open".to_string(), String::new()]]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let mut browser = status_browser(10);
        browser.set_sort(SortState::asc("status"));
        assert_eq!(ids(&browser.visible_rows()), vec![2, 4, 0, 1, 3]);

        browser.set_sort(SortState::desc("status"));
        assert_eq!(ids(&browser.visible_rows()), vec![0, 1, 3, 2, 4]);
    }

    #[test]
    fn test_sort_does_not_mutate_source() {
        let mut browser = status_browser(10);
        browser.set_sort(SortState::desc("id"));
        assert_eq!(ids(&browser.visible_rows()), vec![4, 3, 2, 1, 0]);
        assert_eq!(browser.records(), status_records().as_slice());
    }

    #[test]
    fn test_toggle_sort_ignores_non_sortable_columns() {
        let mut browser = status_browser(10);
        browser.toggle_sort("owner");
        assert!(browser.sort().is_empty());

        browser.toggle_sort("status");
        assert_eq!(browser.sort().direction("status"), Some(Direction::Asc));
        browser.toggle_sort("status");
        assert_eq!(browser.sort().direction("status"), Some(Direction::Desc));
        browser.toggle_sort("status");
        assert!(browser.sort().is_empty());
    }

    #[test]
    fn test_source_index_of_visible() {
        let mut browser = status_browser(2);
        browser.apply_filter("status", "closed");
        assert_eq!(browser.source_index_of_visible(0), Some(2));
        assert_eq!(browser.source_index_of_visible(1), Some(4));
        assert_eq!(browser.source_index_of_visible(2), None);
    }

    #[test]
    fn test_replace_records_resets_view_state() {
        let mut browser = status_browser(2)
            .with_filters(FilterState::new().with("status", "open"))
            .with_sort(SortState::desc("id"));
        browser.set_page(1);

        browser.replace_records(status_records().into_iter().take(3).collect());

        assert!(browser.filters().is_empty());
        assert!(browser.sort().is_empty());
        assert_eq!(browser.page_index(), 0);
        assert_eq!(ids(&browser.visible_rows()), vec![0, 1]);
    }

    #[test]
    fn test_reduce_matches_methods() {
        let commands = vec![
            Command::apply_filter("status", "open"),
            Command::NextPage,
            Command::update_cell(0, "owner", "AB12"),
            Command::toggle_sort("id"),
            Command::toggle_sort("id"),
            Command::SetPage(1),
            Command::PreviousPage,
        ];

        let reduced = commands
            .iter()
            .cloned()
            .fold(status_browser(2), Browser::reduce);

        let mut mutated = status_browser(2);
        mutated.apply_filter("status", "open");
        mutated.next_page();
        mutated.update_cell(0, "owner", "AB12");
        mutated.toggle_sort("id");
        mutated.toggle_sort("id");
        mutated.set_page(1);
        mutated.previous_page();

        assert_eq!(reduced.records(), mutated.records());
        assert_eq!(reduced.page_index(), mutated.page_index());
        assert_eq!(reduced.sort(), mutated.sort());
        assert_eq!(ids(&reduced.visible_rows()), ids(&mutated.visible_rows()));
    }

    #[test]
    fn test_visible_rows_bounded_and_drawn_from_source() {
        for seed in 0..20u64 {
            let records = generated_records(23, seed);
            for page_size in [1, 3, 10, 50] {
                let mut browser =
                    Browser::new(status_schema(), records.clone(), BrowserConfig::new(page_size));
                browser.apply_filter("owner", "ab");
                for page in 0..browser.page_count() {
                    browser.set_page(page);
                    let rows = browser.visible_rows();
                    assert!(rows.len() <= page_size);
                    assert!(rows.iter().all(|r| records.contains(r)));
                }
            }
        }
    }

    #[test]
    fn test_filter_soundness_and_completeness() {
        let schema = status_schema();
        for seed in 0..20u64 {
            let records = generated_records(31, seed);
            let filters = FilterState::new().with("status", "open").with("owner", "AB");
            let browser = Browser::new(schema.clone(), records.clone(), BrowserConfig::new(100))
                .with_filters(filters.clone());

            let visible = browser.visible_rows();
            assert!(visible.iter().all(|r| filters.matches(r, &schema)));

            let expected: Vec<&Record> = records
                .iter()
                .filter(|r| {
                    r.cell("status").as_text() == "open"
                        && r.cell("owner").as_text().to_lowercase().contains("ab")
                })
                .collect();
            assert_eq!(visible, expected);
        }
    }

    #[test]
    fn test_pages_cover_filtered_view_exactly_once() {
        let records = generated_records(17, 7);
        let mut browser = Browser::new(status_schema(), records, BrowserConfig::new(4));
        browser.apply_filter("status", "closed");

        let mut seen = Vec::new();
        for page in 0..browser.page_count() {
            browser.set_page(page);
            seen.extend(ids(&browser.visible_rows()));
        }
        assert_eq!(seen.len(), browser.filtered_len());
        let mut sorted = seen.clone();
        sorted.dedup();
        assert_eq!(sorted, seen);
    }
}
