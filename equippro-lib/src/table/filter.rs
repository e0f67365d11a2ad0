//! Per-column filter state.

use super::Schema;
use crate::model::Record;

/// An active predicate on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    /// Column key the predicate applies to.
    pub key: String,
    /// Predicate value; never empty.
    pub value: String,
}

/// Active per-column predicates, ANDed together.
///
/// At most one predicate exists per column key. Setting an empty predicate
/// removes the column's entry. Entry order carries no meaning.
///
/// # Example
///
/// ```
/// use equippro_lib::table::FilterState;
///
/// let filters = FilterState::new()
///     .with("status", "open")
///     .with("owner", "ab");
/// assert_eq!(filters.len(), 2);
///
/// let filters = filters.with("owner", "");
/// assert_eq!(filters.get("owner"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    entries: Vec<ColumnFilter>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds, replaces, or (for an empty value) removes a column's predicate.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if value.is_empty() {
            self.entries.retain(|f| f.key != key);
            return;
        }

        match self.entries.iter_mut().find(|f| f.key == key) {
            Some(existing) => existing.value = value,
            None => self.entries.push(ColumnFilter { key, value }),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the predicate for a column, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Removes every predicate.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the active predicates.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnFilter> {
        self.entries.iter()
    }

    /// Returns the number of active predicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `record` satisfies every active predicate.
    ///
    /// Each column matches according to its schema [`MatchMode`](super::MatchMode).
    pub fn matches(&self, record: &Record, schema: &Schema) -> bool {
        self.entries.iter().all(|f| {
            schema
                .match_mode(&f.key)
                .matches(record.cell(&f.key), &f.value)
        })
    }
}

impl PartialEq for FilterState {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|f| other.get(&f.key) == Some(f.value.as_str()))
    }
}

impl Eq for FilterState {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn schema() -> Schema {
        Schema::new(vec![
            Column::text("owner", "Owner"),
            Column::exact("status", "Status"),
        ])
    }

    #[test]
    fn test_one_entry_per_key() {
        let mut filters = FilterState::new();
        filters.set("status", "open");
        filters.set("status", "closed");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("status"), Some("closed"));
    }

    #[test]
    fn test_empty_value_removes_entry() {
        let mut filters = FilterState::new().with("status", "open");
        filters.set("status", "");
        assert!(filters.is_empty());

        // Removing an absent key is harmless.
        filters.set("owner", "");
        assert!(filters.is_empty());
    }

    #[test]
    fn test_order_is_irrelevant_for_equality() {
        let a = FilterState::new().with("status", "open").with("owner", "x");
        let b = FilterState::new().with("owner", "x").with("status", "open");
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches_all_predicates() {
        let schema = schema();
        let record = Record::new().set("owner", "AB123").set("status", "open");

        assert!(FilterState::new().matches(&record, &schema));
        assert!(
            FilterState::new()
                .with("owner", "ab")
                .with("status", "open")
                .matches(&record, &schema)
        );
        assert!(
            !FilterState::new()
                .with("owner", "ab")
                .with("status", "Open")
                .matches(&record, &schema)
        );
    }

    #[test]
    fn test_missing_field_does_not_match() {
        let schema = schema();
        let record = Record::new().set("status", "open");
        assert!(!FilterState::new().with("owner", "a").matches(&record, &schema));
    }

    #[test]
    fn test_unknown_key_matches_as_text() {
        let schema = schema();
        let record = Record::new().set("task", "Replace Fan");
        assert!(FilterState::new().with("task", "fan").matches(&record, &schema));
    }
}
