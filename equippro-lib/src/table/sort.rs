//! Sort state.

use std::cmp::Ordering;

use crate::model::Record;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Parses `asc`/`desc`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Ordered list of (column key, direction) pairs.
///
/// The first pair is the primary key; later pairs break ties.
///
/// # Example
///
/// ```
/// use equippro_lib::table::SortState;
///
/// let sort = SortState::desc("status").then_asc("ticketId");
/// assert_eq!(sort.fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    fields: Vec<(String, Direction)>,
}

impl SortState {
    /// Creates an empty (unsorted) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ascending order on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            fields: vec![(key.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            fields: vec![(key.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending order on a column.
    pub fn then_asc(self, key: impl Into<String>) -> Self {
        self.then(key, Direction::Asc)
    }

    /// Adds a secondary descending order on a column.
    pub fn then_desc(self, key: impl Into<String>) -> Self {
        self.then(key, Direction::Desc)
    }

    /// Adds a column with the given direction, replacing any earlier entry
    /// for the same key.
    pub fn then(mut self, key: impl Into<String>, direction: Direction) -> Self {
        let key = key.into();
        self.fields.retain(|(k, _)| *k != key);
        self.fields.push((key, direction));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Returns the direction for a column, if sorted.
    pub fn direction(&self, key: &str) -> Option<Direction> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| *d)
    }

    /// Returns `true` if no ordering is active.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Cycles a single-column sort: ascending, descending, then unsorted.
    ///
    /// Toggling a column other than the current primary one starts a fresh
    /// ascending sort on it.
    pub fn toggled(&self, key: &str) -> Self {
        match self.fields.as_slice() {
            [(k, Direction::Asc)] if k == key => Self::desc(key),
            [(k, Direction::Desc)] if k == key => Self::new(),
            _ => Self::asc(key),
        }
    }

    /// Compares two records under this ordering.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for (key, direction) in &self.fields {
            let ordering = a.cell(key).compare(b.cell(key));
            let ordering = match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
