//! Browser commands.

use super::SortState;
use crate::model::Record;
use crate::model::Value;

/// A state transition of a [`Browser`](super::Browser).
///
/// Event handlers build a command and hand it to
/// [`Browser::reduce`](super::Browser::reduce), which consumes one snapshot
/// and returns the next.
#[derive(Debug, Clone)]
pub enum Command {
    /// Add, replace, or (empty value) remove a column's filter.
    ApplyFilter { key: String, value: String },
    /// Remove every filter.
    ClearFilters,
    /// Move to a page; ignored when out of range.
    SetPage(usize),
    /// Move to the next page, if any.
    NextPage,
    /// Move to the previous page, if any.
    PreviousPage,
    /// Replace one cell of the unfiltered collection.
    UpdateCell {
        row: usize,
        key: String,
        value: Value,
    },
    /// Replace the sort state.
    SetSort(SortState),
    /// Cycle the sort of a sortable column.
    ToggleSort(String),
    /// Replace the whole collection and reset view state.
    ReplaceRecords(Vec<Record>),
}

impl Command {
    /// Creates an [`ApplyFilter`](Command::ApplyFilter) command.
    pub fn apply_filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        Command::ApplyFilter {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates an [`UpdateCell`](Command::UpdateCell) command.
    pub fn update_cell(row: usize, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Command::UpdateCell {
            row,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a [`ToggleSort`](Command::ToggleSort) command.
    pub fn toggle_sort(key: impl Into<String>) -> Self {
        Command::ToggleSort(key.into())
    }
}
