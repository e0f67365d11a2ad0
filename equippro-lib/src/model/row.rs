//! Mapping from typed payloads to table records

use super::Record;
use crate::table::Schema;

/// A typed API payload that can be shown as one table row.
///
/// Each screen deserializes its strongly typed payload at the boundary and
/// maps it to a [`Record`] here; fields absent from the payload become
/// `Null` cells, fields unknown to the payload never reach the table.
pub trait TableRow {
    /// The column schema of the screen listing this row type.
    fn columns() -> Schema;

    /// Flattens the payload into a record keyed by column.
    fn to_record(&self) -> Record;
}

/// Maps a batch of payloads to records, preserving order.
pub fn to_records<T: TableRow>(rows: &[T]) -> Vec<Record> {
    rows.iter().map(TableRow::to_record).collect()
}
