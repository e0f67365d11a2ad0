//! Column schema.

use crate::model::Value;

/// Renders a cell value for display.
pub type RenderFn = fn(&Value) -> String;

/// How a column's filter predicate is matched against cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Text,
    /// Exact match on the cell's canonical text.
    Exact,
}

impl MatchMode {
    /// Returns `true` if `value` satisfies `predicate` under this mode.
    ///
    /// An empty predicate matches everything.
    pub fn matches(&self, value: &Value, predicate: &str) -> bool {
        if predicate.is_empty() {
            return true;
        }
        if matches!(value, Value::Record(_)) {
            return false;
        }
        let text = value.as_text();
        match self {
            MatchMode::Text => text.to_lowercase().contains(&predicate.to_lowercase()),
            MatchMode::Exact => text == predicate,
        }
    }
}

/// Column definition.
///
/// # Examples
///
/// ```
/// use equippro_lib::table::{Column, render_yes_no};
///
/// let columns = vec![
///     Column::text("cin", "Cin").sortable(),
///     Column::exact("status", "Status"),
///     Column::exact("available", "Available").render(render_yes_no),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Record field this column reads.
    pub key: String,
    /// Header text.
    pub header: String,
    /// How filters on this column match.
    pub match_mode: MatchMode,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Cell renderer.
    pub render: RenderFn,
}

impl Column {
    /// Creates a column matched by case-insensitive substring.
    pub fn text(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            match_mode: MatchMode::Text,
            sortable: false,
            render: render_plain,
        }
    }

    /// Creates a column matched by exact value.
    pub fn exact(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            match_mode: MatchMode::Exact,
            ..Self::text(key, header)
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the cell renderer.
    pub fn render(mut self, render: RenderFn) -> Self {
        self.render = render;
        self
    }

    /// Renders a cell value with this column's renderer.
    pub fn render_cell(&self, value: &Value) -> String {
        (self.render)(value)
    }
}

/// Default renderer: the value's canonical text, blank for null.
pub fn render_plain(value: &Value) -> String {
    value.as_text()
}

/// Renders booleans as "Yes"/"No".
pub fn render_yes_no(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        other => other.as_text(),
    }
}

/// Ordered sequence of column definitions.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates a schema from columns, in display order.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Returns the column with the given key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns the match mode for a key; unknown keys match as text.
    pub fn match_mode(&self, key: &str) -> MatchMode {
        self.get(key).map(|c| c.match_mode).unwrap_or_default()
    }

    /// Returns the columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the header labels in display order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Vec<Column>> for Schema {
    fn from(columns: Vec<Column>) -> Self {
        Self::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_match_is_case_insensitive_substring() {
        let value = Value::from("Underway");
        assert!(MatchMode::Text.matches(&value, "under"));
        assert!(MatchMode::Text.matches(&value, "WAY"));
        assert!(!MatchMode::Text.matches(&value, "closed"));
    }

    #[test]
    fn test_exact_match() {
        let value = Value::from("open");
        assert!(MatchMode::Exact.matches(&value, "open"));
        assert!(!MatchMode::Exact.matches(&value, "ope"));
        assert!(MatchMode::Exact.matches(&Value::from(12i64), "12"));
    }

    #[test]
    fn test_null_only_matches_empty_predicate() {
        assert!(MatchMode::Text.matches(&Value::Null, ""));
        assert!(!MatchMode::Text.matches(&Value::Null, "a"));
        assert!(!MatchMode::Exact.matches(&Value::Null, "a"));
    }

    #[test]
    fn test_schema_lookup() {
        let schema = Schema::new(vec![
            Column::text("cin", "Cin"),
            Column::exact("status", "Status"),
        ]);
        assert_eq!(schema.headers(), vec!["Cin", "Status"]);
        assert_eq!(schema.match_mode("status"), MatchMode::Exact);
        assert_eq!(schema.match_mode("unknown"), MatchMode::Text);
    }

    #[test]
    fn test_render_yes_no() {
        assert_eq!(render_yes_no(&Value::from(true)), "Yes");
        assert_eq!(render_yes_no(&Value::Null), "");
    }
}
