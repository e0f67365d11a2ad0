//! Users (clients and technicians)

use serde::Deserialize;
use serde::Serialize;

use super::Record;
use super::TableRow;
use crate::table::Column;
use crate::table::Schema;

/// A user of the service, identified by national ID (`cin`).
///
/// The same payload describes clients, technicians and administrators; the
/// backend distinguishes them by endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub cin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Creates a reference to a user by `cin` only, as sent on writes.
    pub fn reference(cin: impl Into<String>) -> Self {
        Self {
            cin: cin.into(),
            first_name: None,
            last_name: None,
            email: None,
        }
    }

    /// Returns "cin (Last)", or just the cin when the last name is unknown.
    pub fn labelled_cin(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} ({})", self.cin, last),
            _ => self.cin.clone(),
        }
    }

    /// Returns "First Last", skipping missing parts.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TableRow for User {
    fn columns() -> Schema {
        Schema::new(vec![
            Column::text("cin", "Cin").sortable(),
            Column::text("firstName", "First Name").sortable(),
            Column::text("lastName", "Last Name").sortable(),
            Column::text("email", "Email"),
        ])
    }

    fn to_record(&self) -> Record {
        Record::new()
            .set("cin", self.cin.as_str())
            .set("firstName", self.first_name.clone())
            .set("lastName", self.last_name.clone())
            .set("email", self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_cin() {
        let mut user = User::reference("AB123");
        assert_eq!(user.labelled_cin(), "AB123");

        user.last_name = Some("Amrani".to_string());
        assert_eq!(user.labelled_cin(), "AB123 (Amrani)");
    }
}
