//! Equipment

use serde::Deserialize;
use serde::Serialize;

use super::Record;
use super::TableRow;
use super::User;
use super::types::ApiDate;
use crate::table::Column;
use crate::table::Schema;
use crate::table::render_yes_no;

/// A piece of equipment tracked by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Equipment reference (primary key).
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<ApiDate>,
    /// Client or technician the equipment is assigned to.
    #[serde(default)]
    pub owner: Option<User>,
}

impl Equipment {
    /// Returns the owner's `cin`, if assigned.
    pub fn owner_cin(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.cin.as_str())
    }
}

impl TableRow for Equipment {
    fn columns() -> Schema {
        Schema::new(vec![
            Column::text("ref", "Reference").sortable(),
            Column::exact("available", "Available").render(render_yes_no),
            Column::text("creationDate", "Creation Date").sortable(),
            Column::text("owner", "Owner"),
        ])
    }

    fn to_record(&self) -> Record {
        Record::new()
            .set("ref", self.reference.as_str())
            .set("available", self.available)
            .set("creationDate", self.creation_date.map(|d| d.date()))
            .set("owner", self.owner_cin())
    }
}
