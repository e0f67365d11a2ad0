//! Maintenance tickets

use serde::Deserialize;
use serde::Serialize;

use super::Equipment;
use super::Record;
use super::TableRow;
use super::User;
use super::types::ApiDate;
use super::types::TicketStatus;
use super::types::lenient_status;
use crate::table::Column;
use crate::table::Schema;

/// Label shown for a ticket without a close date.
pub const NOT_CLOSED_LABEL: &str = "Not closed yet";

/// A maintenance ticket raised against a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    #[serde(default)]
    pub open_date: Option<ApiDate>,
    #[serde(default)]
    pub close_date: Option<ApiDate>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub technician: Option<User>,
}

impl Ticket {
    /// Returns `true` if the ticket is closed.
    pub fn is_closed(&self) -> bool {
        self.status == Some(TicketStatus::Closed)
    }

    /// Returns the close date, or the "not closed" label.
    pub fn close_date_label(&self) -> String {
        self.close_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| NOT_CLOSED_LABEL.to_string())
    }

    /// Returns the copy of this ticket sent to the update endpoint.
    ///
    /// Nested users are reduced to their `cin`.
    pub fn to_update_payload(&self) -> Ticket {
        Ticket {
            technician: self
                .technician
                .as_ref()
                .map(|t| User::reference(t.cin.clone())),
            ..self.clone()
        }
    }
}

impl TableRow for Ticket {
    fn columns() -> Schema {
        Schema::new(vec![
            Column::text("ticketId", "Id").sortable(),
            Column::text("equipmentReference", "Equipment Reference").sortable(),
            Column::text("owner", "Owner"),
            Column::text("technician", "Technician"),
            Column::exact("status", "Status").sortable(),
        ])
    }

    fn to_record(&self) -> Record {
        let equipment = self.equipment.as_ref();
        Record::new()
            .set("ticketId", self.id)
            .set("equipmentReference", equipment.map(|e| e.reference.as_str()))
            .set("owner", equipment.and_then(|e| e.owner_cin()))
            .set(
                "technician",
                self.technician.as_ref().map(|t| t.cin.as_str()),
            )
            .set("status", self.status.map(|s| s.as_str()))
    }
}
