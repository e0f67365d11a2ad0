//! Ticket endpoints

use reqwest::Method;

use crate::EquipProClient;
use crate::client::segment;
use crate::error::Error;
use crate::model::Ticket;

impl EquipProClient {
    /// Lists the tickets raised on equipment owned by `owner_cin`.
    ///
    /// `GET /tickets/equipment-owner-tickets/{cin}`
    pub async fn owner_tickets(&self, owner_cin: &str) -> Result<Vec<Ticket>, Error> {
        self.get_json(&format!(
            "/tickets/equipment-owner-tickets/{}",
            segment(owner_cin)
        ))
        .await
    }

    /// Retrieves one ticket.
    ///
    /// `GET /tickets/ticket/{id}`
    pub async fn ticket(&self, id: i64) -> Result<Ticket, Error> {
        self.get_json(&format!("/tickets/ticket/{}", id)).await
    }

    /// Saves an edited ticket.
    ///
    /// `PUT /tickets/update`. Nested users are sent as `{ "cin": ... }`.
    pub async fn update_ticket(&self, ticket: &Ticket) -> Result<(), Error> {
        self.send_json(Method::PUT, "/tickets/update", &ticket.to_update_payload())
            .await
    }

    /// Closes a ticket; the backend sets its close date.
    ///
    /// `PUT /tickets/close/{id}`
    pub async fn close_ticket(&self, id: i64) -> Result<(), Error> {
        self.request(Method::PUT, &format!("/tickets/close/{}", id), None)
            .await?;
        Ok(())
    }

    /// Deletes a ticket.
    ///
    /// `DELETE /tickets/delete/{id}`
    pub async fn delete_ticket(&self, id: i64) -> Result<(), Error> {
        self.request(Method::DELETE, &format!("/tickets/delete/{}", id), None)
            .await?;
        Ok(())
    }
}
