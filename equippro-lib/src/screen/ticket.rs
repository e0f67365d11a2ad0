//! Ticket detail screen

use super::Confirmation;
use super::Notification;
use super::Outcome;
use super::Route;
use crate::EquipProClient;
use crate::error::Error;
use crate::model::Ticket;
use crate::model::User;

/// Route the admin is sent to after deleting a ticket.
pub const TICKET_LIST_ROUTE: &str = "/admin/tickets";

/// One editable field of a ticket.
///
/// Status is not editable: it only moves to closed through
/// [`TicketDetails::close`], which also sets the close date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketField {
    Comment(String),
    Task(String),
    /// Assigns the technician with this `cin`, or unassigns on `None`.
    Technician(Option<String>),
}

/// A single ticket with its edit draft.
///
/// Edits go to a draft copy; the loaded ticket only changes after a
/// successful save or a reload. Close and delete act on the loaded ticket.
#[derive(Debug, Clone)]
pub struct TicketDetails {
    client: EquipProClient,
    ticket: Ticket,
    draft: Option<Ticket>,
    technicians: Vec<User>,
    notification: Option<Notification>,
}

impl TicketDetails {
    /// Fetches a ticket and the technicians it can be assigned to.
    ///
    /// Only the ticket is required. If the technicians cannot be fetched the
    /// screen still opens with an empty list and a pending failure
    /// notification (see [`take_notification`](Self::take_notification)).
    pub async fn load(client: EquipProClient, id: i64) -> Result<Self, Error> {
        let ticket = client.ticket(id).await?;
        let (technicians, notification) = match client.technicians().await {
            Ok(technicians) => (technicians, None),
            Err(e) => {
                log::error!("failed to load technicians: {}", e);
                (Vec::new(), Some(Notification::failure()))
            }
        };
        log::debug!(
            "loaded ticket {} with {} technicians",
            id,
            technicians.len()
        );
        Ok(Self {
            client,
            ticket,
            draft: None,
            technicians,
            notification,
        })
    }

    /// Returns the notification raised while loading, once.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Returns the ticket as last loaded or saved.
    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// Returns the draft while editing, otherwise the loaded ticket.
    pub fn current(&self) -> &Ticket {
        self.draft.as_ref().unwrap_or(&self.ticket)
    }

    pub fn technicians(&self) -> &[User] {
        &self.technicians
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Returns `true` if the draft differs from the loaded ticket.
    pub fn changes_made(&self) -> bool {
        self.draft.as_ref().is_some_and(|d| *d != self.ticket)
    }

    /// Enters edit mode with a fresh draft. No-op when already editing.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.ticket.clone());
        }
    }

    /// Changes one field of the draft, entering edit mode if needed.
    pub fn edit(&mut self, field: TicketField) {
        let technician = match &field {
            TicketField::Technician(Some(cin)) => Some(
                self.technicians
                    .iter()
                    .find(|t| t.cin == *cin)
                    .cloned()
                    .unwrap_or_else(|| User::reference(cin.clone())),
            ),
            _ => None,
        };

        let draft = self.draft.get_or_insert_with(|| self.ticket.clone());
        match field {
            TicketField::Comment(comment) => draft.comment = Some(comment),
            TicketField::Task(task) => draft.task = Some(task),
            TicketField::Technician(_) => draft.technician = technician,
        }
    }

    /// Drops the draft.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Sends the draft to the backend.
    ///
    /// Without changes this just leaves edit mode. On failure the draft is
    /// kept so the user can retry.
    pub async fn save(&mut self) -> Outcome {
        if !self.changes_made() {
            self.draft = None;
            return Outcome::none();
        }
        let Some(draft) = self.draft.as_ref() else {
            return Outcome::none();
        };

        match self.client.update_ticket(draft).await {
            Ok(()) => {
                self.ticket = draft.clone();
                self.draft = None;
                self.reload().await;
                Outcome::notify(Notification::success("Changes saved successfully"))
            }
            Err(e) => {
                log::error!("failed to save ticket {}: {}", draft.id, e);
                Outcome::notify(Notification::failure())
            }
        }
    }

    /// Returns `true` if the ticket is open and not being edited.
    pub fn can_close(&self) -> bool {
        !self.ticket.is_closed() && !self.is_editing()
    }

    /// Closes the ticket and reloads it to pick up the close date.
    pub async fn close(&mut self) -> Outcome {
        if !self.can_close() {
            return Outcome::none();
        }
        match self.client.close_ticket(self.ticket.id).await {
            Ok(()) => {
                self.reload().await;
                Outcome::notify(Notification::success_with_text(
                    "Success",
                    "Ticket closed successfully",
                ))
            }
            Err(e) => {
                log::error!("failed to close ticket {}: {}", self.ticket.id, e);
                Outcome::notify(Notification::failure())
            }
        }
    }

    /// Deletes the ticket once the user has confirmed.
    pub async fn delete(&mut self, confirmation: Confirmation) -> Outcome {
        if confirmation == Confirmation::Cancelled {
            return Outcome::none();
        }
        match self.client.delete_ticket(self.ticket.id).await {
            Ok(()) => Outcome::notify(Notification::success("Ticket deleted successfully"))
                .then_navigate(Route::new(TICKET_LIST_ROUTE)),
            Err(e) => {
                log::error!("failed to delete ticket {}: {}", self.ticket.id, e);
                Outcome::notify(Notification::failure())
            }
        }
    }

    /// Refetches the ticket. A failed reload keeps the current copy.
    async fn reload(&mut self) {
        match self.client.ticket(self.ticket.id).await {
            Ok(ticket) => self.ticket = ticket,
            Err(e) => log::warn!("failed to reload ticket {}: {}", self.ticket.id, e),
        }
    }
}
