//! List screens

use async_trait::async_trait;

use super::Notification;
use super::Route;
use crate::EquipProClient;
use crate::auth::Session;
use crate::error::Error;
use crate::model::Equipment;
use crate::model::Record;
use crate::model::TableRow;
use crate::model::Ticket;
use crate::model::User;
use crate::model::to_records;
use crate::table::Browser;
use crate::table::BrowserConfig;
use crate::table::Command;

/// Fetches the rows of one list screen.
///
/// The loader is the screen's only I/O; the browser never calls it.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Typed payload of one row.
    type Row: TableRow + Send;

    /// Fetches the full collection.
    async fn load(&self) -> Result<Vec<Self::Row>, Error>;

    /// Detail page for a row, if the screen has one.
    fn detail_route(&self, _record: &Record) -> Option<Route> {
        None
    }
}

/// A list view: a browser filled by a loader.
///
/// # Example
///
/// ```ignore
/// let mut screen = ListScreen::new(OwnerTickets::new(client, session), BrowserConfig::default());
/// if let Some(notification) = screen.refresh().await {
///     show(notification);
/// }
/// screen.dispatch(Command::apply_filter("status", "waiting"));
/// for row in screen.browser().visible_cells() {
///     println!("{}", row.join(" | "));
/// }
/// ```
pub struct ListScreen<L: Loader> {
    loader: L,
    browser: Browser,
}

impl<L: Loader> ListScreen<L> {
    /// Mounts a screen with an empty collection.
    pub fn new(loader: L, config: BrowserConfig) -> Self {
        Self {
            browser: Browser::empty(L::Row::columns(), config),
            loader,
        }
    }

    /// Returns the loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the browser.
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Applies a browser command.
    pub fn dispatch(&mut self, command: Command) {
        self.browser.dispatch(command);
    }

    /// Fetches the collection and replaces the browser's records.
    ///
    /// On failure the previous records stay in place and a failure
    /// notification is returned.
    pub async fn refresh(&mut self) -> Option<Notification> {
        match self.loader.load().await {
            Ok(rows) => {
                self.browser.replace_records(to_records(&rows));
                None
            }
            Err(e) => {
                log::error!("failed to load list: {}", e);
                Some(Notification::failure())
            }
        }
    }

    /// Returns the detail route of the n-th visible row.
    pub fn select(&self, visible_row: usize) -> Option<Route> {
        let index = self.browser.source_index_of_visible(visible_row)?;
        self.loader.detail_route(&self.browser.records()[index])
    }
}

// =============================================================================
// Loaders
// =============================================================================

/// Tickets on the signed-in client's equipment.
#[derive(Debug, Clone)]
pub struct OwnerTickets {
    client: EquipProClient,
    session: Session,
}

impl OwnerTickets {
    pub fn new(client: EquipProClient, session: Session) -> Self {
        Self { client, session }
    }
}

#[async_trait]
impl Loader for OwnerTickets {
    type Row = Ticket;

    async fn load(&self) -> Result<Vec<Ticket>, Error> {
        self.client.owner_tickets(self.session.subject()).await
    }

    fn detail_route(&self, record: &Record) -> Option<Route> {
        client_ticket_route(record)
    }
}

/// Detail page of a ticket row on the client dashboard.
pub fn client_ticket_route(record: &Record) -> Option<Route> {
    let id = record.get_int("ticketId").ok().flatten()?;
    Some(Route::new(format!("/client/ticket-details/{}", id)))
}

/// All clients (admin).
#[derive(Debug, Clone)]
pub struct Clients {
    client: EquipProClient,
}

impl Clients {
    pub fn new(client: EquipProClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Loader for Clients {
    type Row = User;

    async fn load(&self) -> Result<Vec<User>, Error> {
        self.client.clients().await
    }
}

/// All equipment (admin).
#[derive(Debug, Clone)]
pub struct Equipments {
    client: EquipProClient,
}

impl Equipments {
    pub fn new(client: EquipProClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Loader for Equipments {
    type Row = Equipment;

    async fn load(&self) -> Result<Vec<Equipment>, Error> {
        self.client.equipments().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::ApiError;

    /// Serves queued responses, one per `load`.
    struct QueuedUsers {
        responses: Mutex<Vec<Result<Vec<User>, Error>>>,
    }

    impl QueuedUsers {
        fn new(mut responses: Vec<Result<Vec<User>, Error>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl Loader for QueuedUsers {
        type Row = User;

        async fn load(&self) -> Result<Vec<User>, Error> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        fn detail_route(&self, record: &Record) -> Option<Route> {
            let cin = record.get_string("cin").ok().flatten()?;
            Some(Route::new(format!("/admin/clients/{}", cin)))
        }
    }

    fn user(cin: &str, first: &str) -> User {
        User {
            cin: cin.to_string(),
            first_name: Some(first.to_string()),
            last_name: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn test_refresh_fills_and_resets_browser() {
        let loader = QueuedUsers::new(vec![
            Ok(vec![user("A1", "Sara"), user("B2", "Omar")]),
            Ok(vec![user("C3", "Lina")]),
        ]);
        let mut screen = ListScreen::new(loader, BrowserConfig::default());

        assert_eq!(screen.refresh().await, None);
        assert_eq!(screen.browser().records().len(), 2);

        screen.dispatch(Command::apply_filter("firstName", "om"));
        assert_eq!(screen.browser().filtered_len(), 1);

        assert_eq!(screen.refresh().await, None);
        assert!(screen.browser().filters().is_empty());
        assert_eq!(
            screen.browser().visible_cells(),
            vec![vec![
                "C3".to_string(),
                "Lina".to_string(),
                String::new(),
                String::new()
            ]]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_records() {
        let loader = QueuedUsers::new(vec![
            Ok(vec![user("A1", "Sara")]),
            Err(Error::Api(ApiError::http(500, "boom"))),
        ]);
        let mut screen = ListScreen::new(loader, BrowserConfig::default());

        screen.refresh().await;
        let notification = screen.refresh().await;

        assert_eq!(notification, Some(Notification::failure()));
        assert_eq!(screen.browser().records().len(), 1);
    }

    #[tokio::test]
    async fn test_select_routes_through_visible_row() {
        let loader = QueuedUsers::new(vec![Ok(vec![
            user("A1", "Sara"),
            user("B2", "Omar"),
            user("C3", "Lina"),
        ])]);
        let mut screen = ListScreen::new(loader, BrowserConfig::new(1));
        screen.refresh().await;

        screen.dispatch(Command::apply_filter("cin", "c"));
        assert_eq!(screen.select(0), Some(Route::new("/admin/clients/C3")));
        assert_eq!(screen.select(1), None);
    }

    #[test]
    fn test_owner_ticket_route() {
        let record = Record::new().set("ticketId", 42i64);
        assert_eq!(
            client_ticket_route(&record),
            Some(Route::new("/client/ticket-details/42"))
        );
        assert_eq!(client_ticket_route(&Record::new()), None);
    }
}
