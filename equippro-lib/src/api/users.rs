//! User endpoints

use crate::EquipProClient;
use crate::client::segment;
use crate::error::Error;
use crate::model::User;

impl EquipProClient {
    /// Retrieves one user by `cin`.
    ///
    /// `GET /users/user/{cin}`
    pub async fn user(&self, cin: &str) -> Result<User, Error> {
        self.get_json(&format!("/users/user/{}", segment(cin))).await
    }

    /// Lists all technicians.
    ///
    /// `GET /users/technician/all`
    pub async fn technicians(&self) -> Result<Vec<User>, Error> {
        self.get_json("/users/technician/all").await
    }

    /// Lists all clients.
    ///
    /// `GET /users/client/all`
    pub async fn clients(&self) -> Result<Vec<User>, Error> {
        self.get_json("/users/client/all").await
    }
}
