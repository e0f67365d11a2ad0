//! Equipment endpoints

use crate::EquipProClient;
use crate::client::segment;
use crate::error::Error;
use crate::model::Equipment;

impl EquipProClient {
    /// Lists all equipment.
    ///
    /// `GET /equipments/all`
    pub async fn equipments(&self) -> Result<Vec<Equipment>, Error> {
        self.get_json("/equipments/all").await
    }

    /// Lists the equipment owned by `owner_cin`.
    ///
    /// `GET /equipments/owned/{cin}`
    pub async fn owned_equipments(&self, owner_cin: &str) -> Result<Vec<Equipment>, Error> {
        self.get_json(&format!("/equipments/owned/{}", segment(owner_cin)))
            .await
    }
}
