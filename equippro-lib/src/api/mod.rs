//! REST API operations
//!
//! Each submodule adds the endpoints of one backend resource to
//! [`EquipProClient`](crate::EquipProClient).

mod equipment;
mod tickets;
mod users;
