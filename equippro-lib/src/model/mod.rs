//! Typed models

mod equipment;
mod record;
mod row;
mod ticket;
pub mod types;
mod user;
mod value;

pub use equipment::*;
pub use record::*;
pub use row::*;
pub use ticket::*;
pub use user::*;
pub use value::*;
