//! Scalar types shared by API payloads

mod date;
mod status;

pub use date::*;
pub use status::*;
