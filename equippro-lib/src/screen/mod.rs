//! Host screens
//!
//! A screen owns a [`Browser`](crate::table::Browser) or a detail payload,
//! performs the fetches and saves around it, and reports the outcome as a
//! [`Notification`] and an optional [`Route`] for the UI layer to act on.

mod list;
mod outcome;
mod ticket;

pub use list::*;
pub use outcome::*;
pub use ticket::*;
