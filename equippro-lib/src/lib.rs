//! EquipPro dashboard library
//!
//! A tabular record browser (filter, sort, paginate, edit in place) plus the
//! async client and screens of the EquipPro maintenance-ticket service.
//!
//! - [`table`]: the synchronous [`Browser`](table::Browser) state machine.
//! - [`model`]: typed payloads and their mapping to table records.
//! - [`screen`]: list and detail screens driving the browser from the API.
//! - [`auth`]: JWT sessions and bearer token providers.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod screen;
pub mod table;

mod client;

pub use client::*;
