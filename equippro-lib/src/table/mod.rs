//! Tabular record browser.
//!
//! A paginated, filterable, sortable view over an in-memory collection of
//! [`Record`](crate::model::Record)s, shared by every list screen:
//!
//! - [`Schema`] / [`Column`] - which fields are shown and how they render
//! - [`FilterState`] - per-column predicates, ANDed together
//! - [`SortState`] - ordered (column, direction) pairs
//! - [`Browser`] - the view itself, driven by methods or by [`Command`]s
//!
//! The browser performs no I/O. Fetching and persisting records is the job of
//! the host screen.
//!
//! # Example
//!
//! ```
//! use equippro_lib::model::Record;
//! use equippro_lib::table::{Browser, BrowserConfig, Column, Schema};
//!
//! let schema = Schema::new(vec![Column::exact("status", "Status")]);
//! let records = ["open", "open", "closed", "open", "closed"]
//!     .into_iter()
//!     .map(|s| Record::new().set("status", s))
//!     .collect();
//!
//! let mut browser = Browser::new(schema, records, BrowserConfig::new(2));
//! browser.apply_filter("status", "open");
//!
//! assert_eq!(browser.filtered_len(), 3);
//! assert_eq!(browser.page_count(), 2);
//! assert_eq!(browser.visible_rows().len(), 2);
//! ```

mod browser;
mod column;
mod command;
mod filter;
mod sort;

pub use browser::Browser;
pub use browser::BrowserConfig;
pub use browser::DEFAULT_PAGE_SIZE;
pub use column::*;
pub use command::Command;
pub use filter::ColumnFilter;
pub use filter::FilterState;
pub use sort::Direction;
pub use sort::SortState;
