//! scrollfeed - infinite scroll over paged user records
//!
//! Pages of generated users are fetched from randomuser.me and accumulated in
//! order. The next page is requested when the row below the last record
//! scrolls into view.

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod source;
pub mod tui;
pub mod viewport;

pub use error::{FeedError, Result};
