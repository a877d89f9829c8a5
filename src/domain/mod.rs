//! Domain types for scrollfeed
//!
//! - User: one record returned by the remote source, passed through for display
//! - PageRequest: the transient parameters of a single page fetch

pub mod page;
pub mod user;

pub use page::{DEFAULT_SEED, PAGE_SIZE, PageRequest, TOTAL_PAGES};
pub use user::{Location, Name, Picture, User};
