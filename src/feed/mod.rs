//! Paginated feed loading
//!
//! The feed accumulates user records page by page. A page load is triggered by
//! a change of the page index, and the page index is advanced by a viewport
//! visibility signal on the row below the last record.
//!
//! - `FeedState` / `FeedReader`: the accumulated records, page index and busy flag
//! - `FeedLoader`: the only component that mutates feed state
//! - `FeedDriver`: spawns loads as independent tasks and collects completions

mod driver;
mod loader;
mod state;

pub use driver::{FeedDriver, LoadOutcome};
pub use loader::{FeedLoader, FeedSettings, VisibilityGate};
pub use state::{FeedReader, FeedState, Phase};
