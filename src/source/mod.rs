//! Remote record sources
//!
//! This module provides:
//! - RecordSource trait: one page in, one batch of users out
//! - RandomUserClient: HTTP implementation against randomuser.me
//! - MockRecordSource: deterministic in-memory source with scripted failures

pub mod mock;
pub mod random_user;

pub use mock::MockRecordSource;
pub use random_user::{DEFAULT_BASE_URL, RandomUserClient, RandomUserConfig};

use async_trait::async_trait;

use crate::domain::{PageRequest, User};
use crate::error::Result;

/// A source of user records, addressed by page
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch one page. Records come back in the order the source returned them.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<User>>;

    /// Short label for logs and the status bar
    fn name(&self) -> &str;
}
