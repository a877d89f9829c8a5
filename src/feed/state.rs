//! Feed state and its read-only handle.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::User;

/// Coarse state of the feed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No fetch running, more pages available
    Idle,
    /// Busy flag set
    Fetching,
    /// Last page reached and the sentinel became visible again
    Exhausted,
}

/// Accumulated session state. Mutated only by `FeedLoader`.
#[derive(Debug, Clone)]
pub struct FeedState {
    records: Vec<User>,
    page: u32,
    busy: bool,
    exhausted: bool,
    last_error: Option<String>,
    last_fetched_at: Option<DateTime<Utc>>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            page: 1,
            busy: false,
            exhausted: false,
            last_error: None,
            last_fetched_at: None,
        }
    }
}

impl FeedState {
    /// Records in append order
    pub fn records(&self) -> &[User] {
        &self.records
    }

    /// Current 1-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether a fetch is believed to be in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the feed has run out of pages
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Message of the most recent failed fetch
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the last successful page arrived
    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_at
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Fetching
        } else if self.exhausted {
            Phase::Exhausted
        } else {
            Phase::Idle
        }
    }

    pub(super) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(super) fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub(super) fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    pub(super) fn append(&mut self, users: Vec<User>) {
        self.records.extend(users);
        self.last_fetched_at = Some(Utc::now());
        self.last_error = None;
    }

    pub(super) fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
    }
}

/// Shared, lockable state
pub(super) type SharedState = Arc<Mutex<FeedState>>;

pub(super) fn lock(state: &SharedState) -> MutexGuard<'_, FeedState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read-only handle on the feed, given to the presentation layer
#[derive(Debug, Clone)]
pub struct FeedReader {
    state: SharedState,
}

impl FeedReader {
    pub(super) fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Run `f` against the current state without copying it
    pub fn with<R>(&self, f: impl FnOnce(&FeedState) -> R) -> R {
        f(&lock(&self.state))
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FeedState {
        self.with(|s| s.clone())
    }

    pub fn len(&self) -> usize {
        self.with(|s| s.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn page(&self) -> u32 {
        self.with(|s| s.page)
    }

    pub fn is_busy(&self) -> bool {
        self.with(|s| s.busy)
    }

    pub fn is_exhausted(&self) -> bool {
        self.with(|s| s.exhausted)
    }

    pub fn phase(&self) -> Phase {
        self.with(|s| s.phase())
    }

    pub fn last_error(&self) -> Option<String> {
        self.with(|s| s.last_error.clone())
    }
}
