//! The paginated feed loader.

use std::sync::{Arc, Mutex};

use crate::domain::{DEFAULT_SEED, PAGE_SIZE, PageRequest, TOTAL_PAGES};
use crate::error::{FeedError, Result};
use crate::source::RecordSource;

use super::state::{FeedReader, FeedState, SharedState, lock};

/// Whether a visibility signal may advance the page while a fetch is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityGate {
    /// Every visible signal advances the page. Fetches may overlap.
    #[default]
    Unguarded,
    /// Visible signals are dropped while the busy flag is set
    InFlight,
}

/// Loader settings
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub page_size: u32,
    pub max_pages: u32,
    pub seed: String,
    pub gate: VisibilityGate,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_pages: TOTAL_PAGES,
            seed: DEFAULT_SEED.to_string(),
            gate: VisibilityGate::Unguarded,
        }
    }
}

impl FeedSettings {
    pub fn with_gate(mut self, gate: VisibilityGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn request(&self, page: u32) -> PageRequest {
        PageRequest::new(page)
            .with_results(self.page_size)
            .with_seed(self.seed.clone())
    }
}

/// Owns the feed state and funnels every mutation through its operations.
///
/// Cloning is cheap; clones share the same state and source.
#[derive(Clone)]
pub struct FeedLoader {
    source: Arc<dyn RecordSource>,
    state: SharedState,
    settings: FeedSettings,
}

impl FeedLoader {
    /// Create a loader with empty state at page 1
    pub fn new(source: Arc<dyn RecordSource>, settings: FeedSettings) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(FeedState::default())),
            settings,
        }
    }

    /// Read-only handle for the presentation layer
    pub fn reader(&self) -> FeedReader {
        FeedReader::new(self.state.clone())
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch `page` and append its records.
    ///
    /// On failure the error is returned and the busy flag stays set; records
    /// from earlier pages are kept.
    pub async fn load(&self, page: u32) -> Result<()> {
        if page == 0 || page > self.settings.max_pages {
            return Err(FeedError::InvalidPage {
                page,
                max: self.settings.max_pages,
            });
        }

        lock(&self.state).set_busy(true);
        tracing::debug!(page, source = self.source.name(), "Fetching page");

        let request = self.settings.request(page);
        match self.source.fetch_page(&request).await {
            Ok(users) => {
                let count = users.len();
                let total = {
                    let mut state = lock(&self.state);
                    state.append(users);
                    state.set_busy(false);
                    state.records().len()
                };
                tracing::info!(page, count, total, "Page loaded");
                Ok(())
            }
            Err(e) => {
                lock(&self.state).record_error(e.to_string());
                tracing::error!(page, error = %e, "Page fetch failed");
                Err(e)
            }
        }
    }

    /// React to the viewport signal on the sentinel row.
    ///
    /// Returns the new page index when the page advanced. At the last page a
    /// visible signal marks the feed exhausted instead of advancing.
    pub fn on_visibility_changed(&self, is_visible: bool) -> Option<u32> {
        if !is_visible {
            return None;
        }

        let mut state = lock(&self.state);
        if self.settings.gate == VisibilityGate::InFlight && state.is_busy() {
            tracing::debug!(page = state.page(), "Visibility signal dropped, fetch in flight");
            return None;
        }

        if state.page() >= self.settings.max_pages {
            if !state.is_exhausted() {
                tracing::info!(page = state.page(), "Feed exhausted");
            }
            state.mark_exhausted();
            return None;
        }

        let next = state.page() + 1;
        state.set_page(next);
        if self.settings.gate == VisibilityGate::InFlight {
            // claim the slot before the load task gets to run
            state.set_busy(true);
        }
        tracing::debug!(page = next, "Page advanced");
        Some(next)
    }

    /// Raise the busy flag ahead of a load that has been dispatched but not started
    pub(super) fn mark_dispatched(&self) {
        lock(&self.state).set_busy(true);
    }

    /// Whether a change to `page` should dispatch a load
    pub fn should_load(&self, page: u32) -> bool {
        page >= 1 && page <= self.settings.max_pages
    }

    /// Reaction to a page-index change: load the page if it is in range.
    pub async fn on_page_changed(&self, page: u32) -> Result<()> {
        if self.should_load(page) {
            self.load(page).await
        } else {
            Ok(())
        }
    }

    /// Initial page to load when the view comes up
    pub fn initial_page(&self) -> Option<u32> {
        let page = lock(&self.state).page();
        self.should_load(page).then_some(page)
    }

    /// Load the initial page inline
    pub async fn start(&self) -> Result<()> {
        match self.initial_page() {
            Some(page) => self.load(page).await,
            None => Ok(()),
        }
    }

    /// Visibility signal followed by the page-change reaction, awaited inline.
    ///
    /// Returns the page that was loaded, if any.
    pub async fn visible_and_advance(&self, is_visible: bool) -> Result<Option<u32>> {
        match self.on_visibility_changed(is_visible) {
            Some(page) => {
                self.on_page_changed(page).await?;
                Ok(Some(page))
            }
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for FeedLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedLoader")
            .field("source", &self.source.name())
            .field("settings", &self.settings)
            .finish()
    }
}
