//! Spawns page loads as independent tasks.
//!
//! Each dispatched load runs on its own task, so a visibility signal arriving
//! while a fetch is suspended can start a second fetch. Completions are handed
//! back in the order they finish.

use tokio::task::JoinSet;

use crate::error::Result;

use super::loader::FeedLoader;

/// A finished load
#[derive(Debug)]
pub struct LoadOutcome {
    pub page: u32,
    pub result: Result<()>,
}

/// Owns the in-flight load tasks of one feed
pub struct FeedDriver {
    loader: FeedLoader,
    tasks: JoinSet<LoadOutcome>,
}

impl FeedDriver {
    pub fn new(loader: FeedLoader) -> Self {
        Self {
            loader,
            tasks: JoinSet::new(),
        }
    }

    pub fn loader(&self) -> &FeedLoader {
        &self.loader
    }

    /// Dispatch the load of the initial page
    pub fn start(&mut self) -> Option<u32> {
        let page = self.loader.initial_page()?;
        self.dispatch(page);
        Some(page)
    }

    /// Forward a visibility signal; spawns a load when the page advanced.
    pub fn visibility_changed(&mut self, is_visible: bool) -> Option<u32> {
        let page = self.loader.on_visibility_changed(is_visible)?;
        if self.loader.should_load(page) {
            self.dispatch(page);
        }
        Some(page)
    }

    fn dispatch(&mut self, page: u32) {
        self.loader.mark_dispatched();
        let loader = self.loader.clone();
        self.tasks.spawn(async move {
            let result = loader.on_page_changed(page).await;
            LoadOutcome { page, result }
        });
    }

    /// Number of loads still running
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for the next load to finish. Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<LoadOutcome> {
        loop {
            match self.tasks.join_next().await? {
                Ok(outcome) => return Some(outcome),
                Err(e) => {
                    log::error!("Load task ended abnormally: {}", e);
                }
            }
        }
    }

    /// Abort every in-flight load
    pub fn shutdown(&mut self) {
        self.tasks.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedSettings;
    use crate::source::MockRecordSource;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_start_and_complete() {
        let source = Arc::new(MockRecordSource::new());
        let mut driver = FeedDriver::new(FeedLoader::new(source.clone(), FeedSettings::default()));

        assert_eq!(driver.start(), Some(1));
        assert_eq!(driver.in_flight(), 1);

        let outcome = driver.next_completion().await.unwrap();
        assert_eq!(outcome.page, 1);
        assert!(outcome.result.is_ok());
        assert!(driver.is_idle());
        assert!(driver.next_completion().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_outcome_is_reported() {
        let source = Arc::new(MockRecordSource::new().fail_on(1));
        let mut driver = FeedDriver::new(FeedLoader::new(source, FeedSettings::default()));

        driver.start();
        let outcome = driver.next_completion().await.unwrap();
        assert!(outcome.result.is_err());
        assert!(driver.loader().reader().is_busy());
    }

    #[tokio::test]
    async fn test_invisible_signal_dispatches_nothing() {
        let source = Arc::new(MockRecordSource::new());
        let mut driver = FeedDriver::new(FeedLoader::new(source.clone(), FeedSettings::default()));
        assert_eq!(driver.visibility_changed(false), None);
        assert!(driver.is_idle());
        assert!(source.calls().is_empty());
    }
}
