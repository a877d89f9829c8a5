//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, the app, the feed driver and the
//! visibility observer. Each pass renders, reports the sentinel's position to
//! the observer, then waits for whichever comes first: a terminal event, a
//! visibility change or a finished load.

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::grid::SENTINEL_HEIGHT;
use super::views::{body_area, render};
use crate::feed::{FeedDriver, FeedLoader, LoadOutcome};
use crate::viewport::{VisibilityObserver, VisibilitySubscription};
use eyre::Result;
use log::{error, info};
use ratatui::layout::Rect;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    /// The terminal instance
    terminal: Tui,
    /// View state and input handling
    app: App,
    /// Event handler for keyboard and tick events
    event_handler: EventHandler,
    /// In-flight page loads
    driver: FeedDriver,
    /// Watches the sentinel row
    observer: VisibilityObserver,
}

impl TuiRunner {
    /// Create a new TUI runner. Must be called inside a tokio runtime.
    pub fn new(terminal: Tui, loader: FeedLoader, tick_rate_ms: u64) -> Self {
        let app = App::new(loader.settings().max_pages, loader.source_name());
        Self {
            terminal,
            app,
            event_handler: EventHandler::new(tick_rate_ms),
            driver: FeedDriver::new(loader),
            observer: VisibilityObserver::new(),
        }
    }

    /// Run the main TUI loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");

        let mut subscription = self.observer.observe(SENTINEL_HEIGHT as u32);
        self.driver.start();

        let result = self.event_loop(&mut subscription).await;

        teardown(subscription, &mut self.driver);
        info!("TUI main loop ended");
        result
    }

    async fn event_loop(&mut self, subscription: &mut VisibilitySubscription) -> Result<()> {
        let reader = self.driver.loader().reader();

        loop {
            // 1. Lay out and render current state
            let size = self.terminal.size()?;
            let body = body_area(Rect::new(0, 0, size.width, size.height));
            self.app.set_geometry(body, reader.len());

            let app = &self.app;
            let terminal = &mut self.terminal;
            reader.with(|state| terminal.draw(|f| render(f, app, state)).map(|_| ()))?;

            // 2. Report where the sentinel is
            self.observer.update(self.app.sentinel_start(), self.app.viewport());

            // 3. Wait for the next thing to happen
            tokio::select! {
                event = self.event_handler.next() => match event? {
                    Event::Key(key) => {
                        if self.app.handle_key(key) {
                            return Ok(()); // Quit requested
                        }
                    }
                    Event::Scroll(delta) => self.app.scroll_by(delta),
                    Event::Tick | Event::Resize(_, _) => {
                        // Next pass redraws
                    }
                },
                Some(visible) = subscription.recv() => {
                    if let Some(page) = self.driver.visibility_changed(visible) {
                        info!("Sentinel visible, advanced to page {}", page);
                    }
                }
                Some(outcome) = self.driver.next_completion(), if !self.driver.is_idle() => {
                    Self::report(outcome);
                }
            }

            if self.app.should_quit() {
                return Ok(());
            }
        }
    }

    fn report(outcome: LoadOutcome) {
        match outcome.result {
            Ok(()) => info!("Page {} loaded", outcome.page),
            // nothing retries; the loading row stays up
            Err(e) => error!("Failed to load page {}: {}", outcome.page, e),
        }
    }
}

/// Stop watching the sentinel and abort in-flight loads
fn teardown(subscription: VisibilitySubscription, driver: &mut FeedDriver) {
    subscription.unobserve();
    driver.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedSettings;
    use crate::source::MockRecordSource;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_teardown_detaches_and_aborts() {
        let source = Arc::new(MockRecordSource::new());
        source.hold(1);
        let mut driver = FeedDriver::new(FeedLoader::new(source.clone(), FeedSettings::default()));
        let mut observer = VisibilityObserver::new();
        let subscription = observer.observe(SENTINEL_HEIGHT as u32);
        driver.start();

        teardown(subscription, &mut driver);

        assert!(!observer.is_observing());
        assert!(driver.next_completion().await.is_none());
        assert!(driver.loader().reader().is_empty());
    }
}
