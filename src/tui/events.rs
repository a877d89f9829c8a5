//! Event handling for the TUI.
//!
//! This module provides:
//! - `Event`: The unified event type (keyboard, mouse wheel, tick, resize)
//! - `EventHandler`: Async event stream from the terminal and a tick timer

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEventKind};
use eyre::{Result, eyre};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Unified event type for the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Mouse wheel, in card rows (positive scrolls down)
    Scroll(i32),
    /// Periodic tick for redraw
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

/// Handles terminal and tick events.
///
/// Both sources are cancel safe, so `next()` can sit in a `select!` next to
/// other futures without losing input.
pub struct EventHandler {
    stream: EventStream,
    ticker: Interval,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate. Needs a running tokio runtime.
    pub fn new(tick_rate_ms: u64) -> Self {
        let mut ticker = tokio::time::interval(Duration::from_millis(tick_rate_ms.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            stream: EventStream::new(),
            ticker,
        }
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Ok(Event::Tick),
                maybe = self.stream.next() => match maybe {
                    Some(Ok(event)) => {
                        if let Some(event) = translate(event) {
                            return Ok(event);
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Err(eyre!("Terminal event stream closed")),
                },
            }
        }
    }
}

/// Map a crossterm event onto ours; `None` for events the UI ignores.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        // Only handle key press events, not release
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(Event::Scroll(1)),
            MouseEventKind::ScrollUp => Some(Event::Scroll(-1)),
            _ => None,
        },
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}
