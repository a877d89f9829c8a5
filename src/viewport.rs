//! Viewport visibility observation.
//!
//! The presentation layer reports its scroll geometry to a
//! [`VisibilityObserver`]; the observer decides whether the anchor (the
//! sentinel row under the last record) intersects the viewport and publishes
//! the answer to its single subscriber whenever it changes.

use tokio::sync::mpsc;

/// Vertical window onto the content, in lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(offset: u32, height: u32) -> Self {
        Self { offset, height }
    }

    /// One past the last visible line
    pub fn end(&self) -> u32 {
        self.offset.saturating_add(self.height)
    }

    /// Whether any line of `start..start + len` is on screen
    pub fn intersects(&self, start: u32, len: u32) -> bool {
        if len == 0 || self.height == 0 {
            return false;
        }
        start < self.end() && start.saturating_add(len) > self.offset
    }
}

/// Publishes anchor visibility to one subscriber
#[derive(Debug)]
pub struct VisibilityObserver {
    tx: Option<mpsc::UnboundedSender<bool>>,
    anchor_height: u32,
    last: Option<bool>,
}

impl Default for VisibilityObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityObserver {
    pub fn new() -> Self {
        Self {
            tx: None,
            anchor_height: 1,
            last: None,
        }
    }

    /// Start observing an anchor `anchor_height` lines tall.
    ///
    /// Replaces any previous subscription; the first update afterwards always
    /// publishes.
    pub fn observe(&mut self, anchor_height: u32) -> VisibilitySubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.tx = Some(tx);
        self.anchor_height = anchor_height;
        self.last = None;
        VisibilitySubscription { rx }
    }

    /// Whether a live subscriber is attached
    pub fn is_observing(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Recompute visibility for an anchor starting at `anchor_start`.
    ///
    /// Returns the value published, or `None` when nothing changed or nobody
    /// is subscribed.
    pub fn update(&mut self, anchor_start: u32, viewport: Viewport) -> Option<bool> {
        let tx = self.tx.as_ref()?;
        let visible = viewport.intersects(anchor_start, self.anchor_height);
        if self.last == Some(visible) {
            return None;
        }

        if tx.send(visible).is_err() {
            log::debug!("Visibility subscriber gone, detaching");
            self.tx = None;
            return None;
        }
        self.last = Some(visible);
        Some(visible)
    }
}

/// Receiving end of a [`VisibilityObserver`]. Dropping it unobserves.
#[derive(Debug)]
pub struct VisibilitySubscription {
    rx: mpsc::UnboundedReceiver<bool>,
}

impl VisibilitySubscription {
    /// Wait for the next visibility change
    pub async fn recv(&mut self) -> Option<bool> {
        self.rx.recv().await
    }

    /// Next pending visibility change, if any
    pub fn try_recv(&mut self) -> Option<bool> {
        self.rx.try_recv().ok()
    }

    /// Detach from the observer
    pub fn unobserve(self) {
        drop(self);
    }
}
