//! Card grid geometry.
//!
//! Content is measured in terminal lines. Cards are `CARD_HEIGHT` lines tall
//! and laid out row-major; the sentinel row sits right below the last card row.

use ratatui::layout::Rect;

/// Lines per card, borders included
pub const CARD_HEIGHT: u16 = 5;

/// Columns between cards
pub const CARD_GAP: u16 = 1;

/// Lines reserved for the sentinel row
pub const SENTINEL_HEIGHT: u16 = 2;

/// Grid columns for a body width: one on narrow terminals, up to three on wide ones
pub fn columns_for_width(width: u16) -> u16 {
    match width {
        w if w >= 96 => 3,
        w if w >= 64 => 2,
        _ => 1,
    }
}

/// Row/column arrangement of `count` cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u16,
    pub rows: u32,
}

impl GridLayout {
    pub fn new(width: u16, count: usize) -> Self {
        let columns = columns_for_width(width);
        let rows = (count as u32).div_ceil(columns as u32);
        Self { columns, rows }
    }

    /// Lines taken by the cards
    pub fn content_height(&self) -> u32 {
        self.rows * CARD_HEIGHT as u32
    }

    /// First line of the sentinel row
    pub fn sentinel_start(&self) -> u32 {
        self.content_height()
    }

    /// Lines taken by cards plus sentinel
    pub fn total_height(&self) -> u32 {
        self.content_height() + SENTINEL_HEIGHT as u32
    }

    /// Largest card-row scroll that still fills the viewport
    pub fn max_scroll_row(&self, viewport_height: u16) -> u32 {
        self.total_height()
            .saturating_sub(viewport_height as u32)
            .div_ceil(CARD_HEIGHT as u32)
    }

    /// Screen area of card `index` when scrolled to `scroll_row`, if any of it is visible
    pub fn card_rect(&self, index: usize, area: Rect, scroll_row: u32) -> Option<Rect> {
        let columns = self.columns as usize;
        let row = (index / columns) as u32;
        let col = (index % columns) as u16;
        if row < scroll_row {
            return None;
        }

        let top = (row - scroll_row) * CARD_HEIGHT as u32;
        if top >= area.height as u32 {
            return None;
        }
        let top = top as u16;

        let gaps = CARD_GAP * (self.columns - 1);
        let width = area.width.saturating_sub(gaps) / self.columns;
        Some(Rect {
            x: area.x + col * (width + CARD_GAP),
            y: area.y + top,
            width,
            height: CARD_HEIGHT.min(area.height - top),
        })
    }

    /// Screen area of the sentinel row, if visible
    pub fn sentinel_rect(&self, area: Rect, scroll_row: u32) -> Option<Rect> {
        let top = self.sentinel_start().checked_sub(scroll_row * CARD_HEIGHT as u32)?;
        if top >= area.height as u32 {
            return None;
        }
        let top = top as u16;
        Some(Rect {
            x: area.x,
            y: area.y + top,
            width: area.width,
            height: SENTINEL_HEIGHT.min(area.height - top),
        })
    }
}
