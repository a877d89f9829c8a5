//! TUI Application
//!
//! View-side state: scroll position, grid geometry and key handling. Feed
//! state is not stored here; it is read through a `FeedReader` at render time.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use super::grid::{CARD_HEIGHT, GridLayout};
use crate::viewport::Viewport;

/// Main TUI application state
#[derive(Debug)]
pub struct App {
    /// First visible card row
    scroll_row: u32,
    /// Body area the grid is drawn into
    body: Rect,
    /// Records laid out in the grid
    record_count: usize,
    /// Help overlay visible
    show_help: bool,
    /// Whether the app should quit
    should_quit: bool,
    /// Page count shown in the footer
    pub max_pages: u32,
    /// Source label shown in the footer
    pub source_name: String,
}

impl App {
    /// Create a new application
    pub fn new(max_pages: u32, source_name: impl Into<String>) -> Self {
        Self {
            scroll_row: 0,
            body: Rect::default(),
            record_count: 0,
            show_help: false,
            should_quit: false,
            max_pages,
            source_name: source_name.into(),
        }
    }

    pub fn scroll_row(&self) -> u32 {
        self.scroll_row
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Grid arrangement for the current body width and record count
    pub fn grid(&self) -> GridLayout {
        GridLayout::new(self.body.width, self.record_count)
    }

    /// Update geometry before a frame is drawn
    pub fn set_geometry(&mut self, body: Rect, record_count: usize) {
        self.body = body;
        self.record_count = record_count;
        self.clamp_scroll();
    }

    /// The body's window onto the content
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_row * CARD_HEIGHT as u32, self.body.height as u32)
    }

    /// First line of the sentinel row in content coordinates
    pub fn sentinel_start(&self) -> u32 {
        self.grid().sentinel_start()
    }

    fn max_scroll_row(&self) -> u32 {
        self.grid().max_scroll_row(self.body.height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_row = self.scroll_row.min(self.max_scroll_row());
    }

    /// Card rows that fit in the body
    fn rows_per_screen(&self) -> u32 {
        (self.body.height / CARD_HEIGHT).max(1) as u32
    }

    /// Scroll by `delta` card rows (negative scrolls up)
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_row = self.scroll_row.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_row = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_row = self.max_scroll_row();
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            // any key closes help
            self.show_help = false;
            return false;
        }

        let page = self.rows_per_screen() as i32;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to_bottom(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
        self.should_quit
    }
}
