//! Terminal User Interface for scrollfeed.
//!
//! A single scrolling view: a grid of user cards with a sentinel row under the
//! last card. When the sentinel scrolls into view the next page is requested.
//!
//! The TUI runs as part of the main process using tokio for async operations.

mod app;
mod events;
mod grid;
mod runner;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use grid::{CARD_HEIGHT, GridLayout, SENTINEL_HEIGHT, columns_for_width};
pub use runner::TuiRunner;

use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode, mouse capture and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?.execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Palette
pub mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const NAME: Color = Color::White;
    pub const CARD_BORDER: Color = Color::Rgb(254, 202, 202); // Red-200
    pub const LOADING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DONE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}
