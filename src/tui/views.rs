//! TUI Views
//!
//! Header, card grid, sentinel row, footer and the help overlay.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::app::App;
use super::colors;
use crate::domain::User;
use crate::feed::{FeedState, Phase};

const TITLE: &str = "Infinite scroll with intersection observer";
const LOADING: &str = "Loading...";
const EXHAUSTED: &str = "✋, Take a breath.";

/// Split the screen into header, body and footer
fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(2)])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Area the grid is drawn into for a given screen size
pub fn body_area(area: Rect) -> Rect {
    split(area)[1]
}

/// Draw one frame
pub fn render(frame: &mut Frame, app: &App, state: &FeedState) {
    let [header, body, footer] = split(frame.area());

    render_header(frame, header);
    render_grid(frame, body, app, state);
    render_footer(frame, footer, app, state);

    if app.show_help() {
        render_help(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App, state: &FeedState) {
    let grid = app.grid();
    let scroll_row = app.scroll_row();

    for (index, user) in state.records().iter().enumerate() {
        if let Some(rect) = grid.card_rect(index, area, scroll_row) {
            frame.render_widget(user_card(user), rect);
        }
    }

    if let Some(rect) = grid.sentinel_rect(area, scroll_row) {
        frame.render_widget(sentinel(state), rect);
    }
}

/// A card: name, location, email
fn user_card(user: &User) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(
            user.display_name(),
            Style::default().fg(colors::NAME).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(user.location_line())),
        Line::from(Span::styled(user.email.clone(), Style::default().fg(colors::DIM))),
    ];

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors::CARD_BORDER)),
    )
}

/// Row under the last card; doubles as the visibility anchor
fn sentinel(state: &FeedState) -> Paragraph<'static> {
    let mut spans = Vec::new();
    if state.is_busy() {
        spans.push(Span::styled(LOADING, Style::default().fg(colors::LOADING)));
    }
    if state.is_exhausted() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(EXHAUSTED, Style::default().fg(colors::DONE)));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn phase_label(phase: Phase) -> (&'static str, ratatui::style::Color) {
    match phase {
        Phase::Idle => ("idle", colors::DIM),
        Phase::Fetching => ("fetching", colors::LOADING),
        Phase::Exhausted => ("done", colors::DONE),
    }
}

/// Footer: feed status on the first line, key hints on the second
fn status_line(app: &App, state: &FeedState) -> Line<'static> {
    let (label, color) = phase_label(state.phase());
    let mut spans = vec![
        Span::raw(format!(
            " page {}/{} │ {} users │ {} │ ",
            state.page(),
            app.max_pages,
            state.records().len(),
            app.source_name
        )),
        Span::styled(label, Style::default().fg(color)),
    ];
    if let Some(err) = state.last_error() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(err.to_string(), Style::default().fg(colors::ERROR)));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, state: &FeedState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(colors::KEYBIND));
    let hints = Line::from(vec![
        Span::raw(" "),
        key("j/k"),
        Span::raw(" scroll  "),
        key("PgDn/PgUp"),
        Span::raw(" page  "),
        key("g/G"),
        Span::raw(" top/bottom  "),
        key("?"),
        Span::raw(" help  "),
        key("q"),
        Span::raw(" quit"),
    ]);

    frame.render_widget(Paragraph::new(vec![status_line(app, state), hints]), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 44, 11);
    let lines = vec![
        Line::from("j / Down        scroll down one row"),
        Line::from("k / Up          scroll up one row"),
        Line::from("Space / PgDn    scroll down a screen"),
        Line::from("PgUp            scroll up a screen"),
        Line::from("g / Home        jump to top"),
        Line::from("G / End         jump to bottom"),
        Line::from("q / Esc         quit"),
        Line::from(""),
        Line::from(Span::styled("press any key to close", Style::default().fg(colors::DIM))),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageRequest;
    use crate::feed::{FeedLoader, FeedSettings};
    use crate::source::MockRecordSource;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_body_area_leaves_header_and_footer() {
        let body = body_area(Rect::new(0, 0, 80, 24));
        assert_eq!(body, Rect::new(0, 3, 80, 19));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let rect = centered(Rect::new(0, 0, 20, 5), 44, 11);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_render_empty_feed() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::new(10, "mock");
        let state = FeedState::default();
        app.set_geometry(body_area(Rect::new(0, 0, 80, 24)), 0);

        terminal.draw(|f| render(f, &app, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Infinite scroll"));
        assert!(text.contains("page 1/10"));
        assert!(text.contains("0 users"));
    }

    #[tokio::test]
    async fn test_render_loaded_page() {
        let loader = FeedLoader::new(Arc::new(MockRecordSource::new()), FeedSettings::default());
        loader.start().await.unwrap();
        let reader = loader.reader();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut app = App::new(10, "mock");
        app.set_geometry(body_area(Rect::new(0, 0, 120, 30)), reader.len());
        reader.with(|state| terminal.draw(|f| render(f, &app, state)).map(|_| ())).unwrap();

        let text = buffer_text(&terminal);
        let first = &MockRecordSource::users_for(&PageRequest::new(1))[0];
        assert!(text.contains(&first.display_name()));
        assert!(text.contains(&first.email));
        assert!(text.contains("25 users"));
        assert!(!text.contains(LOADING));
    }

    #[tokio::test]
    async fn test_render_failed_fetch_keeps_loading() {
        let source = MockRecordSource::new().fail_on(1);
        let loader = FeedLoader::new(Arc::new(source), FeedSettings::default());
        assert!(loader.start().await.is_err());
        let reader = loader.reader();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut app = App::new(10, "mock");
        app.set_geometry(body_area(Rect::new(0, 0, 120, 30)), reader.len());
        reader.with(|state| terminal.draw(|f| render(f, &app, state)).map(|_| ())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains(LOADING));
        assert!(text.contains("fetching"));
        assert!(text.contains("page 1 unavailable"));
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(phase_label(Phase::Idle).0, "idle");
        assert_eq!(phase_label(Phase::Fetching).0, "fetching");
        assert_eq!(phase_label(Phase::Exhausted).0, "done");
    }
}
