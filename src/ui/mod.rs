//! Main UI layout and rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::action::Screen;
use crate::app::App;

pub mod components;
pub mod scroller;

pub use components::*;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Main layout: [screen] [status line]
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    app.page_size = chunks[0].height.saturating_sub(2) as usize;

    match app.screen {
        Screen::Playlist => render_playlist(frame, chunks[0], &mut app.playlist),
        Screen::Lyrics => render_lyrics(frame, chunks[0], &mut app.lyrics),
    }

    render_status(frame, chunks[1], app);

    // Render help overlay if active
    if app.show_help {
        render_help(frame, area);
    }

    // Render error message if present
    if let Some(error) = &app.error_message {
        render_error(frame, area, error);
    }
}

/// Render the status line: transient message, or now playing.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let now_playing = app
            .playlist
            .now_playing()
            .map(|t| t.to_string())
            .unwrap_or_else(|| String::from("Nothing playing"));
        Line::from(vec![
            Span::styled(
                format!("[{}] ", app.screen.title()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(now_playing, Style::default().fg(Color::White)),
            Span::styled("  ? for help", Style::default().fg(Color::DarkGray)),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help overlay.
fn render_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Navigation"),
        Line::from("  j/k or ↑/↓    Move up/down / scroll lyrics"),
        Line::from("  PgUp/PgDn     Page lyrics up/down"),
        Line::from("  Ctrl+d/u      Scroll half page down/up"),
        Line::from("  g/G           Jump to top/bottom"),
        Line::from("  Esc/Backspace Go back"),
        Line::from(""),
        heading("Playback"),
        Line::from("  Enter         Play selected track"),
        Line::from("  n/p           Next/Previous track"),
        Line::from(""),
        heading("Lyrics"),
        Line::from("  l             Show lyrics (press again to go back)"),
        Line::from("  Space         Reload lyrics if song changes (on lyrics screen)"),
        Line::from("  e             Edit lyrics in external editor"),
        Line::from(""),
        heading("Other"),
        Line::from("  ?             Show this help"),
        Line::from("  x             Clear error message"),
        Line::from("  q             Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Render an error message overlay.
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    // Create a centered popup
    let popup_area = centered_rect(60, 20, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Error")
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
