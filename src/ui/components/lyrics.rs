//! Lyrics screen component.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::lyrics::LyricsCoordinator;

/// Render the lyrics screen.
pub fn render_lyrics(frame: &mut Frame, area: Rect, lyrics: &mut LyricsCoordinator) {
    let title = lyrics.title(area.width.saturating_sub(4) as usize);
    let hint = if lyrics.autoreload() {
        " [autoreload] "
    } else {
        ""
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(hint)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    lyrics.pane_mut().resize(inner.width, inner.height);

    let style = if lyrics.is_fetching() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let pane = lyrics.pane();
    let paragraph = pane
        .paragraph()
        .style(style)
        .block(block)
        .scroll((pane.scroll(), 0));

    frame.render_widget(paragraph, area);
}
