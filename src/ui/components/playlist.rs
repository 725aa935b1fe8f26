//! Playlist component: the tracks lyrics can be shown for.

use std::path::Path;

use color_eyre::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::lyrics::Track;

/// Playlist state.
#[derive(Debug, Default)]
pub struct PlaylistState {
    /// Tracks in the playlist
    pub tracks: Vec<Track>,

    /// Now playing index
    pub current_index: Option<usize>,

    /// Selection state for UI
    pub list_state: ListState,
}

impl PlaylistState {
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut state = Self {
            tracks,
            ..Default::default()
        };
        state.jump_to_top();
        state
    }

    /// Read a playlist file with one `Artist - Title` per line.
    ///
    /// Blank lines and lines starting with `#` are skipped, as are lines
    /// that do not name both an artist and a title.
    pub fn load_file(path: &Path) -> Result<Vec<Track>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(parse_playlist(&contents))
    }

    /// Get the now playing track.
    pub fn now_playing(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    /// Get the selected track.
    pub fn selected_track(&self) -> Option<&Track> {
        self.list_state.selected().and_then(|i| self.tracks.get(i))
    }

    /// Mark the selected track as now playing.
    pub fn play_selected(&mut self) -> Option<&Track> {
        let index = self.list_state.selected()?;
        self.play_index(index)
    }

    /// Mark a specific track as now playing.
    pub fn play_index(&mut self, index: usize) -> Option<&Track> {
        if index < self.tracks.len() {
            self.current_index = Some(index);
            self.now_playing()
        } else {
            None
        }
    }

    /// Move to the next track.
    pub fn advance(&mut self) -> Option<&Track> {
        let next = match self.current_index {
            Some(i) if i + 1 < self.tracks.len() => i + 1,
            None if !self.tracks.is_empty() => 0,
            _ => return None,
        };
        self.play_index(next)
    }

    /// Move to the previous track.
    pub fn go_back(&mut self) -> Option<&Track> {
        match self.current_index {
            Some(i) if i > 0 => self.play_index(i - 1),
            _ => None,
        }
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) => self.tracks.len() - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.tracks.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn jump_to_top(&mut self) {
        if !self.tracks.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn jump_to_bottom(&mut self) {
        if !self.tracks.is_empty() {
            self.list_state.select(Some(self.tracks.len() - 1));
        }
    }

    /// Scroll half a page down.
    pub fn scroll_half_page_down(&mut self, page_size: usize) {
        if self.tracks.is_empty() {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        let new_index = (current + page_size / 2).min(self.tracks.len() - 1);
        self.list_state.select(Some(new_index));
    }

    /// Scroll half a page up.
    pub fn scroll_half_page_up(&mut self, page_size: usize) {
        if self.tracks.is_empty() {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some(current.saturating_sub(page_size / 2)));
    }
}

fn parse_playlist(contents: &str) -> Vec<Track> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let track = Track::parse(line);
            if track.is_none() {
                tracing::warn!("Skipping playlist line without artist and title: {}", line);
            }
            track
        })
        .collect()
}

/// Render the playlist.
pub fn render_playlist(frame: &mut Frame, area: Rect, state: &mut PlaylistState) {
    let title = format!("Playlist ({})", state.tracks.len());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = state
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = state.current_index == Some(i);

            let prefix = if is_current { "▶ " } else { "  " };
            let style = if is_current {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(track.artist.as_str(), style),
                Span::styled(" - ", Style::default().fg(Color::DarkGray)),
                Span::styled(track.title.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.list_state);
}
