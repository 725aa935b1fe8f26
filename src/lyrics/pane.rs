//! Scrollable text pane the lyrics are written into.

use ratatui::widgets::{Paragraph, Wrap};

/// Text pane with a write buffer.
///
/// Writes go to a pending buffer and only become visible on [`flush`].
/// A placeholder can be shown while the buffer is being filled.
///
/// [`flush`]: LyricsPane::flush
#[derive(Debug, Default)]
pub struct LyricsPane {
    content: String,
    pending: String,
    placeholder: Option<String>,
    scroll: u16,
    width: u16,
    height: u16,
}

impl LyricsPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both the visible content and the pending buffer.
    pub fn clear(&mut self) {
        self.content.clear();
        self.pending.clear();
        self.placeholder = None;
        self.scroll = 0;
    }

    /// Show a transient message until the next flush.
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.placeholder = Some(text.into());
    }

    pub fn append(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Make everything appended so far visible.
    pub fn flush(&mut self) {
        self.content = std::mem::take(&mut self.pending);
        self.placeholder = None;
        self.clamp_scroll();
    }

    /// Remember the visible area. Long lines wrap at `width`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp_scroll();
    }

    /// Text currently on screen.
    pub fn text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(&self.content)
    }

    /// The pane contents as a wrapping paragraph.
    pub fn paragraph(&self) -> Paragraph<'_> {
        Paragraph::new(self.text()).wrap(Wrap { trim: false })
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
        self.clamp_scroll();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Rows the text takes up once wrapped.
    fn line_count(&self) -> u16 {
        let rows = if self.width == 0 {
            self.text().lines().count()
        } else {
            self.paragraph().line_count(self.width)
        };
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    fn max_scroll(&self) -> u16 {
        self.line_count().saturating_sub(self.height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_buffered_until_flush() {
        let mut pane = LyricsPane::new();
        pane.set_placeholder("Fetching lyrics...");
        pane.append("X\nY");

        assert_eq!(pane.text(), "Fetching lyrics...");
        assert_eq!(pane.content, "");

        pane.flush();
        assert_eq!(pane.text(), "X\nY");
    }

    #[test]
    fn test_clear() {
        let mut pane = LyricsPane::new();
        pane.append("old");
        pane.flush();
        pane.append("pending");
        pane.clear();
        pane.flush();
        assert_eq!(pane.text(), "");
    }

    #[test]
    fn test_scrolling_is_bounded() {
        let mut pane = LyricsPane::new();
        pane.resize(20, 3);
        pane.append(&(1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n"));
        pane.flush();

        pane.scroll_down(100);
        assert_eq!(pane.scroll(), 7);
        pane.page_up();
        assert_eq!(pane.scroll(), 4);
        pane.scroll_to_top();
        assert_eq!(pane.scroll(), 0);
        pane.scroll_up(1);
        assert_eq!(pane.scroll(), 0);
        pane.scroll_to_bottom();
        assert_eq!(pane.scroll(), 7);

        // Shrinking content pulls the scroll position back.
        pane.append("short");
        pane.flush();
        assert_eq!(pane.scroll(), 0);
    }

    #[test]
    fn test_scroll_limit_counts_wrapped_rows() {
        let mut pane = LyricsPane::new();
        pane.resize(5, 1);
        pane.append("aaaaaaaaaaaa\nb");
        pane.flush();

        // 12 characters take three rows at width 5, plus one for "b".
        pane.scroll_to_bottom();
        assert_eq!(pane.scroll(), 3);

        pane.resize(20, 1);
        assert_eq!(pane.scroll(), 1);
    }
}
