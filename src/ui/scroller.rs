//! Marquee-style scrolling for header text that does not fit.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: &str = " ** ";

/// Return `text` if it fits in `width` columns, otherwise a `width`-wide
/// window into `text` followed by a separator, starting at `pos`.
///
/// Each call on overflowing text advances `pos` by one character, wrapping
/// around at the end.
pub fn scroll_text(text: &str, width: usize, pos: &mut usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let looped: Vec<char> = text.chars().chain(SEPARATOR.chars()).collect();
    if *pos >= looped.len() {
        *pos = 0;
    }

    let mut out = String::new();
    let mut used = 0;
    for &c in looped.iter().cycle().skip(*pos) {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }

    *pos = (*pos + 1) % looped.len();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        let mut pos = 3;
        assert_eq!(scroll_text("Artist - Title", 20, &mut pos), "Artist - Title");
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_long_text_scrolls_and_wraps() {
        let mut pos = 0;
        assert_eq!(scroll_text("abcdef", 4, &mut pos), "abcd");
        assert_eq!(scroll_text("abcdef", 4, &mut pos), "bcde");
        assert_eq!(pos, 2);

        // "abcdef ** " is 10 characters long.
        pos = 8;
        assert_eq!(scroll_text("abcdef", 4, &mut pos), "* ab");
        assert_eq!(scroll_text("abcdef", 4, &mut pos), " abc");
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_wide_characters_respect_width() {
        let mut pos = 0;
        let out = scroll_text("日本語の歌", 5, &mut pos);
        assert_eq!(out, "日本");
        assert!(out.width() <= 5);
    }
}
