//! Track identity used for cache lookups and remote queries.

use std::fmt;

/// Artist/title pair identifying a song's lyrics.
///
/// Both fields are stored in the canonical fetch encoding: UTF-8 with
/// surrounding whitespace trimmed and control characters removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
}

impl Track {
    /// Create a track, normalizing both fields.
    pub fn new(artist: impl AsRef<str>, title: impl AsRef<str>) -> Self {
        Self {
            artist: to_canonical(artist.as_ref()),
            title: to_canonical(title.as_ref()),
        }
    }

    /// Parse an `"Artist - Title"` line.
    ///
    /// The first `" - "` separates the two fields so titles may contain
    /// dashes of their own.
    pub fn parse(line: &str) -> Option<Self> {
        let (artist, title) = line.split_once(" - ")?;
        let track = Self::new(artist, title);
        track.is_valid().then_some(track)
    }

    /// Whether both artist and title are present.
    pub fn is_valid(&self) -> bool {
        !self.artist.is_empty() && !self.title.is_empty()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Convert text to the canonical fetch encoding.
pub fn to_canonical(text: &str) -> String {
    text.trim().chars().filter(|c| !c.is_control()).collect()
}

/// Convert canonical text to something the terminal can render.
pub fn to_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
