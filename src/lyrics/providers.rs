//! Remote lyrics sources.
//!
//! Each provider is a URL template plus a pair of delimiters that surround
//! the lyric body in the response, and a predicate telling whether the
//! extracted text means "no lyrics for this song".

/// Available remote providers, in configuration index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    LyricWiki,
    LyricsPlugin,
}

impl Provider {
    pub fn all() -> &'static [Provider] {
        &[Provider::LyricWiki, Provider::LyricsPlugin]
    }

    /// Provider for a configuration index. Unknown indices select the
    /// first provider.
    pub fn from_index(index: usize) -> Self {
        Self::all().get(index).copied().unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LyricWiki => "lyricwiki.org",
            Self::LyricsPlugin => "lyricsplugin.com",
        }
    }

    fn url_template(&self) -> &'static str {
        match self {
            Self::LyricWiki => "http://lyricwiki.org/api.php?artist=%artist%&song=%title%&fmt=xml",
            Self::LyricsPlugin => {
                "http://www.lyricsplugin.com/winamp03/plugin/?artist=%artist%&title=%title%"
            }
        }
    }

    fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            Self::LyricWiki => ("<lyrics>", "</lyrics>"),
            Self::LyricsPlugin => ("<div id=\"lyrics\">", "</div>"),
        }
    }

    /// Build the query URL for a song.
    pub fn query_url(&self, artist: &str, title: &str) -> String {
        self.url_template()
            .replacen("%artist%", &urlencoding::encode(artist), 1)
            .replacen("%title%", &urlencoding::encode(title), 1)
    }

    /// Text strictly between the opening delimiter and the first closing
    /// delimiter after it. `None` if either is missing.
    pub fn extract<'a>(&self, body: &'a str) -> Option<&'a str> {
        let (open, close) = self.delimiters();
        let start = body.find(open)? + open.len();
        let len = body[start..].find(close)?;
        Some(&body[start..start + len])
    }

    /// Whether the extracted text means the provider has no lyrics.
    pub fn is_not_found(&self, extracted: &str) -> bool {
        match self {
            Self::LyricWiki => lyricwiki_not_found(extracted),
            Self::LyricsPlugin => lyricsplugin_not_found(extracted),
        }
    }
}

fn lyricwiki_not_found(text: &str) -> bool {
    text == "Not found"
}

fn lyricsplugin_not_found(text: &str) -> bool {
    !text.chars().any(|c| !c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Provider::from_index(0), Provider::LyricWiki);
        assert_eq!(Provider::from_index(1), Provider::LyricsPlugin);
        assert_eq!(Provider::from_index(7), Provider::LyricWiki);
    }

    #[test]
    fn test_query_url_encodes_parameters() {
        let url = Provider::LyricWiki.query_url("AC/DC", "Back in Black");
        assert_eq!(
            url,
            "http://lyricwiki.org/api.php?artist=AC%2FDC&song=Back%20in%20Black&fmt=xml"
        );

        let url = Provider::LyricsPlugin.query_url("Björk", "Jóga");
        assert!(url.ends_with("?artist=Bj%C3%B6rk&title=J%C3%B3ga"));
    }

    #[test]
    fn test_extract() {
        let body = "<xml><lyrics>La la la</lyrics><lyrics>other</lyrics></xml>";
        assert_eq!(Provider::LyricWiki.extract(body), Some("La la la"));

        let body = "<html><div id=\"lyrics\">Line<br />\nLine</div></div>";
        assert_eq!(Provider::LyricsPlugin.extract(body), Some("Line<br />\nLine"));
    }

    #[test]
    fn test_extract_missing_delimiters() {
        assert_eq!(Provider::LyricWiki.extract("no tags here"), None);
        assert_eq!(Provider::LyricWiki.extract("<lyrics>unterminated"), None);
        // Closing tag before the opening one does not count.
        assert_eq!(Provider::LyricWiki.extract("</lyrics><lyrics>x"), None);
    }

    #[test]
    fn test_not_found_predicates() {
        assert!(Provider::LyricWiki.is_not_found("Not found"));
        assert!(!Provider::LyricWiki.is_not_found(""));
        assert!(!Provider::LyricWiki.is_not_found("Not found at all"));

        assert!(Provider::LyricsPlugin.is_not_found(""));
        assert!(Provider::LyricsPlugin.is_not_found("\n\r\t"));
        assert!(!Provider::LyricsPlugin.is_not_found(" "));
        assert!(!Provider::LyricsPlugin.is_not_found("\nwords\n"));
    }
}
