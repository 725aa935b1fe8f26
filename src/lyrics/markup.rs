//! Cleanup of HTML/XML fragments returned by lyrics providers.

/// Decode `&lt;` and `&gt;`.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">")
}

/// Best-effort removal of markup.
///
/// Tags are dropped, a handful of common entities are decoded, Windows and
/// old Mac line endings become `\n` and tabs become spaces. An unterminated
/// `<` is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    out.replace("&#039;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', " ")
}

/// Full cleanup applied to freshly downloaded lyrics.
pub fn clean(extracted: &str) -> String {
    strip_markup(&unescape(extracted)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a &lt;b&gt; c"), "a <b> c");
        assert_eq!(unescape("&amp;lt;"), "&amp;lt;");
    }

    #[test]
    fn test_unescape_is_idempotent() {
        for input in ["&lt;i&gt;", "&&lt;lt;", "x &gt;&gt; y", "plain", "&l&lt;t;"] {
            let once = unescape(input);
            assert_eq!(unescape(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("one<br />\r\ntwo"), "one\ntwo");
        assert_eq!(strip_markup("<b>bold</b> &quot;q&quot;"), "bold \"q\"");
        assert_eq!(strip_markup("rock &amp; roll&#039;s"), "rock & roll's");
        assert_eq!(strip_markup("a < b"), "a < b");
        assert_eq!(strip_markup("a\tb"), "a b");
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("\n  La la la  \n"), "La la la");
        // Escaped tags are unescaped first and then stripped.
        assert_eq!(clean("&lt;i&gt;Chorus&lt;/i&gt;"), "Chorus");
    }
}
