//! Splitting answer text into plain and hyperlink segments.
//!
//! A link is any `http://` or `https://` run up to the next whitespace
//! character. Trailing punctuation stays part of the link target.

use regex::Regex;

/// Pattern for raw URLs inside agent answers.
const URL_PATTERN: &str = r"https?://\S+";

/// A display fragment of an answer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Segment<'a> {
    /// Text shown verbatim.
    Text(&'a str),
    /// Text shown as a clickable link to itself.
    Link(&'a str),
}

impl<'a> Segment<'a> {
    /// The original slice of the answer this segment covers.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Text(s) | Self::Link(s) => *s,
        }
    }
}

/// Finds URLs in answer text.
#[derive(Clone, Debug)]
pub struct LinkScanner {
    pattern: Regex,
}

impl LinkScanner {
    /// Compile the URL pattern.
    ///
    /// # Errors
    /// Returns an error if the pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(URL_PATTERN)?,
        })
    }

    /// Split `text` into ordered segments.
    ///
    /// Concatenating the segments gives back `text` exactly. Text without
    /// any URL comes back as a single [`Segment::Text`].
    #[must_use]
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut out = Vec::new();
        let mut cursor = 0;

        for found in self.pattern.find_iter(text) {
            if found.start() > cursor {
                out.push(Segment::Text(&text[cursor..found.start()]));
            }
            out.push(Segment::Link(found.as_str()));
            cursor = found.end();
        }

        if out.is_empty() {
            return vec![Segment::Text(text)];
        }
        if cursor < text.len() {
            out.push(Segment::Text(&text[cursor..]));
        }
        out
    }

    /// All link targets in `text`, in order.
    #[must_use]
    pub fn links<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Render `text` for a terminal, turning links into OSC 8 hyperlinks.
    #[must_use]
    pub fn render_terminal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in self.segments(text) {
            match segment {
                Segment::Text(s) => out.push_str(s),
                Segment::Link(url) => {
                    out.push_str("\x1b]8;;");
                    out.push_str(url);
                    out.push_str("\x1b\\");
                    out.push_str(url);
                    out.push_str("\x1b]8;;\x1b\\");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_urls_returns_input() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        let text = "Apple's CIK is 0000320193.\n  No sources.";
        assert_eq!(scanner.segments(text), vec![Segment::Text(text)]);
        assert_eq!(scanner.segments(""), vec![Segment::Text("")]);
        Ok(())
    }

    #[test]
    fn test_single_url_keeps_surroundings() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        let text = "See  https://www.sec.gov/a.htm\tfor details ";
        assert_eq!(
            scanner.segments(text),
            vec![
                Segment::Text("See  "),
                Segment::Link("https://www.sec.gov/a.htm"),
                Segment::Text("\tfor details "),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_adjacent_urls_split_by_space() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        let text = "http://a.example/x https://b.example/y";
        assert_eq!(
            scanner.segments(text),
            vec![
                Segment::Link("http://a.example/x"),
                Segment::Text(" "),
                Segment::Link("https://b.example/y"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_trailing_punctuation_is_part_of_link() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        let segments = scanner.segments("(source: https://example.com/doc).");
        assert_eq!(segments[1], Segment::Link("https://example.com/doc)."));
        assert_eq!(segments.len(), 2);
        Ok(())
    }

    #[test]
    fn test_segments_concatenate_to_input() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        let text = "SOURCES:\n1. 10-K: https://sec.gov/1\n2. 10-Q: https://sec.gov/2\n";
        let joined: String = scanner.segments(text).iter().map(Segment::as_str).collect();
        assert_eq!(joined, text);
        assert_eq!(scanner.links(text), vec!["https://sec.gov/1", "https://sec.gov/2"]);
        Ok(())
    }

    #[test]
    fn test_scheme_without_host_is_text() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        assert_eq!(scanner.segments("http:// x"), vec![Segment::Text("http:// x")]);
        assert_eq!(scanner.segments("ftp://x.y"), vec![Segment::Text("ftp://x.y")]);
        Ok(())
    }

    #[test]
    fn test_render_terminal_wraps_links() -> Result<(), regex::Error> {
        let scanner = LinkScanner::new()?;
        let rendered = scanner.render_terminal("go https://e.com now");
        assert_eq!(
            rendered,
            "go \x1b]8;;https://e.com\x1b\\https://e.com\x1b]8;;\x1b\\ now"
        );
        assert_eq!(scanner.render_terminal("plain"), "plain");
        Ok(())
    }
}
