//! Live/mock routing decided once from the page path.

use url::Url;

/// Path segment that switches the chat into mock mode.
pub const MOCK_SEGMENT: &str = "mock";

/// Where submissions go for the lifetime of a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AskMode {
    /// Submissions call `POST /ask`.
    Live,
    /// Submissions get the canned answer locally, without any request.
    Mock,
}

impl AskMode {
    /// Mode for a page path: `Mock` when its last non-empty segment is `mock`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path.split('/').filter(|s| !s.is_empty()).next_back() {
            Some(MOCK_SEGMENT) => Self::Mock,
            _ => Self::Live,
        }
    }

    /// Mode for a full page URL.
    #[must_use]
    pub fn from_page_url(url: &Url) -> Self {
        Self::from_path(url.path())
    }

    /// Whether this is mock mode.
    #[must_use]
    pub const fn is_mock(self) -> bool {
        matches!(self, Self::Mock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_paths() {
        assert_eq!(AskMode::from_path("/mock"), AskMode::Mock);
        assert_eq!(AskMode::from_path("/mock/"), AskMode::Mock);
        assert_eq!(AskMode::from_path("/app/mock"), AskMode::Mock);
    }

    #[test]
    fn test_live_paths() {
        assert_eq!(AskMode::from_path("/"), AskMode::Live);
        assert_eq!(AskMode::from_path(""), AskMode::Live);
        assert_eq!(AskMode::from_path("/mockery"), AskMode::Live);
        assert_eq!(AskMode::from_path("/mock/chat"), AskMode::Live);
    }

    #[test]
    fn test_from_page_url_ignores_query() -> Result<(), url::ParseError> {
        let url = Url::parse("http://localhost:8000/mock?x=1#top")?;
        assert!(AskMode::from_page_url(&url).is_mock());
        let url = Url::parse("http://localhost:8000/?mode=mock")?;
        assert!(!AskMode::from_page_url(&url).is_mock());
        Ok(())
    }
}
