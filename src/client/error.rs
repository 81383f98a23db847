//! Error types for the chat client.

use thiserror::Error;

/// Errors that can occur while talking to the ask endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The page URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// The endpoint could not be reached.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("Server error {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body, or the raw body.
        detail: String,
    },

    /// A 2xx body that is not an `AskResponse`.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

/// Convenience result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
