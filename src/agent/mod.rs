//! Client side of the hosted agent API.
//!
//! The ask endpoint only sees the [`AgentBackend`] trait; [`OctagonAgent`]
//! is the production implementation talking to an OpenAI-compatible
//! `responses` endpoint.

pub mod catalog;
pub mod octagon;

pub use octagon::OctagonAgent;

use async_trait::async_trait;
use thiserror::Error;

use crate::chat::Message;

/// Errors raised while calling the hosted agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was configured.
    #[error("agent API key is not configured")]
    NotConfigured,
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The upstream answered with a non-2xx status.
    #[error("status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The upstream body was not the expected JSON.
    #[error("invalid reply: {0}")]
    InvalidReply(String),
    /// The upstream reply held no text.
    #[error("agent reply contained no text")]
    EmptyOutput,
}

impl AgentError {
    /// Classify a transport error.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidReply(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

/// Convenience result alias for agent calls.
pub type AgentResult<T> = Result<T, AgentError>;

/// One question plus the turns that preceded it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AgentPrompt {
    /// The question to answer.
    pub input: String,
    /// Prior turns, oldest first.
    pub history: Vec<Message>,
}

impl AgentPrompt {
    /// Create a prompt with no history.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            history: Vec::new(),
        }
    }

    /// Attach prior turns.
    #[must_use]
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

/// A hosted agent that turns a prompt into answer text.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Model identifier, for logs and health output.
    fn model(&self) -> &str;

    /// Ask the agent once. Implementations must not retry.
    async fn respond(&self, prompt: &AgentPrompt) -> AgentResult<String>;
}
