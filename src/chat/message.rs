//! Wire types shared by the chat client and the ask endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author of a transcript entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Typed by the person using the chat.
    User,
    /// Produced by the backend (answer or error).
    Bot,
}

impl Role {
    /// Stable string form used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }

    /// Role name understood by OpenAI-compatible upstreams.
    #[must_use]
    pub const fn upstream_role(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "bot" => Ok(Self::Bot),
            _ => Err(value.to_string()),
        }
    }
}

/// A single transcript entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message. Serialized as `type`.
    #[serde(rename = "type")]
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Capture time on the client clock.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user message stamped with the current time.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build a bot message stamped with the current time.
    #[must_use]
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /ask`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question being submitted.
    pub input: String,
    /// Earlier turns, oldest first. Never contains `input` itself.
    #[serde(default)]
    pub chat_history: Vec<Message>,
    /// Ask the backend for its canned answer instead of calling the agent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub use_mock: bool,
}

impl AskRequest {
    /// Create a request for `input` with no prior turns.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            chat_history: Vec::new(),
            use_mock: false,
        }
    }

    /// Attach prior turns.
    #[must_use]
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.chat_history = history;
        self
    }

    /// Set the backend mock flag.
    #[must_use]
    pub const fn with_mock(mut self, use_mock: bool) -> Self {
        self.use_mock = use_mock;
        self
    }
}

/// Successful body of `POST /ask`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Agent answer, passed through as returned.
    pub output: String,
}

/// Body of every non-2xx response from the backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub detail: String,
}

/// Severity of a client diagnostic line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose tracing.
    Debug,
    /// Normal events.
    #[default]
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
}

/// Body of `POST /log`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity, `info` when omitted.
    #[serde(default)]
    pub level: LogLevel,
    /// Log line.
    pub message: String,
    /// Optional structured context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create an entry without context.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            context: None,
        }
    }

    /// Attach structured context.
    #[must_use]
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}
