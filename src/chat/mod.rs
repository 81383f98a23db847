//! Chat data model shared by the ask endpoint and the chat client.

pub mod links;
pub mod message;

pub use links::{LinkScanner, Segment};
pub use message::{AskRequest, AskResponse, ErrorBody, LogEntry, LogLevel, Message, Role};

/// Canned answer used by both mock paths.
///
/// Carries a fake source link so link rendering can be checked without the
/// hosted agent.
pub const MOCK_OUTPUT: &str = "This is a **mock** response for testing UI rendering. It includes a fake source link: https://example.com/mock-source";
