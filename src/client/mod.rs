//! Terminal chat client for the ask endpoint.
//!
//! Holds the transcript, enforces one outstanding request, and picks live or
//! mock mode once from the page URL.

pub mod diagnostics;
pub mod error;
pub mod mode;
pub mod session;
pub mod transport;

pub use diagnostics::DiagnosticLogger;
pub use error::{ClientError, ClientResult};
pub use mode::AskMode;
pub use session::{ChatSession, InputGate, SessionOptions, SubmitOutcome};
pub use transport::{AskTransport, HttpTransport, MockTransport};
