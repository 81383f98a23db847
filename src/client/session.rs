//! Chat session: transcript, pending flag and one submission at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use url::Url;

use crate::chat::{AskRequest, LogEntry, LogLevel, Message};
use crate::client::diagnostics::DiagnosticLogger;
use crate::client::error::ClientResult;
use crate::client::mode::AskMode;
use crate::client::transport::{AskTransport, HttpTransport, MockTransport};

/// Options for [`ChatSession::connect`].
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Artificial delay before the canned answer in mock mode.
    pub mock_delay: Duration,
    /// Timeout for `POST /ask`; `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
    /// Ship client log lines to `POST /log`.
    pub diagnostics: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mock_delay: Duration::from_secs(1),
            request_timeout: None,
            diagnostics: true,
        }
    }
}

/// Result of a call to [`ChatSession::submit`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input or a request already in flight; nothing changed.
    Ignored,
    /// A user and a bot message with the answer were appended.
    Answered,
    /// A user and a bot message describing the failure were appended.
    Failed,
}

/// Read-only view of whether the input control is enabled.
#[derive(Clone, Debug)]
pub struct InputGate(Arc<AtomicBool>);

impl InputGate {
    /// `false` while a submission is awaiting its answer.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.0.load(Ordering::Acquire)
    }
}

/// Clears the pending flag when the submission ends, however it ends.
struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Client-side state of one chat page.
pub struct ChatSession {
    mode: AskMode,
    transcript: Vec<Message>,
    pending: Arc<AtomicBool>,
    transport: Box<dyn AskTransport>,
    logger: Option<DiagnosticLogger>,
}

impl ChatSession {
    /// Open a session for `page_url`, choosing live or mock mode from its path.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn connect(page_url: &str, options: &SessionOptions) -> ClientResult<Self> {
        let url = Url::parse(page_url)?;
        let mode = AskMode::from_page_url(&url);

        let transport: Box<dyn AskTransport> = match mode {
            AskMode::Live => Box::new(HttpTransport::new(&url, options.request_timeout)?),
            AskMode::Mock => Box::new(MockTransport::new(options.mock_delay)),
        };
        let logger = if options.diagnostics {
            Some(DiagnosticLogger::new(&url)?)
        } else {
            None
        };

        tracing::info!(url = %url, ?mode, "chat session opened");
        let mut session = Self::with_transport(mode, transport);
        session.logger = logger;
        Ok(session)
    }

    /// Open a session around an explicit transport.
    #[must_use]
    pub fn with_transport(mode: AskMode, transport: Box<dyn AskTransport>) -> Self {
        Self {
            mode,
            transcript: Vec::new(),
            pending: Arc::new(AtomicBool::new(false)),
            transport,
            logger: None,
        }
    }

    /// Mode chosen when the session was opened.
    #[must_use]
    pub const fn mode(&self) -> AskMode {
        self.mode
    }

    /// All messages so far, in insertion order.
    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Whether a new submission would be accepted.
    #[must_use]
    pub fn is_input_enabled(&self) -> bool {
        !self.pending.load(Ordering::Acquire)
    }

    /// Handle for observing the input state while a submission runs.
    #[must_use]
    pub fn input_gate(&self) -> InputGate {
        InputGate(Arc::clone(&self.pending))
    }

    /// Submit one question and wait for its answer.
    ///
    /// Blank input is a no-op. Otherwise exactly one user message and then
    /// exactly one bot message are appended; on failure the bot message
    /// describes the error.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let input = input.trim();
        if input.is_empty() || !self.is_input_enabled() {
            return SubmitOutcome::Ignored;
        }

        let request = AskRequest::new(input).with_history(self.transcript.clone());
        self.transcript.push(Message::user(input));

        self.pending.store(true, Ordering::Release);
        let guard = PendingGuard(Arc::clone(&self.pending));
        self.log_info(format!("ask submitted ({} chars)", input.chars().count()));

        let result = self.transport.ask(&request).await;
        drop(guard);

        match result {
            Ok(response) => {
                self.transcript.push(Message::bot(response.output));
                SubmitOutcome::Answered
            }
            Err(e) => {
                tracing::warn!("ask failed: {e}");
                if let Some(logger) = &self.logger {
                    logger.send(LogEntry::new(LogLevel::Error, "ask failed").with_context(
                        serde_json::json!({
                            "error": e.to_string(),
                            "history": request.chat_history.len(),
                        }),
                    ));
                }
                self.transcript.push(Message::bot(format!(
                    "Sorry, I couldn't get an answer. Error: {e}"
                )));
                SubmitOutcome::Failed
            }
        }
    }

    fn log_info(&self, message: String) {
        if let Some(logger) = &self.logger {
            logger.info(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{AskResponse, MOCK_OUTPUT, Role};
    use crate::client::error::ClientError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers from a fixed script.
    struct ScriptedTransport {
        seen: Arc<Mutex<Vec<AskRequest>>>,
        fail: bool,
        gate_during_call: Arc<Mutex<Option<InputGate>>>,
        observed_enabled: Arc<Mutex<Vec<bool>>>,
    }

    #[async_trait]
    impl AskTransport for ScriptedTransport {
        async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.clone());
            }
            let gate = self.gate_during_call.lock().ok().and_then(|g| g.clone());
            if let (Some(gate), Ok(mut observed)) = (gate, self.observed_enabled.lock()) {
                observed.push(gate.is_enabled());
            }
            if self.fail {
                return Err(ClientError::Status {
                    status: 502,
                    detail: "Upstream agent unavailable".to_string(),
                });
            }
            Ok(AskResponse {
                output: format!("answer to {}", request.input),
            })
        }
    }

    struct Harness {
        session: ChatSession,
        seen: Arc<Mutex<Vec<AskRequest>>>,
        observed_enabled: Arc<Mutex<Vec<bool>>>,
    }

    fn harness(fail: bool) -> Harness {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let gate_slot = Arc::new(Mutex::new(None));
        let observed_enabled = Arc::new(Mutex::new(Vec::new()));
        let transport = ScriptedTransport {
            seen: Arc::clone(&seen),
            fail,
            gate_during_call: Arc::clone(&gate_slot),
            observed_enabled: Arc::clone(&observed_enabled),
        };
        let session = ChatSession::with_transport(AskMode::Live, Box::new(transport));
        if let Ok(mut slot) = gate_slot.lock() {
            *slot = Some(session.input_gate());
        }
        Harness {
            session,
            seen,
            observed_enabled,
        }
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let mut h = harness(false);
        assert_eq!(h.session.submit("").await, SubmitOutcome::Ignored);
        assert_eq!(h.session.submit("  \n\t ").await, SubmitOutcome::Ignored);
        assert!(h.session.transcript().is_empty());
        assert!(h.seen.lock().map(|s| s.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_success_appends_user_then_bot() {
        let mut h = harness(false);
        let outcome = h.session.submit("AAPL risk factors 2023 10k").await;

        assert_eq!(outcome, SubmitOutcome::Answered);
        let transcript = h.session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].content, "AAPL risk factors 2023 10k");
        assert_eq!(transcript[1].role, Role::Bot);
        assert_eq!(transcript[1].content, "answer to AAPL risk factors 2023 10k");
        assert!(transcript[0].timestamp <= transcript[1].timestamp);
    }

    #[tokio::test]
    async fn test_history_excludes_current_message() {
        let mut h = harness(false);
        h.session.submit("first").await;
        h.session.submit("second").await;

        let seen = h.seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].chat_history.is_empty());
        assert_eq!(seen[1].input, "second");
        let history: Vec<&str> = seen[1].chat_history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(history, vec!["first", "answer to first"]);
    }

    #[tokio::test]
    async fn test_failure_appends_error_bot_message() {
        let mut h = harness(true);
        let outcome = h.session.submit("AAPL risk factors 2023 10k").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let transcript = h.session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[1].role, Role::Bot);
        assert!(transcript[1].content.contains("Error"));
        assert!(transcript[1].content.contains("Upstream agent unavailable"));
        assert!(h.session.is_input_enabled());
    }

    #[tokio::test]
    async fn test_input_disabled_while_in_flight() {
        let mut h = harness(false);
        assert!(h.session.is_input_enabled());
        h.session.submit("q").await;

        let observed = h.observed_enabled.lock().map(|o| o.clone()).unwrap_or_default();
        assert_eq!(observed, vec![false]);
        assert!(h.session.is_input_enabled());
    }

    #[tokio::test]
    async fn test_input_is_trimmed() {
        let mut h = harness(false);
        h.session.submit("  CIK for Apple?  ").await;
        assert_eq!(h.session.transcript()[0].content, "CIK for Apple?");
    }

    #[tokio::test]
    async fn test_mock_mode_returns_canned_answer() {
        let mut session = ChatSession::with_transport(
            AskMode::Mock,
            Box::new(MockTransport::new(Duration::from_millis(10))),
        );
        assert_eq!(session.submit("anything").await, SubmitOutcome::Answered);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].content, MOCK_OUTPUT);
        assert!(session.mode().is_mock());
    }
}
