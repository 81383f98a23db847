//! Fire-and-forget client log shipping to `POST /log`.

use reqwest::Client;
use url::Url;

use crate::chat::{LogEntry, LogLevel};
use crate::client::error::ClientResult;

/// Ships client log lines to the backend without waiting for them.
#[derive(Clone)]
pub struct DiagnosticLogger {
    client: Client,
    log_url: Url,
}

impl DiagnosticLogger {
    /// Create a logger for the backend serving `page_url`.
    ///
    /// # Errors
    /// Returns an error if the log URL cannot be resolved.
    pub fn new(page_url: &Url) -> ClientResult<Self> {
        Ok(Self {
            client: Client::new(),
            log_url: page_url.join("/log")?,
        })
    }

    /// Queue one entry. Never blocks and never reports failure.
    ///
    /// Outside a Tokio runtime the entry is dropped.
    pub fn send(&self, entry: LogEntry) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let request = self.client.post(self.log_url.clone()).json(&entry);
        drop(handle.spawn(async move {
            if let Err(e) = request.send().await {
                tracing::trace!("client log dropped: {e}");
            }
        }));
    }

    /// Queue an `info` line.
    pub fn info(&self, message: impl Into<String>) {
        self.send(LogEntry::new(LogLevel::Info, message));
    }
}
