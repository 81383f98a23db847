//! How the chat session gets an answer for a submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::chat::{AskRequest, AskResponse, ErrorBody, MOCK_OUTPUT};
use crate::client::error::{ClientError, ClientResult};

/// One-shot answer source for the chat session.
#[async_trait]
pub trait AskTransport: Send + Sync {
    /// Send one request. Called at most once per submission.
    async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse>;
}

/// Calls `POST /ask` on the backend.
pub struct HttpTransport {
    client: Client,
    ask_url: Url,
}

impl HttpTransport {
    /// Create a transport for the backend serving `page_url`.
    ///
    /// `timeout` of `None` keeps the HTTP client's default.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be resolved or the client cannot be built.
    pub fn new(page_url: &Url, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            ask_url: page_url.join("/ask")?,
        })
    }

    /// Endpoint this transport posts to.
    #[must_use]
    pub const fn ask_url(&self) -> &Url {
        &self.ask_url
    }
}

#[async_trait]
impl AskTransport for HttpTransport {
    async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse> {
        let response = self
            .client
            .post(self.ask_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.detail)
                .unwrap_or(body);
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<AskResponse>()
            .await
            .map_err(|e| ClientError::InvalidBody(e.to_string()))
    }
}

/// Answers every submission with the canned text after a fixed delay.
#[derive(Clone, Debug)]
pub struct MockTransport {
    delay: Duration,
}

impl MockTransport {
    /// Create a mock transport with the given artificial delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AskTransport for MockTransport {
    async fn ask(&self, request: &AskRequest) -> ClientResult<AskResponse> {
        tracing::debug!(input_chars = request.input.len(), "mock mode, skipping backend");
        tokio::time::sleep(self.delay).await;
        Ok(AskResponse {
            output: MOCK_OUTPUT.to_string(),
        })
    }
}
