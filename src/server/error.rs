//! Error responses of the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::agent::AgentError;
use crate::chat::ErrorBody;

/// Failures reported to API callers as `{ "detail": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was unusable; no upstream call was made.
    #[error("Invalid request: {0}")]
    MalformedRequest(String),
    /// The server started without agent credentials.
    #[error("Agent not initialized. Check server logs for configuration errors (e.g., API keys).")]
    AgentUnavailable,
    /// The hosted agent call failed.
    #[error("{}", upstream_detail(.0))]
    Upstream(#[from] AgentError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AgentUnavailable | Self::Upstream(AgentError::NotConfigured) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Upstream(AgentError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(AgentError::HttpClient(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

fn upstream_detail(err: &AgentError) -> String {
    match err {
        AgentError::EmptyOutput => "Agent failed to produce a valid output.".to_string(),
        AgentError::Timeout => "Upstream agent timed out.".to_string(),
        AgentError::Network(_) => format!("Upstream agent unavailable: {err}"),
        _ => format!("Upstream API Error (LLM/Agent): {err}"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{self}");
        } else {
            tracing::warn!(status = status.as_u16(), "{self}");
        }
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
