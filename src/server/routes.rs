//! HTTP route handlers for the SEC Bot API.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::services::{ServeDir, ServeFile};
use tracing::Instrument;
use uuid::Uuid;

use crate::agent::AgentPrompt;
use crate::chat::{AskRequest, AskResponse, LogEntry, LogLevel, MOCK_OUTPUT};

use super::error::ApiError;
use super::state::AppState;

/// Create the API router with all routes.
///
/// Paths other than the API fall through to the static frontend directory.
/// Paths with no matching file get `index.html`, so client-side pages such
/// as `/mock` load the app.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = &state.config.static_dir;
    let static_files =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    Router::new()
        .route("/health", get(health_check))
        .route("/ask", post(ask))
        .route("/log", post(client_log))
        .fallback_service(static_files)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "sec-bot",
        "version": env!("CARGO_PKG_VERSION"),
        "agent_configured": state.agent.is_some(),
        "model": state.agent.as_ref().map(|a| a.model().to_string()),
    }))
}

/// Answer one question.
async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
    if request.input.trim().is_empty() {
        return Err(ApiError::MalformedRequest("input must not be empty".to_string()));
    }

    let span = tracing::info_span!("ask", request_id = %Uuid::new_v4());
    answer(&state, request).instrument(span).await.map(Json)
}

async fn answer(state: &AppState, request: AskRequest) -> Result<AskResponse, ApiError> {
    tracing::info!(
        input_chars = request.input.chars().count(),
        history = request.chat_history.len(),
        use_mock = request.use_mock,
        "received ask request"
    );

    if request.use_mock {
        tracing::info!("mock flag set, returning canned answer");
        return Ok(AskResponse {
            output: MOCK_OUTPUT.to_string(),
        });
    }

    let agent = state.agent.as_ref().ok_or(ApiError::AgentUnavailable)?;

    let prompt = AgentPrompt::new(request.input).with_history(request.chat_history);
    let started = Instant::now();
    let output = agent.respond(&prompt).await?;

    tracing::info!(
        latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        output_chars = output.chars().count(),
        "agent answered"
    );
    Ok(AskResponse { output })
}

/// Accept a client diagnostic line. Always answers `204`.
async fn client_log(payload: Result<Json<LogEntry>, JsonRejection>) -> StatusCode {
    match payload {
        Ok(Json(entry)) => {
            let context = entry.context.map(|c| c.to_string()).unwrap_or_default();
            match entry.level {
                LogLevel::Debug => tracing::debug!(target: "sec_bot::client", %context, "{}", entry.message),
                LogLevel::Info => tracing::info!(target: "sec_bot::client", %context, "{}", entry.message),
                LogLevel::Warn => tracing::warn!(target: "sec_bot::client", %context, "{}", entry.message),
                LogLevel::Error => tracing::error!(target: "sec_bot::client", %context, "{}", entry.message),
            }
        }
        Err(e) => tracing::debug!("ignoring malformed client log: {}", e.body_text()),
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn test_mock_call_logs_request_received() {
        let state = AppState::with_agent(ServerConfig::default(), None);
        let request = AskRequest::new("CIK for Apple?").with_mock(true);

        let response = answer(&state, request).await;

        assert!(response.is_ok_and(|r| r.output == MOCK_OUTPUT));
        assert!(logs_contain("received ask request"));
        assert!(logs_contain("input_chars=14"));
        assert!(logs_contain("use_mock=true"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unconfigured_call_logs_request_received() {
        let state = AppState::with_agent(ServerConfig::default(), None);

        let response = answer(&state, AskRequest::new("q")).await;

        assert!(matches!(response, Err(ApiError::AgentUnavailable)));
        assert!(logs_contain("received ask request"));
        assert!(logs_contain("history=0"));
    }
}
