//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::agent::{AgentBackend, AgentError, OctagonAgent};
use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Loaded configuration.
    pub config: ServerConfig,
    /// Hosted agent, absent when no credentials were configured.
    pub agent: Option<Arc<dyn AgentBackend>>,
}

impl AppState {
    /// Create state from configuration, building the Octagon client.
    ///
    /// A missing API key is not fatal: the server still starts and answers
    /// `503` on `/ask`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, AgentError> {
        let agent: Option<Arc<dyn AgentBackend>> = match OctagonAgent::new(&config.agent) {
            Ok(agent) => Some(Arc::new(agent)),
            Err(AgentError::NotConfigured) => {
                tracing::error!(
                    "{} is not set; /ask will answer 503 until it is configured",
                    crate::config::API_KEY_ENV
                );
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Arc::new(Self { config, agent }))
    }

    /// Create state around an existing agent backend.
    #[must_use]
    pub fn with_agent(config: ServerConfig, agent: Option<Arc<dyn AgentBackend>>) -> Arc<Self> {
        Arc::new(Self { config, agent })
    }
}
