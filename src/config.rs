//! Environment-driven configuration for the ask endpoint.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Hosted agent credentials.
pub const API_KEY_ENV: &str = "OCTAGON_API_KEY";
/// Hosted agent base URL.
pub const BASE_URL_ENV: &str = "OCTAGON_API_BASE_URL";
/// Agent model identifier.
pub const MODEL_ENV: &str = "SEC_BOT_AGENT_MODEL";
/// Upstream request timeout in seconds.
pub const TIMEOUT_ENV: &str = "SEC_BOT_AGENT_TIMEOUT_SECS";
/// Listening port.
pub const PORT_ENV: &str = "SEC_BOT_PORT";
/// Directory served for non-API paths.
pub const STATIC_DIR_ENV: &str = "SEC_BOT_STATIC_DIR";

/// Default hosted agent gateway.
pub const DEFAULT_BASE_URL: &str = "https://api-gateway.octagonagents.com/v1";
/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
    /// Base URL is not a valid URL.
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the hosted agent client.
#[derive(Clone)]
pub struct AgentConfig {
    /// Bearer token. `None` leaves the agent unconfigured.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API, without trailing slash.
    pub base_url: String,
    /// Agent model identifier.
    pub model: String,
    /// Total timeout for one upstream call.
    pub timeout: Duration,
    /// Connection timeout for one upstream call.
    pub connect_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: crate::agent::catalog::DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &self.api_key.as_deref().map(key_suffix))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl AgentConfig {
    /// Set the API key. Surrounding quotes are stripped.
    #[must_use]
    pub fn with_api_key(mut self, key: impl AsRef<str>) -> Self {
        self.api_key = clean_secret(key.as_ref());
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the upstream timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if the base URL is not http(s), the model is empty,
    /// or the timeout is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Settings for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Directory with the built frontend.
    pub static_dir: PathBuf,
    /// Hosted agent settings.
    pub agent: AgentConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("static"),
            agent: AgentConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment, after reading `.env` if present.
    ///
    /// # Errors
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    ///
    /// # Errors
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(API_KEY_ENV) {
            config.agent = config.agent.with_api_key(key);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config.agent = config.agent.with_base_url(strip_quotes(&base_url));
        }
        if let Some(model) = lookup(MODEL_ENV) {
            config.agent = config.agent.with_model(strip_quotes(&model));
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            config.agent = config.agent.with_timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup(PORT_ENV) {
            config.port = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value: raw.clone(),
            })?;
        }
        if let Some(dir) = lookup(STATIC_DIR_ENV) {
            config.static_dir = PathBuf::from(dir);
        }

        config.agent.validate()?;
        Ok(config)
    }
}

/// Last four characters of a secret, for logs.
#[must_use]
pub fn key_suffix(key: &str) -> String {
    let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("...{tail}")
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c: char| c == '"' || c == '\'')
}

fn clean_secret(raw: &str) -> Option<String> {
    let key = strip_quotes(raw);
    (!key.is_empty()).then(|| key.to_string())
}
