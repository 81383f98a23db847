//! Octagon gateway client using the OpenAI-compatible `responses` endpoint.

use std::fmt::Write as _;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::agent::catalog;
use crate::agent::{AgentBackend, AgentError, AgentPrompt, AgentResult};
use crate::config::{AgentConfig, key_suffix};

/// Line under `SOURCES:` when the agent cited nothing.
const NO_SOURCES: &str = "\nNo sources provided by the agent.";

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: ResponsesInput<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ResponsesInput<'a> {
    Text(&'a str),
    Turns(Vec<InputTurn<'a>>),
}

#[derive(Serialize)]
struct InputTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(default)]
    order: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Client for one Octagon agent model.
pub struct OctagonAgent {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OctagonAgent {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`AgentError::NotConfigured`] without an API key, or an error
    /// if the HTTP client cannot be built.
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let api_key = config.api_key.clone().ok_or(AgentError::NotConfigured)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AgentError::HttpClient(e.to_string()))?;

        match catalog::find(&config.model) {
            Some(known) => tracing::info!(model = known.id, "agent covers: {}", known.description),
            None => tracing::warn!(model = %config.model, "model is not a known Octagon agent"),
        }
        tracing::info!(
            model = %config.model,
            base_url = %config.base_url,
            key = %key_suffix(&api_key),
            "hosted agent client ready"
        );

        Ok(Self {
            client,
            endpoint: format!("{}/responses", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl AgentBackend for OctagonAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn respond(&self, prompt: &AgentPrompt) -> AgentResult<String> {
        let request = ResponsesRequest {
            model: &self.model,
            instructions: catalog::instructions_for(&self.model),
            input: build_input(prompt),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(AgentError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply = response
            .json::<ResponsesReply>()
            .await
            .map_err(AgentError::from_transport)?;
        format_reply(reply)
    }
}

/// Plain question without history, otherwise the full turn list.
fn build_input(prompt: &AgentPrompt) -> ResponsesInput<'_> {
    if prompt.history.is_empty() {
        return ResponsesInput::Text(&prompt.input);
    }

    let mut turns: Vec<InputTurn<'_>> = prompt
        .history
        .iter()
        .map(|m| InputTurn {
            role: m.role.upstream_role(),
            content: &m.content,
        })
        .collect();
    turns.push(InputTurn {
        role: "user",
        content: &prompt.input,
    });
    ResponsesInput::Turns(turns)
}

/// Answer text followed by a `SOURCES:` block listing the agent's citations.
fn format_reply(reply: ResponsesReply) -> AgentResult<String> {
    let Some(item) = reply
        .output
        .into_iter()
        .flat_map(|o| o.content)
        .find(|c| c.text.is_some())
    else {
        return Err(AgentError::EmptyOutput);
    };

    let mut text = item.text.unwrap_or_default();
    text.push_str("\n\nSOURCES:");
    if item.annotations.is_empty() {
        text.push_str(NO_SOURCES);
        return Ok(text);
    }

    for annotation in &item.annotations {
        let order = match &annotation.order {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => "?".to_string(),
        };
        let name = annotation.name.as_deref().unwrap_or("Unknown Source");
        let url = annotation.url.as_deref().unwrap_or("No URL Provided");
        let _ = write!(text, "\n{order}. {name}: {url}");
    }
    Ok(text)
}
