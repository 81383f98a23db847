//! Shared helpers: stub agents and ephemeral servers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use sec_bot::agent::{AgentBackend, AgentError, AgentPrompt, AgentResult};
use sec_bot::config::ServerConfig;
use sec_bot::server::{AppState, build_app};

/// What the stub agent answers with.
pub enum Reply {
    Echo,
    Fail(fn() -> AgentError),
}

/// Agent backend that records prompts instead of calling the network.
pub struct StubAgent {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<AgentPrompt>>,
}

impl StubAgent {
    pub fn echo() -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Echo,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(make: fn() -> AgentError) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(make),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<AgentPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentBackend for StubAgent {
    fn model(&self) -> &str {
        "stub-agent"
    }

    async fn respond(&self, prompt: &AgentPrompt) -> AgentResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.reply {
            Reply::Echo => Ok(format!(
                "Answer for {}\n\nSOURCES:\n1. 10-K: https://www.sec.gov/doc",
                prompt.input
            )),
            Reply::Fail(make) => Err(make()),
        }
    }
}

/// Router backed by `agent` (or no agent at all).
pub fn app_with(agent: Option<Arc<StubAgent>>) -> Router {
    let agent = agent.map(|a| a as Arc<dyn AgentBackend>);
    build_app(AppState::with_agent(ServerConfig::default(), agent))
}

/// Serve `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}
