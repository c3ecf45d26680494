//! Shared test fixtures: scripted gateways, tool scripts, ephemeral servers.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use toolhost_core::config::ToolSettings;
use toolhost_core::model::{ModelError, ModelGateway, ModelRequest, ModelResponse};
use toolhost_core::orchestrator::{Orchestrator, OrchestratorOptions};
use toolhost_core::server::{ServerState, serve_with_listener};
use toolhost_core::session::SessionStore;
use toolhost_core::tooling::ToolRegistry;
use toolhost_core::types::{MessageRole, ToolCallRequest};

/// Replays canned replies in order and records every request.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<ModelResponse, ModelError>>>,
    seen: Mutex<Vec<ModelRequest>>,
}

impl ScriptedGateway {
    pub fn new(replies: Vec<Result<ModelResponse, ModelError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.seen.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ModelResponse::new("script exhausted")))
    }
}

/// Answers every request with `echo: <last user message>`.
pub struct EchoGateway;

#[async_trait]
impl ModelGateway for EchoGateway {
    fn id(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let last = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        tokio::task::yield_now().await;
        Ok(ModelResponse::new(format!("echo: {last}")))
    }
}

pub fn tool_call(name: &str, arguments: serde_json::Value) -> ModelResponse {
    ModelResponse::new("").with_tool_calls(vec![ToolCallRequest::new(name, arguments)])
}

pub fn orchestrator<G: ModelGateway>(gateway: G, registry: Arc<ToolRegistry>) -> Orchestrator<G> {
    Orchestrator::new(
        gateway,
        Arc::new(SessionStore::new()),
        registry,
        OrchestratorOptions::default(),
    )
}

pub fn empty_registry() -> Arc<ToolRegistry> {
    Arc::new(ToolRegistry::new(ToolSettings::default()))
}

/// Serve on an ephemeral port and return the base URL.
pub async fn spawn_server<G: ModelGateway + 'static>(orchestrator: Orchestrator<G>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(ServerState::new(Arc::new(orchestrator)));
    tokio::spawn(async move {
        serve_with_listener(listener, state).await.unwrap();
    });
    format!("http://{addr}")
}

/// Write an executable shell tool. `schema` is printed for `--schema`,
/// `body` runs for a call with the arguments on stdin.
#[cfg(unix)]
pub fn write_tool_script(
    dir: &Path,
    file_name: &str,
    schema: Option<&str>,
    body: &str,
) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let schema_branch = match schema {
        Some(schema) => format!("  echo '{schema}'\n  exit 0\n"),
        None => "  exit 0\n".to_string(),
    };
    let script = format!(
        "#!/bin/sh\nif [ \"$1\" = \"--schema\" ]; then\n{schema_branch}fi\n{body}\n"
    );
    let path = dir.join(file_name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
