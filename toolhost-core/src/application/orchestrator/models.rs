use crate::config::AppConfig;
use crate::config::defaults::{DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_MODEL, DEFAULT_MODEL_TIMEOUT_SECS};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    pub model: String,
    /// Sent ahead of the history on every model call, never stored.
    pub system_prompt: Option<String>,
    /// Tool dispatch rounds allowed per chat request.
    pub max_tool_rounds: usize,
    pub model_timeout: Duration,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}

impl From<&AppConfig> for OrchestratorOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            max_tool_rounds: config.max_tool_rounds,
            model_timeout: config.model_timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub content: String,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            session_id: None,
        }
    }

    pub fn in_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub content: String,
    pub session_id: String,
    /// Name of the first tool called in the first round.
    pub tool_used: Option<String>,
    /// Raw result content of that call.
    pub tool_result: Option<String>,
    /// Tool dispatch rounds actually performed.
    pub rounds: usize,
}
