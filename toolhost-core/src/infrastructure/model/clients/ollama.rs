//! Ollama client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelProviderConfig;
use crate::infrastructure::model::adapter::{MessageAdapter, WireToolCall};
use crate::infrastructure::model::traits::ModelGateway;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::{ChatMessage, MessageRole, ToolCallRequest};

const CHAT_PATH: &str = "/api/chat";

/// Ollama client for local LLM
#[derive(Clone)]
pub struct OllamaClient {
    base: HttpClientBase,
}

impl OllamaClient {
    /// Creates client from provider config.
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        Self {
            base: HttpClientBase::new(config.kind.as_str(), config.endpoint.clone(), None),
        }
    }
}

#[async_trait]
impl ModelGateway for OllamaClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(CHAT_PATH);

        let payload = OllamaRequest {
            model: &request.model,
            messages: MessageAdapter::to_ollama_format(&request.messages),
            tools: MessageAdapter::to_function_tools(&request.tools),
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to Ollama"
        );

        let response: OllamaResponse = self.base.post_no_auth(&url, &payload).await?;
        let message = response
            .message
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing message"))?;
        debug!(
            tool_calls = message.tool_calls.len(),
            "Received response from Ollama"
        );

        message.into_response(&self.base.id)
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

impl OllamaMessage {
    fn into_response(self, provider: &str) -> Result<ModelResponse, ModelError> {
        let role = match self.role.as_deref() {
            None => MessageRole::Assistant,
            Some(raw) => MessageRole::parse(raw).ok_or_else(|| {
                ModelError::invalid_response(provider, format!("unknown role '{raw}'"))
            })?,
        };
        let tool_calls = self.tool_calls.into_iter().map(ToolCallRequest::from).collect();
        let message =
            ChatMessage::new(role, self.content.unwrap_or_default()).with_tool_calls(tool_calls);
        Ok(ModelResponse { message })
    }
}
