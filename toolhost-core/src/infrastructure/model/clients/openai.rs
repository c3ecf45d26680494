//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use super::base::HttpClientBase;
use crate::config::ModelProviderConfig;
use crate::infrastructure::model::adapter::{MessageAdapter, WireToolCall};
use crate::infrastructure::model::factory::{api_key_configured, resolve_api_key};
use crate::infrastructure::model::traits::ModelGateway;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::{ChatMessage, MessageRole, ToolCallRequest};

/// OpenAI-compatible client
#[derive(Clone)]
pub struct OpenAiClient {
    base: HttpClientBase,
    api_path: String,
    authenticated: bool,
}

impl OpenAiClient {
    /// Creates client from provider config. A configured key variable that
    /// is unset surfaces as `MissingApiKey` on first use.
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        let id = config.kind.as_str();
        let api_key = resolve_api_key(id, config.api_key.as_deref());
        Self {
            base: HttpClientBase::new(id, config.endpoint.clone(), api_key),
            api_path: config.api_path.clone(),
            authenticated: api_key_configured(config.api_key.as_deref()),
        }
    }
}

#[async_trait]
impl ModelGateway for OpenAiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(&self.api_path);

        let payload = OpenAiRequest {
            model: &request.model,
            messages: MessageAdapter::to_openai_format(&request.messages),
            tools: MessageAdapter::to_function_tools(&request.tools),
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to OpenAI-compatible API"
        );

        let response: OpenAiResponse = if self.authenticated {
            self.base.post_with_bearer(&url, &payload).await?
        } else {
            self.base.post_no_auth(&url, &payload).await?
        };
        debug!("Received response from OpenAI-compatible API");

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "no choices returned"))?;

        message.into_response(&self.base.id)
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

impl OpenAiMessage {
    fn into_response(self, provider: &str) -> Result<ModelResponse, ModelError> {
        let role = match self.role.as_deref() {
            None => MessageRole::Assistant,
            Some(raw) => MessageRole::parse(raw).ok_or_else(|| {
                ModelError::invalid_response(provider, format!("unknown role '{raw}'"))
            })?,
        };
        // Tool results must echo a call id back to the API.
        let tool_calls = self
            .tool_calls
            .into_iter()
            .map(ToolCallRequest::from)
            .map(|call| match call.id {
                Some(_) => call,
                None => call.with_id(format!("call_{}", Uuid::new_v4().simple())),
            })
            .collect();
        let message =
            ChatMessage::new(role, self.content.unwrap_or_default()).with_tool_calls(tool_calls);
        Ok(ModelResponse { message })
    }
}
