use crate::application::orchestrator::ChatOutcome;
use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestChatRequest {
    pub content: String,
    /// Defaults to `"default"`.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestChatResponse {
    pub content: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<String>,
}

impl From<ChatOutcome> for RestChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            content: outcome.content,
            session_id: outcome.session_id,
            tool_used: outcome.tool_used,
            tool_result: outcome.tool_result,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterToolRequest {
    pub tool_path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub model: String,
    pub loaded_tools: Vec<String>,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn reply(status: StatusCode, error: impl Into<String>) -> ApiError {
        (
            status,
            Json(ErrorResponse {
                error: error.into(),
            }),
        )
    }
}
