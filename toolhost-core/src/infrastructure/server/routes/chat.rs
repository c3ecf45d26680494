use super::super::dto::{ApiError, ErrorResponse, RestChatRequest, RestChatResponse};
use super::super::state::ServerState;
use crate::application::orchestrator::{ChatError, ChatRequest};
use crate::infrastructure::model::ModelGateway;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = RestChatRequest,
    responses(
        (status = 200, description = "Final assistant answer", body = RestChatResponse),
        (status = 400, description = "Empty message content", body = ErrorResponse),
        (status = 502, description = "Model backend unavailable", body = ErrorResponse)
    )
)]
pub async fn chat_handler<G: ModelGateway>(
    State(state): State<Arc<ServerState<G>>>,
    Json(payload): Json<RestChatRequest>,
) -> Result<Json<RestChatResponse>, ApiError> {
    let RestChatRequest {
        content,
        session_id,
    } = payload;

    info!(session = session_id.as_deref(), "Received /chat request");

    let request = ChatRequest {
        content,
        session_id,
    };
    match state.orchestrator().chat(request).await {
        Ok(outcome) => {
            info!(
                session_id = outcome.session_id.as_str(),
                tool_used = outcome.tool_used.as_deref(),
                "Chat request completed"
            );
            Ok(Json(RestChatResponse::from(outcome)))
        }
        Err(err @ ChatError::EmptyContent) => {
            error!("Rejecting /chat request due to empty content");
            Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, err.to_string()))
        }
        Err(err @ ChatError::ModelUnavailable(_)) => {
            error!(error = %err, "Chat request failed");
            Err(ErrorResponse::reply(StatusCode::BAD_GATEWAY, err.to_string()))
        }
    }
}
