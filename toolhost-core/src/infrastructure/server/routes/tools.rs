use super::super::dto::{ApiError, ErrorResponse, MessageResponse, RegisterToolRequest};
use super::super::state::ServerState;
use crate::infrastructure::model::ModelGateway;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[utoipa::path(
    post,
    path = "/register_tool",
    tag = "tools",
    request_body = RegisterToolRequest,
    responses(
        (status = 200, description = "Tool loaded and registered", body = MessageResponse),
        (status = 400, description = "Tool artifact could not be loaded", body = ErrorResponse)
    )
)]
pub async fn register_tool_handler<G: ModelGateway>(
    State(state): State<Arc<ServerState<G>>>,
    Json(payload): Json<RegisterToolRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let raw = payload.tool_path.trim();
    if raw.is_empty() {
        warn!("Rejecting /register_tool request with empty path");
        return Err(ErrorResponse::reply(
            StatusCode::BAD_REQUEST,
            "tool_path cannot be empty",
        ));
    }

    let path = PathBuf::from(raw);
    info!(path = %path.display(), "Received /register_tool request");

    match state.registry().register_path(&path).await {
        Ok(name) => Ok(Json(MessageResponse::new(format!(
            "Tool {name} registered successfully"
        )))),
        Err(err) => Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, err.to_string())),
    }
}
