use super::super::dto::{ApiError, ErrorResponse, MessageResponse};
use super::super::state::ServerState;
use crate::application::session::SessionError;
use crate::infrastructure::model::ModelGateway;
use crate::types::ChatMessage;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, info};

#[utoipa::path(
    get,
    path = "/conversation/{session_id}",
    tag = "conversation",
    params(("session_id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Messages in append order", body = [ChatMessage]),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn get_conversation_handler<G: ModelGateway>(
    State(state): State<Arc<ServerState<G>>>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    match state.sessions().get(&session_id) {
        Ok(session) => {
            debug!(
                session_id = session_id.as_str(),
                messages = session.len(),
                "Serving conversation"
            );
            Ok(Json(session.messages))
        }
        Err(err @ SessionError::NotFound(_)) => {
            Err(ErrorResponse::reply(StatusCode::NOT_FOUND, err.to_string()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/conversation/{session_id}",
    tag = "conversation",
    params(("session_id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session removed, or was already absent", body = MessageResponse)
    )
)]
pub async fn delete_conversation_handler<G: ModelGateway>(
    State(state): State<Arc<ServerState<G>>>,
    Path(session_id): Path<String>,
) -> Json<MessageResponse> {
    match state.sessions().delete(&session_id) {
        Ok(()) => info!(session_id = session_id.as_str(), "Session deleted"),
        Err(_) => debug!(session_id = session_id.as_str(), "Delete of unknown session"),
    }
    Json(MessageResponse::new(format!("Session {session_id} deleted")))
}
