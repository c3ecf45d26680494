use super::super::dto::StatusResponse;
use super::super::state::ServerState;
use crate::infrastructure::model::ModelGateway;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    responses(
        (status = 200, description = "Server is running", body = StatusResponse)
    )
)]
pub async fn status_handler<G: ModelGateway>(
    State(state): State<Arc<ServerState<G>>>,
) -> Json<StatusResponse> {
    let loaded_tools = state.registry().names();
    let active_sessions = state.sessions().count();
    debug!(
        tool_count = loaded_tools.len(),
        active_sessions, "Serving /status request"
    );
    Json(StatusResponse {
        status: "running".to_string(),
        model: state.orchestrator().model().to_string(),
        loaded_tools,
        active_sessions,
    })
}
