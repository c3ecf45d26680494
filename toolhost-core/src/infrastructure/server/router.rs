use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::infrastructure::model::ModelGateway;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;

/// Build the application router.
pub fn router<G>(state: Arc<ServerState<G>>) -> Router
where
    G: ModelGateway + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api-doc/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/status", get(routes::status::status_handler::<G>))
        .route("/register_tool", post(routes::tools::register_tool_handler::<G>))
        .route("/chat", post(routes::chat::chat_handler::<G>))
        .route(
            "/conversation/{session_id}",
            get(routes::conversation::get_conversation_handler::<G>)
                .delete(routes::conversation::delete_conversation_handler::<G>),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn serve<G>(state: Arc<ServerState<G>>, addr: SocketAddr) -> Result<(), ServerError>
where
    G: ModelGateway + 'static,
{
    info!(%addr, "Binding REST server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_with_listener(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve_with_listener<G>(
    listener: TcpListener,
    state: Arc<ServerState<G>>,
) -> Result<(), ServerError>
where
    G: ModelGateway + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "REST server ready to accept connections");
    }
    axum::serve(listener, router(state).into_make_service())
        .await
        .map_err(ServerError::Serve)
}
