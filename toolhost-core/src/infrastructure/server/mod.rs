//! REST surface over the orchestrator.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /status` | [`routes::status`] |
//! | `POST /register_tool` | [`routes::tools`] |
//! | `POST /chat` | [`routes::chat`] |
//! | `GET`/`DELETE /conversation/{session_id}` | [`routes::conversation`] |
//! | `GET /api-doc/openapi.json` | generated OpenAPI document |

mod docs;
pub mod dto;
mod error;
mod router;
pub mod routes;
mod state;

pub use docs::ApiDoc;
pub use error::ServerError;
pub use router::{router, serve, serve_with_listener};
pub use state::ServerState;
