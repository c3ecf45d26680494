//! # Orchestrator
//!
//! The chat control loop over one session:
//!
//! 1. append the user turn
//! 2. ask the model, advertising the current tool snapshot
//! 3. if the reply requests tools and rounds remain: append it, dispatch the
//!    calls against that same snapshot, append one `tool` message per result,
//!    and go back to 2
//! 4. otherwise append the reply and return its content
//!
//! Model failures end the request with [`ChatError::ModelUnavailable`];
//! tool failures never do.

mod errors;
mod models;
mod runner;

pub use errors::ChatError;
pub use models::{ChatOutcome, ChatRequest, OrchestratorOptions};
pub use runner::Orchestrator;
