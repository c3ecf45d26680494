//! Model infrastructure module
//!
//! The gateway to the language-model backend.
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - the [`ModelGateway`] seam
//! - `adapter` - conversion to and from backend wire formats
//! - `factory` - builds a gateway from provider config
//! - `clients` - Ollama and OpenAI-compatible implementations

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use factory::GatewayFactory;
pub use traits::ModelGateway;
pub use types::{ModelError, ModelRequest, ModelResponse};
