//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Chat-completion backend that understands tool schemas.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Short backend identifier used in logs and errors
    fn id(&self) -> &str;

    /// Send the conversation and tool advertisement, wait for one reply
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

#[async_trait]
impl<G: ModelGateway + ?Sized> ModelGateway for Box<G> {
    fn id(&self) -> &str {
        (**self).id()
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        (**self).complete(request).await
    }
}

#[async_trait]
impl<G: ModelGateway + ?Sized> ModelGateway for Arc<G> {
    fn id(&self) -> &str {
        (**self).id()
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        (**self).complete(request).await
    }
}
