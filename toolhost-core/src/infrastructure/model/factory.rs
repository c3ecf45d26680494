//! Gateway factory - creates clients from config

use super::clients::{OllamaClient, OpenAiClient};
use super::traits::ModelGateway;
use crate::config::{ModelProviderConfig, ProviderKind};
use std::env;
use tracing::warn;

/// Whether a key variable name is configured at all; blank counts as none.
pub(crate) fn api_key_configured(env_var: Option<&str>) -> bool {
    env_var.is_some_and(|name| !name.trim().is_empty())
}

/// Resolve API key from environment variable
pub fn resolve_api_key(provider: &str, env_var: Option<&str>) -> Option<String> {
    if !api_key_configured(env_var) {
        return None;
    }
    let raw = env_var.map(str::trim)?;
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating model gateways from provider config.
pub struct GatewayFactory;

impl GatewayFactory {
    pub fn create(config: &ModelProviderConfig) -> Box<dyn ModelGateway> {
        match config.kind {
            ProviderKind::Ollama => Box::new(OllamaClient::from_config(config)),
            ProviderKind::OpenAi => Box::new(OpenAiClient::from_config(config)),
        }
    }
}
