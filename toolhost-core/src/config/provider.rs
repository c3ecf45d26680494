use super::defaults::{DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OPENAI_API_PATH};
use super::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Ollama,
    OpenAi,
}

impl ProviderKind {
    /// Maps the `type` string from the config file onto a wire format.
    pub fn infer(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "ollama" | "localai" => Ok(ProviderKind::Ollama),
            "openai" | "openai-compatible" | "azure" | "groq" | "mistral" => {
                Ok(ProviderKind::OpenAi)
            }
            _ => Err(ConfigError::UnknownProviderKind {
                kind: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
        }
    }
}

/// Model backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProviderConfig {
    pub kind: ProviderKind,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key: Option<String>,
    pub api_path: String,
}

impl Default for ModelProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Ollama,
            endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            api_key: None,
            api_path: DEFAULT_OPENAI_API_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawProviderConfig {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_path: Option<String>,
}

impl TryFrom<RawProviderConfig> for ModelProviderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawProviderConfig) -> Result<Self, Self::Error> {
        let defaults = ModelProviderConfig::default();
        let kind = match raw.kind.as_deref() {
            Some(kind) => ProviderKind::infer(kind)?,
            None => defaults.kind,
        };
        let endpoint = raw.endpoint.unwrap_or(defaults.endpoint);
        if endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        Ok(Self {
            kind,
            endpoint,
            api_key: raw.api_key,
            api_path: raw.api_path.unwrap_or(defaults.api_path),
        })
    }
}
