use super::defaults::{
    DEFAULT_LISTEN_PORT, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_MODEL, DEFAULT_MODEL_TIMEOUT_SECS,
    DEFAULT_TOOL_DIR, DEFAULT_TOOL_PREFIX, DEFAULT_TOOL_TIMEOUT_SECS,
};
use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where tool artifacts live and how they are run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub dir: PathBuf,
    pub prefix: String,
    pub timeout: Duration,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_TOOL_DIR),
            prefix: DEFAULT_TOOL_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }
}

/// Application configuration loaded from toolhost.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub provider: ModelProviderConfig,
    pub system_prompt: Option<String>,
    pub listen: SocketAddr,
    pub max_tool_rounds: usize,
    pub model_timeout: Duration,
    pub tools: ToolSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            provider: ModelProviderConfig::default(),
            system_prompt: None,
            listen: SocketAddr::from(([0, 0, 0, 0], DEFAULT_LISTEN_PORT)),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
            tools: ToolSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Like [`AppConfig::load`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse a configuration document without touching the filesystem.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"))
    }
}
