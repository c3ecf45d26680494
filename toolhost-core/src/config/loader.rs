use super::app::{AppConfig, ToolSettings};
use super::defaults::{CONFIG_PATH, ENV_PATH};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    model: Option<String>,
    system_prompt: Option<String>,
    listen: Option<String>,
    max_tool_rounds: Option<usize>,
    model_timeout_secs: Option<u64>,
    #[serde(default)]
    provider: RawProviderConfig,
    #[serde(default)]
    tools: RawToolSettings,
}

#[derive(Debug, Deserialize, Default)]
struct RawToolSettings {
    dir: Option<String>,
    prefix: Option<String>,
    timeout_secs: Option<u64>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    read_config(config_path)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading server configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

pub(super) fn parse_config(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let model = parsed.model.unwrap_or(defaults.model);
    if model.trim().is_empty() {
        return Err(ConfigError::MissingModel);
    }

    let listen = match parsed.listen {
        Some(value) => value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddress { value, source })?,
        None => defaults.listen,
    };

    let max_tool_rounds = parsed.max_tool_rounds.unwrap_or(defaults.max_tool_rounds);
    if max_tool_rounds == 0 {
        return Err(ConfigError::InvalidToolRounds);
    }

    let model_timeout = timeout_secs(
        parsed.model_timeout_secs,
        defaults.model_timeout,
        "model_timeout_secs",
    )?;

    let tool_defaults = ToolSettings::default();
    let tool_timeout = timeout_secs(
        parsed.tools.timeout_secs,
        tool_defaults.timeout,
        "tools.timeout_secs",
    )?;
    let prefix = parsed.tools.prefix.unwrap_or(tool_defaults.prefix);
    if prefix.is_empty() {
        return Err(ConfigError::EmptyToolPrefix);
    }
    let dir = parsed
        .tools
        .dir
        .map(|dir| expand_path(&dir))
        .unwrap_or(tool_defaults.dir);

    Ok(AppConfig {
        model,
        provider: ModelProviderConfig::try_from(parsed.provider)?,
        system_prompt: parsed.system_prompt.filter(|prompt| !prompt.trim().is_empty()),
        listen,
        max_tool_rounds,
        model_timeout,
        tools: ToolSettings {
            dir,
            prefix,
            timeout: tool_timeout,
        },
    })
}

fn timeout_secs(
    raw: Option<u64>,
    default: Duration,
    field: &'static str,
) -> Result<Duration, ConfigError> {
    match raw {
        Some(0) => Err(ConfigError::InvalidTimeout { field }),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(default),
    }
}

fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    PathBuf::from(expanded)
}
