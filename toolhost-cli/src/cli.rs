use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use toolhost_core::config::{AppConfig, ConfigError};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "toolhost",
    version,
    about = "Tool-augmented chat server in front of an Ollama or OpenAI-compatible model"
)]
pub struct Cli {
    /// Path to toolhost.toml (defaults to config/toolhost.toml, optional)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Address the REST server binds to
    #[arg(long)]
    pub listen: Option<SocketAddr>,
    /// Directory scanned for tool artifacts at startup
    #[arg(long)]
    pub tool_dir: Option<PathBuf>,
    #[arg(long)]
    pub model: Option<String>,
    /// Model backend base URL
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long)]
    pub max_tool_rounds: Option<usize>,
}

impl Cli {
    /// Flags win over the file.
    pub fn apply_overrides(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(listen) = self.listen {
            info!(%listen, "Overriding listen address from CLI flag");
            config.listen = listen;
        }
        if let Some(dir) = &self.tool_dir {
            info!(path = %dir.display(), "Overriding tool directory from CLI flag");
            config.tools.dir = dir.clone();
        }
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(ConfigError::MissingModel);
            }
            config.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            if endpoint.trim().is_empty() {
                return Err(ConfigError::MissingEndpoint);
            }
            info!(url = %endpoint, "Overriding provider endpoint from CLI flag");
            config.provider.endpoint = endpoint.clone();
        }
        if let Some(rounds) = self.max_tool_rounds {
            if rounds == 0 {
                return Err(ConfigError::InvalidToolRounds);
            }
            config.max_tool_rounds = rounds;
        }
        Ok(())
    }

    /// An explicit `--config` must exist; the default path may be absent.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(Some(path.as_path()))?,
            None => AppConfig::load_or_default(None)?,
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }
}
