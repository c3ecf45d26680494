pub mod app;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod provider;

pub use app::{AppConfig, ToolSettings};
pub use defaults::{CONFIG_PATH, ENV_PATH};
pub use error::ConfigError;
pub use provider::{ModelProviderConfig, ProviderKind};
