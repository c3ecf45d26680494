use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("field 'model' must not be empty")]
    MissingModel,

    #[error("unknown provider type '{kind}' (expected 'ollama' or 'openai')")]
    UnknownProviderKind { kind: String },

    #[error("provider endpoint must not be empty")]
    MissingEndpoint,

    #[error("invalid listen address '{value}': {source}")]
    InvalidListenAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("'max_tool_rounds' must be at least 1")]
    InvalidToolRounds,

    #[error("'{field}' must be at least 1 second")]
    InvalidTimeout { field: &'static str },

    #[error("tool prefix must not be empty")]
    EmptyToolPrefix,
}
