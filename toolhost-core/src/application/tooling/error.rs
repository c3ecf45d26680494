use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A tool artifact could not be turned into a descriptor.
#[derive(Debug, Error)]
pub enum ToolLoadError {
    #[error("tool artifact not found at {path:?}")]
    NotFound { path: PathBuf },
    #[error("tool artifact {path:?} is not a regular file")]
    NotAFile { path: PathBuf },
    #[error("tool artifact {path:?} is not executable")]
    NotExecutable { path: PathBuf },
    #[error("tool artifact {path:?} does not start with prefix '{prefix}'")]
    BadName { path: PathBuf, prefix: String },
    #[error("failed to query schema of {path:?}: {source}")]
    SchemaQuery {
        path: PathBuf,
        #[source]
        source: ToolExecutionError,
    },
    #[error("tool artifact {path:?} printed an invalid schema: {reason}")]
    InvalidSchema { path: PathBuf, reason: String },
}

/// A loaded tool failed while handling one call.
#[derive(Debug, Error)]
pub enum ToolExecutionError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("failed to spawn {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tool process I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("tool exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },
    #[error("tool timed out after {0:?}")]
    Timeout(Duration),
    #[error("tool panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Failed(String),
}

impl ToolExecutionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to create tool directory {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read tool directory {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
