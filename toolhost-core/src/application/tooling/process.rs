//! Out-of-process tool execution.
//!
//! An artifact is run once per call: arguments go in as a JSON object on
//! stdin, the trimmed stdout is the result. The child is killed if the call
//! times out or the calling future is dropped.

use super::descriptor::{ToolArguments, ToolHandler};
use super::error::ToolExecutionError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};
use tracing::{debug, warn};

/// Flag that asks an artifact to print its parameter schema.
pub const SCHEMA_FLAG: &str = "--schema";

#[derive(Debug)]
pub(crate) struct ProcessOutput {
    pub success: bool,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

pub(crate) async fn run_artifact(
    path: &Path,
    args: &[&str],
    stdin: Option<&[u8]>,
    timeout: Duration,
) -> Result<ProcessOutput, ToolExecutionError> {
    let mut command = Command::new(path);
    command
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|source| ToolExecutionError::Spawn {
        path: path.to_path_buf(),
        source,
    })?;

    // stdout is drained while stdin is written so a tool echoing a large
    // input cannot stall on a full pipe.
    let pipe = child.stdin.take();
    let exchange = async {
        let (written, output) = tokio::join!(feed_stdin(pipe, stdin), child.wait_with_output());
        written?;
        Ok::<_, ToolExecutionError>(output?)
    };
    let output = tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| {
            warn!(path = %path.display(), ?timeout, "Tool process timed out");
            ToolExecutionError::Timeout(timeout)
        })??;

    Ok(ProcessOutput {
        success: output.status.success(),
        status: output.status.to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

async fn feed_stdin(
    pipe: Option<ChildStdin>,
    input: Option<&[u8]>,
) -> Result<(), ToolExecutionError> {
    let (Some(mut pipe), Some(input)) = (pipe, input) else {
        return Ok(());
    };
    // Tools that ignore their input may exit before reading it.
    match pipe.write_all(input).await {
        Err(err) if err.kind() != ErrorKind::BrokenPipe => Err(ToolExecutionError::Io(err)),
        _ => Ok(()),
    }
}

/// Handler backed by an executable tool artifact.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    path: PathBuf,
    timeout: Duration,
}

impl ProcessTool {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ToolHandler for ProcessTool {
    async fn invoke(&self, arguments: ToolArguments) -> Result<String, ToolExecutionError> {
        let payload = serde_json::to_vec(&arguments)
            .map_err(|err| ToolExecutionError::InvalidArguments(err.to_string()))?;
        debug!(
            path = %self.path.display(),
            bytes = payload.len(),
            "Running tool process"
        );

        let output = run_artifact(&self.path, &[], Some(&payload), self.timeout).await?;
        if !output.success {
            let stderr = if output.stderr.is_empty() {
                "no error output".to_string()
            } else {
                output.stderr
            };
            return Err(ToolExecutionError::Exited {
                status: output.status,
                stderr,
            });
        }
        Ok(output.stdout)
    }
}
