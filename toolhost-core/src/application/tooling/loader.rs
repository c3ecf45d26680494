//! Tool loader
//!
//! Turns one artifact on disk into a [`ToolDescriptor`]: validates the file,
//! asks it for its parameter schema and wraps it in a [`ProcessTool`].

use super::descriptor::{ToolDescriptor, ToolSource, default_parameter_schema};
use super::error::ToolLoadError;
use super::process::{ProcessTool, SCHEMA_FLAG, run_artifact};
use super::scanner::{derive_tool_name, is_executable};
use crate::config::ToolSettings;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Load a single tool artifact.
pub async fn load_tool(
    path: &Path,
    settings: &ToolSettings,
) -> Result<ToolDescriptor, ToolLoadError> {
    debug!(path = %path.display(), "Loading tool artifact");

    if !path.exists() {
        return Err(ToolLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ToolLoadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let name = derive_tool_name(path, &settings.prefix).ok_or_else(|| ToolLoadError::BadName {
        path: path.to_path_buf(),
        prefix: settings.prefix.clone(),
    })?;
    if !is_executable(path) {
        return Err(ToolLoadError::NotExecutable {
            path: path.to_path_buf(),
        });
    }

    let (description, schema) = query_schema(path, settings).await?;
    let mut descriptor = ToolDescriptor::new(
        name,
        Arc::new(ProcessTool::new(path, settings.timeout)),
    )
    .with_schema(schema)
    .with_source(ToolSource::Artifact(path.to_path_buf()));
    if let Some(description) = description {
        descriptor = descriptor.with_description(description);
    }

    info!(
        tool = %descriptor.name,
        path = %path.display(),
        "Tool artifact loaded"
    );
    Ok(descriptor)
}

async fn query_schema(
    path: &Path,
    settings: &ToolSettings,
) -> Result<(Option<String>, Value), ToolLoadError> {
    let output = run_artifact(path, &[SCHEMA_FLAG], None, settings.timeout)
        .await
        .map_err(|source| ToolLoadError::SchemaQuery {
            path: path.to_path_buf(),
            source,
        })?;

    if !output.success || output.stdout.is_empty() {
        debug!(
            path = %path.display(),
            status = %output.status,
            "Tool does not publish a schema, using empty parameters"
        );
        return Ok((None, default_parameter_schema()));
    }

    parse_schema(&output.stdout).map_err(|reason| ToolLoadError::InvalidSchema {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse a printed schema, pulling out an optional top-level `description`.
pub(crate) fn parse_schema(raw: &str) -> Result<(Option<String>, Value), String> {
    let value: Value = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    let Value::Object(mut object) = value else {
        return Err("schema must be a JSON object".to_string());
    };

    let description = match object.remove("description") {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    };

    match object.get("type") {
        None => {
            object.insert("type".into(), Value::String("object".into()));
        }
        Some(Value::String(kind)) if kind == "object" => {}
        Some(other) => return Err(format!("schema type must be \"object\", got {other}")),
    }
    if !object.get("properties").is_some_and(Value::is_object) {
        object.insert("properties".into(), Value::Object(Map::new()));
    }
    if !object.get("required").is_some_and(Value::is_array) {
        object.insert("required".into(), Value::Array(Vec::new()));
    }

    Ok((description, Value::Object(object)))
}
