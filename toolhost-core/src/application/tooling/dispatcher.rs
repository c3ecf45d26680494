use super::descriptor::ToolArguments;
use super::error::ToolExecutionError;
use super::registry::ToolSnapshot;
use crate::types::{ToolCallRequest, ToolCallResult};
use futures::FutureExt;
use futures::future::join_all;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, info, warn};

/// Content of the result produced for an unknown tool name.
pub const TOOL_NOT_FOUND: &str = "Tool not found";

/// Runs a batch of tool calls against a registry snapshot.
///
/// Every request yields exactly one result, in request order. Unknown tools,
/// malformed arguments, handler errors and handler panics all become result
/// content; nothing escapes `dispatch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolDispatcher;

impl ToolDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub async fn dispatch(
        &self,
        snapshot: &ToolSnapshot,
        requests: &[ToolCallRequest],
    ) -> Vec<ToolCallResult> {
        debug!(count = requests.len(), "Dispatching tool calls");
        join_all(
            requests
                .iter()
                .map(|request| self.dispatch_one(snapshot, request)),
        )
        .await
    }

    async fn dispatch_one(
        &self,
        snapshot: &ToolSnapshot,
        request: &ToolCallRequest,
    ) -> ToolCallResult {
        let result = |content: String, raw_arguments: Value| ToolCallResult {
            tool_name: request.tool_name.clone(),
            content,
            raw_arguments,
            call_id: request.id.clone(),
        };

        let Some(tool) = snapshot.get(&request.tool_name) else {
            warn!(tool = %request.tool_name, "Model requested an unknown tool");
            return result(TOOL_NOT_FOUND.to_string(), request.arguments.clone());
        };

        let arguments = match parse_arguments(&request.arguments) {
            Ok(arguments) => arguments,
            Err(err) => {
                warn!(tool = %request.tool_name, error = %err, "Rejected tool arguments");
                return result(format!("Error: {err}"), request.arguments.clone());
            }
        };
        let raw_arguments = Value::Object(arguments.clone());

        info!(tool = %request.tool_name, arguments = %raw_arguments, "Executing tool");
        let outcome = AssertUnwindSafe(tool.handler.invoke(arguments))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(ToolExecutionError::Panicked(panic_message(&*panic))));

        match outcome {
            Ok(content) => {
                debug!(tool = %request.tool_name, result = %content, "Tool finished");
                result(content, raw_arguments)
            }
            Err(err) => {
                warn!(tool = %request.tool_name, error = %err, "Tool execution failed");
                result(format!("Error: {err}"), raw_arguments)
            }
        }
    }
}

/// Accepts an object, a string holding an object, or nothing at all.
pub fn parse_arguments(raw: &Value) -> Result<ToolArguments, ToolExecutionError> {
    match raw {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(ToolArguments::new()),
        Value::String(text) if text.trim().is_empty() => Ok(ToolArguments::new()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ToolExecutionError::InvalidArguments(format!(
                "expected a JSON object, got {other}"
            ))),
            Err(err) => Err(ToolExecutionError::InvalidArguments(err.to_string())),
        },
        other => Err(ToolExecutionError::InvalidArguments(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
