//! Message adapters - convert between internal types and backend wire formats

use crate::application::tooling::ToolSchema;
use crate::types::{ChatMessage, MessageRole, ToolCallRequest};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Tool call as both backends report it: `{id?, function: {name, arguments}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct WireToolCall {
    #[serde(default)]
    pub id: Option<String>,
    pub function: WireFunction,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl From<WireToolCall> for ToolCallRequest {
    fn from(call: WireToolCall) -> Self {
        Self {
            id: call.id.filter(|id| !id.is_empty()),
            tool_name: call.function.name,
            arguments: call.function.arguments,
        }
    }
}

/// Adapter for converting messages to different API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// Tool advertisement in the `{"type": "function", "function": {...}}` shape
    /// shared by Ollama and OpenAI-compatible backends.
    pub fn to_function_tools(tools: &[ToolSchema]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.parameters,
                    }
                })
            })
            .collect()
    }

    /// Ollama wants tool-call arguments as objects and names tool results.
    pub fn to_ollama_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                let mut value = json!({
                    "role": msg.role.as_str(),
                    "content": msg.content,
                });
                if msg.has_tool_calls() {
                    value["tool_calls"] = msg
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "function": {
                                    "name": call.tool_name,
                                    "arguments": Self::arguments_as_object(&call.arguments),
                                }
                            })
                        })
                        .collect();
                }
                if let Some(name) = &msg.tool_name {
                    value["tool_name"] = json!(name);
                }
                value
            })
            .collect()
    }

    /// OpenAI wants string-encoded arguments and call ids on both sides.
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                let mut value = json!({ "role": msg.role.as_str() });
                if msg.has_tool_calls() {
                    value["content"] = if msg.content.is_empty() {
                        Value::Null
                    } else {
                        json!(msg.content)
                    };
                    value["tool_calls"] = msg
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "id": call.id,
                                "type": "function",
                                "function": {
                                    "name": call.tool_name,
                                    "arguments": Self::arguments_as_string(&call.arguments),
                                }
                            })
                        })
                        .collect();
                } else {
                    value["content"] = json!(msg.content);
                }
                if msg.role == MessageRole::Tool {
                    if let Some(id) = &msg.tool_call_id {
                        value["tool_call_id"] = json!(id);
                    }
                    if let Some(name) = &msg.tool_name {
                        value["name"] = json!(name);
                    }
                }
                value
            })
            .collect()
    }

    fn arguments_as_object(arguments: &Value) -> Value {
        match arguments {
            Value::Object(_) => arguments.clone(),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(parsed @ Value::Object(_)) => parsed,
                _ => Value::Object(Map::new()),
            },
            _ => Value::Object(Map::new()),
        }
    }

    fn arguments_as_string(arguments: &Value) -> String {
        match arguments {
            Value::String(text) => text.clone(),
            Value::Null => "{}".to_string(),
            other => other.to_string(),
        }
    }
}
