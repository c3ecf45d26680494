use super::error::ToolExecutionError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::ToSchema;

/// Arguments handed to a tool: always a JSON object.
pub type ToolArguments = Map<String, Value>;

/// The callable half of a tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, arguments: ToolArguments) -> Result<String, ToolExecutionError>;
}

/// Adapts a plain closure into a [`ToolHandler`].
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(ToolArguments) -> Result<String, ToolExecutionError> + Send + Sync,
{
    async fn invoke(&self, arguments: ToolArguments) -> Result<String, ToolExecutionError> {
        (self.0)(arguments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSource {
    InProcess,
    Artifact(PathBuf),
}

/// Schema used when a tool does not describe its parameters.
pub fn default_parameter_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

pub fn default_description(name: &str) -> String {
    format!("Executes the {name} tool")
}

#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameter_schema: Value,
    pub handler: Arc<dyn ToolHandler>,
    pub source: ToolSource,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, handler: Arc<dyn ToolHandler>) -> Self {
        let name = name.into();
        Self {
            description: default_description(&name),
            name,
            parameter_schema: default_parameter_schema(),
            handler,
            source: ToolSource::InProcess,
        }
    }

    /// Builds an in-process tool from a synchronous closure.
    pub fn from_fn<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments) -> Result<String, ToolExecutionError> + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(FnHandler(handler)))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.parameter_schema = schema;
        self
    }

    pub fn with_source(mut self, source: ToolSource) -> Self {
        self.source = source;
        self
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameter_schema.clone(),
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameter_schema", &self.parameter_schema)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// What the model backend is told about one tool.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub parameters: Value,
}
