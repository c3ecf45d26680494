//! # Tooling
//!
//! Pluggable tools the model can call.
//!
//! - [`descriptor`] - the plugin contract ([`ToolHandler`], [`ToolDescriptor`])
//! - [`scanner`] / [`loader`] - discovery of executable artifacts on disk
//! - [`process`] - running an artifact for one call
//! - [`registry`] - the live, copy-on-write name → descriptor table
//! - [`dispatcher`] - failure-isolated batch execution of tool calls

pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod loader;
pub mod process;
pub mod registry;
pub mod scanner;

pub use descriptor::{
    FnHandler, ToolArguments, ToolDescriptor, ToolHandler, ToolSchema, ToolSource,
    default_parameter_schema,
};
pub use dispatcher::{TOOL_NOT_FOUND, ToolDispatcher};
pub use error::{DiscoveryError, ToolExecutionError, ToolLoadError};
pub use loader::load_tool;
pub use process::ProcessTool;
pub use registry::{DiscoverySummary, ToolRegistry, ToolSnapshot};
pub use scanner::{DiscoveredTool, derive_tool_name, scan_folder};
