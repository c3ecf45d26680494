//! # toolhost-core
//!
//! Tool-augmented chat orchestration. A model backend is advertised a set of
//! pluggable tools; when it asks for one, the tool runs and its result is fed
//! back before the final answer is returned.
//!
//! ## Layout
//!
//! - [`types`] - messages and tool-call records shared by every layer
//! - [`config`] - `toolhost.toml` loading and validation
//! - [`session`] - in-memory conversation histories
//! - [`tooling`] - tool plugin contract, discovery, registry and dispatch
//! - [`model`] - the model gateway and its Ollama / OpenAI-compatible clients
//! - [`orchestrator`] - the chat control loop
//! - [`server`] - the REST surface

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{orchestrator, session, tooling};
pub use domain::types;
pub use infrastructure::{model, server};
