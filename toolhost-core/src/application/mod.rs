pub mod orchestrator;
pub mod session;
pub mod tooling;
