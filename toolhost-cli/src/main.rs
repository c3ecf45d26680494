mod cli;

use clap::Parser;
use cli::Cli;
use std::error::Error;
use std::sync::Arc;
use toolhost_core::model::{GatewayFactory, ModelGateway};
use toolhost_core::orchestrator::{Orchestrator, OrchestratorOptions};
use toolhost_core::server::{self, ServerState};
use toolhost_core::session::SessionStore;
use toolhost_core::tooling::ToolRegistry;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting toolhost");
    let cli = Cli::parse();
    debug!(?cli, "CLI arguments parsed");

    let config = cli.load_config()?;
    info!(
        model = config.model.as_str(),
        provider = config.provider.kind.as_str(),
        endpoint = config.provider.endpoint.as_str(),
        max_tool_rounds = config.max_tool_rounds,
        "Configuration loaded"
    );

    let gateway = GatewayFactory::create(&config.provider);
    debug!(provider = gateway.id(), "Model gateway ready");

    let registry = Arc::new(ToolRegistry::new(config.tools.clone()));
    let summary = registry.load_all(&config.tools.dir).await?;
    info!(
        path = %config.tools.dir.display(),
        loaded = summary.loaded,
        failed = summary.failed,
        tools = ?summary.names,
        "Tool discovery finished"
    );

    let sessions = Arc::new(SessionStore::new());
    let orchestrator = Arc::new(Orchestrator::new(
        gateway,
        sessions,
        registry,
        OrchestratorOptions::from(&config),
    ));

    info!(addr = %config.listen, "Starting REST server");
    server::serve(Arc::new(ServerState::new(orchestrator)), config.listen).await?;
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
