use crate::application::orchestrator::Orchestrator;
use crate::application::session::SessionStore;
use crate::application::tooling::ToolRegistry;
use crate::infrastructure::model::ModelGateway;
use std::sync::Arc;

pub struct ServerState<G: ModelGateway> {
    orchestrator: Arc<Orchestrator<G>>,
}

impl<G: ModelGateway> ServerState<G> {
    pub fn new(orchestrator: Arc<Orchestrator<G>>) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> Arc<Orchestrator<G>> {
        Arc::clone(&self.orchestrator)
    }

    pub fn sessions(&self) -> &SessionStore {
        self.orchestrator.sessions()
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.orchestrator.registry()
    }
}
