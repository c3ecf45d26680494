use super::errors::ChatError;
use super::models::{ChatOutcome, ChatRequest, OrchestratorOptions};
use crate::application::session::{DEFAULT_SESSION_ID, SessionHandle, SessionStore};
use crate::application::tooling::{ToolDispatcher, ToolRegistry, ToolSnapshot};
use crate::infrastructure::model::{ModelGateway, ModelRequest, ModelResponse};
use crate::types::{ChatMessage, MessageRole, ToolCallResult};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

pub struct Orchestrator<G: ModelGateway> {
    gateway: G,
    sessions: Arc<SessionStore>,
    registry: Arc<ToolRegistry>,
    dispatcher: ToolDispatcher,
    options: OrchestratorOptions,
}

impl<G: ModelGateway> Orchestrator<G> {
    pub fn new(
        gateway: G,
        sessions: Arc<SessionStore>,
        registry: Arc<ToolRegistry>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            gateway,
            sessions,
            registry,
            dispatcher: ToolDispatcher::new(),
            options,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }

    /// Run one chat turn to completion.
    ///
    /// The session's turn lock is held throughout, so concurrent requests on
    /// the same id are applied one after the other in arrival order.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        if request.content.trim().is_empty() {
            return Err(ChatError::EmptyContent);
        }
        let session_id = request
            .session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

        let session = self.sessions.get_or_create(&session_id);
        let _turn = session.begin_turn().await;
        info!(session_id = session_id.as_str(), "Chat turn started");

        session.append(ChatMessage::user(request.content));

        let mut rounds = 0;
        let mut first_result: Option<ToolCallResult> = None;
        // Tools registered mid-turn become visible on the next request.
        let snapshot = self.registry.snapshot();

        loop {
            let mut reply = self.complete(&session, &snapshot).await?.message;

            if !reply.has_tool_calls() {
                return Ok(self.finish(&session, reply, rounds, first_result));
            }

            if rounds >= self.options.max_tool_rounds {
                warn!(
                    session_id = session_id.as_str(),
                    rounds,
                    pending = reply.tool_calls.len(),
                    "Tool round limit reached, leaving further tool calls unexecuted"
                );
                reply.tool_calls.clear();
                return Ok(self.finish(&session, reply, rounds, first_result));
            }

            rounds += 1;
            let calls = reply.tool_calls.clone();
            session.append(reply);

            let results = self.dispatcher.dispatch(&snapshot, &calls).await;
            if first_result.is_none() {
                first_result = results.first().cloned();
            }
            for result in results {
                session.append(result.into_message());
            }
            debug!(
                session_id = session_id.as_str(),
                round = rounds,
                calls = calls.len(),
                "Tool round completed"
            );
        }
    }

    async fn complete(
        &self,
        session: &SessionHandle,
        snapshot: &ToolSnapshot,
    ) -> Result<ModelResponse, ChatError> {
        let mut messages = Vec::new();
        if let Some(prompt) = self
            .options
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
        {
            messages.push(ChatMessage::new(MessageRole::System, prompt));
        }
        messages.extend(session.messages());

        let request = ModelRequest {
            model: self.options.model.clone(),
            messages,
            tools: snapshot.schemas(),
        };

        match timeout(self.options.model_timeout, self.gateway.complete(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => {
                error!(provider = self.gateway.id(), error = %err, "Model call failed");
                Err(ChatError::ModelUnavailable(err.to_string()))
            }
            Err(_) => {
                error!(
                    provider = self.gateway.id(),
                    timeout_secs = self.options.model_timeout.as_secs(),
                    "Model call timed out"
                );
                Err(ChatError::ModelUnavailable(format!(
                    "no answer from '{}' within {:?}",
                    self.gateway.id(),
                    self.options.model_timeout
                )))
            }
        }
    }

    fn finish(
        &self,
        session: &SessionHandle,
        reply: ChatMessage,
        rounds: usize,
        first_result: Option<ToolCallResult>,
    ) -> ChatOutcome {
        let content = reply.content.clone();
        let total = session.append(reply);
        let session_id = session.id();
        info!(
            session_id = session_id.as_str(),
            rounds,
            total_messages = total,
            "Chat turn finished"
        );
        let (tool_used, tool_result) = match first_result {
            Some(result) => (Some(result.tool_name), Some(result.content)),
            None => (None, None),
        };
        ChatOutcome {
            content,
            session_id,
            tool_used,
            tool_result,
            rounds,
        }
    }
}
