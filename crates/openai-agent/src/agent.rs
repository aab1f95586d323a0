//! The two-pass tool-calling orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use agent_core::{
    fingerprint, AgentError, CompletionClient, InMemorySessionStore, SessionStore, Turn,
    SYSTEM_INSTRUCTIONS,
};
use inventory::Catalog;
use sales_tools::SalesToolRegistry;

use crate::client::OpenAiClient;
use crate::config::OpenAiConfig;

/// Reply used when the completion service returns no text.
const FALLBACK_REPLY: &str = "I apologize, but I couldn't generate a response.";

/// The conversational sales agent.
///
/// One inbound `(user id, message)` pair runs a strictly sequential
/// pipeline: load-or-create the session, first completion with the tool
/// schemas attached, dispatch any requested tool calls in model order,
/// second completion over the updated history, final answer.
///
/// Completion faults on either pass fail the whole turn; faults inside a
/// tool never do - they come back to the model as structured error text.
///
/// Messages for the same user are serialized by a per-session lock so
/// overlapping requests cannot interleave history; different users proceed
/// in parallel.
pub struct SalesAgent<C, S> {
    completions: C,
    store: S,
    tools: SalesToolRegistry,
    system_prompt: String,
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SalesAgent<OpenAiClient, InMemorySessionStore> {
    /// Build the production agent: OpenAI client plus in-memory sessions.
    pub fn from_config(config: OpenAiConfig, catalog: Arc<Catalog>) -> Result<Self, AgentError> {
        let store = InMemorySessionStore::new(config.max_sessions);
        let system_prompt = config.system_prompt.clone();
        let client = OpenAiClient::new(config)?;
        Ok(Self::new(client, store, catalog, system_prompt))
    }
}

impl<C, S> SalesAgent<C, S>
where
    C: CompletionClient,
    S: SessionStore,
{
    /// Create an agent from its parts. `system_prompt` of `None` selects
    /// the built-in instructions.
    pub fn new(
        completions: C,
        store: S,
        catalog: Arc<Catalog>,
        system_prompt: Option<String>,
    ) -> Self {
        let system_prompt = system_prompt.unwrap_or_else(|| SYSTEM_INSTRUCTIONS.to_string());
        info!(
            "Sales agent initialized; system prompt fingerprint: {}",
            fingerprint(&system_prompt)
        );

        Self {
            completions,
            store,
            tools: SalesToolRegistry::new(catalog),
            system_prompt,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Process one inbound message and return the final reply text.
    pub async fn handle_message(&self, user_id: &str, text: &str) -> Result<String, AgentError> {
        // Per-session mutual exclusion: overlapping messages for one user
        // must not interleave history appends.
        let session_lock = {
            let mut locks = self.session_locks.lock().await;
            locks
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _turn_guard = session_lock.lock().await;

        debug!("Processing message from {}: {}", user_id, text);

        let created = self
            .store
            .get_or_create(user_id, Turn::system(self.system_prompt.as_str()))
            .await;
        if created {
            debug!("No existing session; created new session for {}", user_id);
        }
        self.store.append(user_id, Turn::user(text)).await;

        let history = self.store.history(user_id).await;
        info!("Requesting completion (first pass, {} turns)", history.len());
        let assistant = self
            .completions
            .complete(history, Some(self.tools.definitions()))
            .await?;

        if !assistant.has_tool_calls() {
            let reply = final_text(assistant.content.clone());
            info!("No tool call needed");
            self.store
                .append(user_id, Turn::assistant(reply.as_str()))
                .await;
            return Ok(reply);
        }

        let calls = assistant.tool_calls.clone().unwrap_or_default();
        info!("Tool calls requested: {}", calls.len());

        // Preserve the tool-call-bearing turn unmodified; the tool turns
        // below reference its call ids.
        self.store.append(user_id, assistant).await;

        for call in &calls {
            let output = self.tools.dispatch(call);
            self.store
                .append(
                    user_id,
                    Turn::tool(call.id.as_str(), call.function.name.as_str(), output),
                )
                .await;
        }

        let history = self.store.history(user_id).await;
        info!(
            "Requesting completion (second pass, {} turns)",
            history.len()
        );
        let synthesis = self.completions.complete(history, None).await?;

        let reply = final_text(synthesis.content);
        self.store
            .append(user_id, Turn::assistant(reply.as_str()))
            .await;
        Ok(reply)
    }

    /// Snapshot a user's session history (diagnostics and tests).
    pub async fn session_history(&self, user_id: &str) -> Vec<Turn> {
        self.store.history(user_id).await
    }
}

fn final_text(content: Option<String>) -> String {
    content.unwrap_or_else(|| {
        warn!("No content in response, using fallback");
        FALLBACK_REPLY.to_string()
    })
}
