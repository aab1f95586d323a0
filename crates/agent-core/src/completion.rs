//! The seam to the external completion service.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::turn::{ToolDefinition, Turn};

/// Trait for chat-completion providers.
///
/// The orchestrator sends the full ordered turn history and, on the first
/// pass, the tool definitions the model may invoke. The implementation
/// returns the assistant's turn - plain text, tool-call requests, or both.
///
/// A completion failure is a hard failure of the whole conversational turn;
/// implementations should not retry internally.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a completion for the given history.
    ///
    /// `tools` is `Some` on the first pass (the model decides autonomously
    /// whether to call any) and `None` on the second pass, where it is
    /// expected to synthesize a grounded natural-language answer.
    async fn complete(
        &self,
        messages: Vec<Turn>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<Turn, AgentError>;
}
