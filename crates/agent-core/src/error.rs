//! Error types for agent operations.

use thiserror::Error;

/// Errors that can fail a whole conversational turn.
///
/// Tool-level trouble is deliberately absent here: failures inside a tool
/// are converted to structured error text at the dispatch boundary and fed
/// back to the model, so only configuration problems and completion-service
/// faults surface as `Err`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure talking to the completion service.
    #[error("Network error: {0}")]
    Network(String),

    /// The completion service answered, but the exchange failed.
    #[error("Completion failed: {0}")]
    Completion(String),
}
