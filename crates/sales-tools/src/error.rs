//! Error types for tool dispatch.

use thiserror::Error;

/// Errors raised while resolving or parsing a tool call.
///
/// These never propagate past the dispatch boundary; the registry converts
/// them to structured error text for the model.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The argument payload did not match the tool's schema.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}
