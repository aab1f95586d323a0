//! Core types and traits for the car-sales assistant.
//!
//! This crate provides the shared vocabulary for the rest of the workspace:
//!
//! - [`Turn`] / [`ToolCall`] / [`ToolDefinition`] - Conversation and
//!   tool-call wire types (OpenAI chat-completion shaped)
//! - [`CompletionClient`] - The seam to the external completion service
//! - [`SessionStore`] / [`InMemorySessionStore`] - Per-user conversation
//!   history storage
//! - [`AgentError`] - Error types for agent operations
//! - [`SYSTEM_INSTRUCTIONS`] - The fixed behavioral prompt

mod completion;
mod error;
mod prompt;
mod session;
mod turn;

pub use completion::CompletionClient;
pub use error::AgentError;
pub use prompt::{fingerprint, SYSTEM_INSTRUCTIONS};
pub use session::{InMemorySessionStore, SessionStore};
pub use turn::{FunctionCall, FunctionSpec, ToolCall, ToolDefinition, Turn};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
