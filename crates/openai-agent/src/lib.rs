//! OpenAI-backed sales agent.
//!
//! This crate ties the workspace together:
//!
//! - [`OpenAiClient`] - A chat-completion client for the OpenAI API
//!   (implements [`CompletionClient`])
//! - [`OpenAiConfig`] - Environment-driven configuration
//! - [`SalesAgent`] - The two-pass tool-calling orchestrator
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use inventory::Catalog;
//! use openai_agent::{OpenAiConfig, SalesAgent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenAiConfig::from_env()?;
//!     let catalog = Arc::new(Catalog::load_or_empty("data/vehicles.csv"));
//!     let agent = SalesAgent::from_config(config, catalog)?;
//!
//!     let reply = agent.handle_message("+15551234567", "Do you have a Chevy?").await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod agent;
mod api_types;
mod client;
mod config;

pub use agent::SalesAgent;
pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use agent_core::{
    AgentError, CompletionClient, InMemorySessionStore, SessionStore, ToolCall, ToolDefinition,
    Turn,
};
