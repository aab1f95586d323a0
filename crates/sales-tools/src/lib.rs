//! Tool registry for the car-sales assistant.
//!
//! Two tools are registered: catalog search and financing quotes. Their
//! JSON-Schema descriptions are exposed verbatim to the completion service;
//! inbound tool calls are parsed into typed invocations at the dispatch
//! boundary and routed to the inventory services.
//!
//! Dispatch never fails: unknown tools, malformed arguments, and rejected
//! inputs all serialize to structured error text that flows back to the
//! model as a tool result, so one bad call can never abort a turn.

mod error;
mod invocation;
mod registry;

pub use error::ToolError;
pub use invocation::{FinancingArgs, SearchArgs, ToolInvocation};
pub use registry::SalesToolRegistry;
