//! Adapters from agent configurations to the core interfaces
//!
//! - BoundAgent: an `AgentConfig` bound to a `Runner`, usable as `concierge_core::Agent`
//! - AgentTool: any `concierge_core::Agent` exposed as a `Tool` to a parent agent

pub mod as_tool;
pub mod bound;

pub use as_tool::AgentTool;
pub use bound::BoundAgent;
