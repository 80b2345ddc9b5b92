//! Agent runtime for concierge
//!
//! This crate turns passive [`AgentConfig`] records into running agents:
//! the [`Runner`] drives the model/tool loop and follows handoffs,
//! [`BoundAgent`] and [`AgentTool`] adapt a configuration to the `Agent` and
//! `Tool` interfaces, and [`QueryDriver`] feeds a fixed batch of queries
//! through an agent and prints the answers.

pub mod agent;
pub mod agents;
pub mod driver;
pub mod runner;

#[cfg(feature = "test-util")]
pub mod testing;

// Re-export key types
pub use agent::{AgentConfig, AgentConfigBuilder};
pub use agents::{AgentTool, BoundAgent};
pub use driver::{DriverReport, DriverState, QueryDriver};
pub use runner::{NoOpHooks, RunConfig, RunHooks, RunResult, Runner};
