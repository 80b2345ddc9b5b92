//! Shared utilities for concierge
//!
//! This crate provides common functionality used across the concierge workspace:
//! logging setup and the startup settings every binary validates before it
//! builds any agent.

pub mod config;
pub mod logging;

pub use config::{ConfigError, FailureMode, Settings};
pub use logging::init_tracing_with_default;
