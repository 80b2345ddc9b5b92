//! Core abstractions for concierge
//!
//! This crate defines the fundamental traits and types shared by the rest of
//! the workspace: the [`Agent`] trait implemented by anything that can answer
//! a query, the per-run [`Context`], and the common error type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
