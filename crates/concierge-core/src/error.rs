//! Error types for concierge-core

use std::time::Duration;
use thiserror::Error;

/// Result type alias for concierge-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Agent configuration violates an invariant
    #[error("Invalid agent configuration: {0}")]
    InvalidConfiguration(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// A tool rejected its input or failed while running
    #[error("{0}")]
    InvalidToolInput(String),

    /// The model kept requesting tools past the turn limit
    #[error("Max turns ({0}) exceeded")]
    MaxTurnsExceeded(usize),

    /// A query did not finish in time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Writing program output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
