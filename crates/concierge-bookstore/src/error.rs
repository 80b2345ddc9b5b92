//! Error types for bookstore operations

use thiserror::Error;

/// Bookstore specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookstoreError {
    /// A monetary amount or rate is unusable
    #[error("Invalid {field}: {reason}")]
    InvalidAmount {
        /// Argument name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type alias for bookstore operations
pub type Result<T> = std::result::Result<T, BookstoreError>;

/// Convert BookstoreError to concierge_core::Error
impl From<BookstoreError> for concierge_core::Error {
    fn from(err: BookstoreError) -> Self {
        concierge_core::Error::InvalidToolInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookstoreError::InvalidAmount {
            field: "order_total",
            reason: "must not be negative".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid order_total: must not be negative");
    }

    #[test]
    fn test_error_conversion() {
        let err: concierge_core::Error = BookstoreError::InvalidAmount {
            field: "tax_rate",
            reason: "must be finite".to_string(),
        }
        .into();

        match err {
            concierge_core::Error::InvalidToolInput(msg) => {
                assert_eq!(msg, "Invalid tax_rate: must be finite");
            }
            _ => panic!("Expected InvalidToolInput variant"),
        }
    }
}
