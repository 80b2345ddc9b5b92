//! Bookstore agents for concierge
//!
//! A small, fixed book catalog and discount list, three tools over them
//! (price lookup, discount listing, tax calculation), and two agents:
//! - the **Bookstore Assistant**, which calls the tools directly;
//! - the **Bookstore Orchestrator**, which calls the assistant as a tool.

pub mod agents;
pub mod catalog;
pub mod error;
pub mod tools;

pub use agents::{ASSISTANT_QUERIES, ORCHESTRATOR_QUERIES, bookstore_assistant, bookstore_orchestrator};
pub use catalog::{Book, Category, Discount, CATALOG, DISCOUNTS};
pub use error::{BookstoreError, Result};
pub use tools::{calculate_tax, get_book_price, list_available_discounts};
