//! Bookstore agent configurations

use crate::catalog::{Category, titles};
use crate::tools::{calculate_tax_tool, get_book_price_tool, list_available_discounts_tool};
use concierge_core::Result;
use concierge_runtime::{AgentConfig, Runner};
use std::sync::Arc;

/// Name of the assistant agent
pub const ASSISTANT_NAME: &str = "Bookstore Assistant";

/// Name of the orchestrator agent
pub const ORCHESTRATOR_NAME: &str = "Bookstore Orchestrator";

/// Model the assistant is pinned to
pub const ASSISTANT_MODEL: &str = "gpt-4o";

/// Tool name under which the orchestrator sees the assistant
pub const ASSISTANT_TOOL_NAME: &str = "bookstore_assistant";

/// Queries for the assistant batch
pub const ASSISTANT_QUERIES: [&str; 3] = [
    "How much is '1984'?",
    "Do you have any discounts on Fiction books?",
    "How much would be the total with tax for '1984' and 'Sapiens'?",
];

/// Queries for the orchestrator batch
pub const ORCHESTRATOR_QUERIES: [&str; 3] = [
    "How much is 'Atomic Habits' and 'Sapiens' with tax?",
    "Do you have any books under $10?",
    "If I buy 3 books, do I get any discount?",
];

const ORCHESTRATOR_INSTRUCTIONS: &str =
    "Smart Assistant to manage book orders, tax calculations, and discounts.";

/// Assistant instructions, listing the catalog by category
pub fn assistant_instructions() -> String {
    let mut instructions = String::from(
        "You are a bookstore assistant. Help customers with book inquiries, pricing, and discounts.\n\
         You have access to the book catalog with the following categories:\n",
    );
    for category in [Category::Fiction, Category::NonFiction] {
        instructions.push_str(&format!("- {}: {}\n", category.label(), titles(category).join(", ")));
    }
    instructions.push_str(
        "\nUse the get_book_price function to check book prices and \
         list_available_discounts to provide discount information.\n",
    );
    instructions
}

/// The assistant: answers with the catalog tools directly
pub fn bookstore_assistant() -> Result<AgentConfig> {
    AgentConfig::builder(ASSISTANT_NAME)
        .instructions(assistant_instructions())
        .model(ASSISTANT_MODEL)
        .tool(calculate_tax_tool())
        .tool(get_book_price_tool())
        .tool(list_available_discounts_tool())
        .build()
}

/// The orchestrator: delegates catalog questions to the assistant and
/// computes tax itself
pub fn bookstore_orchestrator(runner: &Runner, assistant: Arc<AgentConfig>) -> Result<AgentConfig> {
    AgentConfig::builder(ORCHESTRATOR_NAME)
        .instructions(ORCHESTRATOR_INSTRUCTIONS)
        .tool(runner.agent_tool(assistant, ASSISTANT_TOOL_NAME, "Find book prices and discounts"))
        .tool(calculate_tax_tool())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_configuration() {
        let assistant = bookstore_assistant().unwrap();
        assert_eq!(assistant.name(), "Bookstore Assistant");
        assert_eq!(assistant.model(), Some("gpt-4o"));
        assert_eq!(
            assistant.tools().names(),
            vec!["calculate_tax", "get_book_price", "list_available_discounts"]
        );
        assert!(assistant.handoffs().is_empty());
    }

    #[test]
    fn test_instructions_list_catalog() {
        let instructions = assistant_instructions();
        assert!(instructions.contains(
            "- Fiction: 1984, To Kill a Mockingbird, The Great Gatsby, Brave New World, The Catcher in the Rye\n"
        ));
        assert!(instructions.contains(
            "- Non-fiction: Sapiens, Educated, Atomic Habits, The Power of Habit, Thinking, Fast and Slow\n"
        ));
    }

    #[test]
    fn test_query_batches() {
        assert_eq!(ASSISTANT_QUERIES.len(), 3);
        assert_eq!(ORCHESTRATOR_QUERIES[1], "Do you have any books under $10?");
    }
}
