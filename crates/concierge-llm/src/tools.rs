//! Tool definition types for LLM tool use

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition sent to the provider
///
/// Describes a callable tool: its name, what it does, and a JSON Schema for
/// its arguments. The model only ever sees these definitions; the handlers
/// stay local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique per agent)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_creation() {
        let schema = json!({
            "type": "object",
            "properties": { "title": { "type": "string" } },
            "required": ["title"],
        });

        let tool = ToolDefinition::new("get_book_price", "Get the price of a book", schema.clone());
        assert_eq!(tool.name, "get_book_price");
        assert_eq!(tool.description, "Get the price of a book");
        assert_eq!(tool.input_schema, schema);
    }
}
