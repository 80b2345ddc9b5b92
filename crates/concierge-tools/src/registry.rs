//! Ordered tool registry for one agent

use crate::Tool;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while registering tools
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with this name is already registered
    #[error("duplicate tool name '{0}'")]
    Duplicate(String),
}

impl From<RegistryError> for concierge_core::Error {
    fn from(err: RegistryError) -> Self {
        concierge_core::Error::InvalidConfiguration(err.to_string())
    }
}

/// Registry of the tools attached to one agent
///
/// Keeps registration order (that is the order the model sees them in) and
/// rejects duplicate names.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        if self.contains(tool.name()) {
            return Err(RegistryError::Duplicate(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Whether a tool with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// All tools, in registration order
    pub fn list_tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FunctionTool;

    fn named(name: &str) -> Arc<dyn Tool> {
        Arc::new(FunctionTool::new(name, "test tool", |_| Ok(String::new())))
    }

    #[test]
    fn test_register_keeps_order() {
        let mut registry = ToolRegistry::new();
        registry.register(named("calculate_tax")).unwrap();
        registry.register(named("get_book_price")).unwrap();
        registry.register(named("list_available_discounts")).unwrap();

        assert_eq!(
            registry.names(),
            vec!["calculate_tax", "get_book_price", "list_available_discounts"]
        );
        assert_eq!(registry.len(), 3);
        assert!(registry.get("get_book_price").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(named("calculate_tax")).unwrap();
        let err = registry.register(named("calculate_tax")).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("calculate_tax".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_into_core_error() {
        let err: concierge_core::Error = RegistryError::Duplicate("x".to_string()).into();
        assert!(matches!(err, concierge_core::Error::InvalidConfiguration(_)));
    }
}
