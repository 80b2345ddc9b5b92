//! Tool trait definition

use async_trait::async_trait;
use concierge_core::Result;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Both plain functions ([`crate::FunctionTool`]) and whole agents wrapped as
/// capabilities implement this trait, so an agent's tool list treats them the
/// same way.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// `params` should match [`Tool::input_schema`]. Errors describe what was
    /// wrong with the input or the computation.
    async fn execute(&self, params: Value) -> Result<String>;

    /// Get the tool's name
    ///
    /// Must be unique within one agent's tool list
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Execute and fold any failure into the returned text
    ///
    /// Never fails: an error comes back as `"Error: <message>"`.
    async fn invoke(&self, params: Value) -> String {
        match self.execute(params).await {
            Ok(output) => output,
            Err(e) => format!("Error: {e}"),
        }
    }
}
