//! Per-query run context
//!
//! A fresh `Context` is created for every query. Agents record run metadata
//! into it (which agent produced the answer, how many model calls it took,
//! token usage, handoffs), and the driver reads it back for logging. Nothing
//! in it outlives the query.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Position of the query in its batch
    pub const QUERY_INDEX: &str = "query_index";
    /// Name of the agent that produced the final output
    pub const LAST_AGENT: &str = "last_agent";
    /// Number of model calls made for the query
    pub const TURNS: &str = "turns";
    /// Prompt tokens consumed
    pub const INPUT_TOKENS: &str = "input_tokens";
    /// Completion tokens produced
    pub const OUTPUT_TOKENS: &str = "output_tokens";
    /// Agent names control was handed to, in order
    pub const HANDOFFS: &str = "handoffs";
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use concierge_core::Context;
///
/// let mut ctx = Context::new().with_query_index(2);
/// ctx.set_last_agent("Math Tutor");
///
/// assert_eq!(ctx.query_index(), Some(2));
/// assert_eq!(ctx.last_agent(), Some("Math Tutor"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch position of the query
    pub fn with_query_index(mut self, index: usize) -> Self {
        self.insert(keys::QUERY_INDEX, json!(index));
        self
    }

    /// Batch position of the query
    pub fn query_index(&self) -> Option<usize> {
        self.get_usize(keys::QUERY_INDEX)
    }

    /// Record the agent that produced the final output
    pub fn set_last_agent(&mut self, name: impl Into<String>) {
        self.insert(keys::LAST_AGENT, json!(name.into()));
    }

    /// Agent that produced the final output
    pub fn last_agent(&self) -> Option<&str> {
        self.get(keys::LAST_AGENT).and_then(|v| v.as_str())
    }

    /// Record the number of model calls
    pub fn set_turns(&mut self, turns: usize) {
        self.insert(keys::TURNS, json!(turns));
    }

    /// Number of model calls
    pub fn turns(&self) -> Option<usize> {
        self.get_usize(keys::TURNS)
    }

    /// Add token usage to the running totals
    pub fn add_usage(&mut self, input_tokens: usize, output_tokens: usize) {
        let input = self.get_usize(keys::INPUT_TOKENS).unwrap_or(0) + input_tokens;
        let output = self.get_usize(keys::OUTPUT_TOKENS).unwrap_or(0) + output_tokens;
        self.insert(keys::INPUT_TOKENS, json!(input));
        self.insert(keys::OUTPUT_TOKENS, json!(output));
    }

    /// Token totals as `(input, output)`
    pub fn usage(&self) -> (usize, usize) {
        (
            self.get_usize(keys::INPUT_TOKENS).unwrap_or(0),
            self.get_usize(keys::OUTPUT_TOKENS).unwrap_or(0),
        )
    }

    /// Append a handoff target to the trail
    pub fn push_handoff(&mut self, agent_name: impl Into<String>) {
        let mut trail = self.handoffs();
        trail.push(agent_name.into());
        self.insert(keys::HANDOFFS, json!(trail));
    }

    /// Handoff trail, oldest first
    pub fn handoffs(&self) -> Vec<String> {
        self.get_typed(keys::HANDOFFS).ok().flatten().unwrap_or_default()
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Get a typed value from the context
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                crate::Error::ProcessingFailed(format!("Failed to deserialize context value: {e}"))
            }),
        }
    }

    /// Insert a typed value into the context
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(serde_json::Value::as_u64)
            .map(|n| n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = Context::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.last_agent(), None);
        assert_eq!(ctx.turns(), None);
        assert_eq!(ctx.usage(), (0, 0));
        assert!(ctx.handoffs().is_empty());
    }

    #[test]
    fn test_usage_accumulates() {
        let mut ctx = Context::new();
        ctx.add_usage(100, 20);
        ctx.add_usage(50, 5);
        assert_eq!(ctx.usage(), (150, 25));
    }

    #[test]
    fn test_handoff_trail_keeps_order() {
        let mut ctx = Context::new();
        ctx.push_handoff("Math Tutor");
        ctx.push_handoff("History Tutor");
        assert_eq!(ctx.handoffs(), vec!["Math Tutor", "History Tutor"]);
    }

    #[test]
    fn test_typed_round_trip() {
        let mut ctx = Context::new();
        ctx.insert_typed("names", &vec!["a", "b"]).unwrap();
        let names: Vec<String> = ctx.get_typed("names").unwrap().unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_turns_and_index() {
        let mut ctx = Context::new().with_query_index(3);
        ctx.set_turns(2);
        assert_eq!(ctx.query_index(), Some(3));
        assert_eq!(ctx.turns(), Some(2));
    }
}
