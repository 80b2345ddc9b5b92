//! Agent-as-tool adapter
//!
//! Lets an orchestrator call another agent the same way it calls a plain
//! function: the child agent receives the orchestrator's request text and
//! its final answer becomes the tool result.

use async_trait::async_trait;
use concierge_core::{Agent, Context, Result};
use concierge_tools::schema::object_schema;
use concierge_tools::{Param, Tool, ToolArgs};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// A tool that delegates to an agent
pub struct AgentTool {
    agent: Arc<dyn Agent>,
    name: String,
    description: String,
    params: Vec<Param>,
}

impl AgentTool {
    /// Wrap an agent as a tool with the given name and description
    pub fn new(
        agent: Arc<dyn Agent>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            name: name.into(),
            description: description.into(),
            params: vec![Param::string("input", "The request to pass to the agent")],
        }
    }

    /// The wrapped agent
    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }
}

#[async_trait]
impl Tool for AgentTool {
    async fn execute(&self, params: Value) -> Result<String> {
        let args = ToolArgs::bind(&self.params, params)?;
        let input = args.str("input")?.to_string();

        info!(agent = %self.agent.name(), tool_name = %self.name, "Delegating to agent");

        // The child gets its own context; nothing leaks back to the caller's run
        let mut context = Context::new();
        self.agent.process(input, &mut context).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        object_schema(&self.params)
    }
}
