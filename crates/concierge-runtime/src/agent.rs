//! Agent configuration records
//!
//! An [`AgentConfig`] is passive: a name, natural-language instructions, an
//! optional model, the tools the model may call while acting as this agent,
//! and the agents it may hand a query off to. Running one is the job of
//! [`crate::Runner`].

use concierge_core::{Error, Result};
use concierge_tools::{Tool, ToolRegistry};
use std::sync::Arc;

/// Configuration of one agent
///
/// Built through [`AgentConfig::builder`], which enforces:
/// - tool names are unique, including the synthesized handoff tools;
/// - an agent never lists itself (or an agent of the same name) as a handoff target;
/// - handoff targets are unique.
pub struct AgentConfig {
    name: String,
    instructions: String,
    model: Option<String>,
    tools: ToolRegistry,
    handoffs: Vec<Arc<AgentConfig>>,
    handoff_description: Option<String>,
}

impl AgentConfig {
    /// Start building an agent with the given name
    pub fn builder(name: impl Into<String>) -> AgentConfigBuilder {
        AgentConfigBuilder::new(name)
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instructions sent as the system prompt
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Model override, if any
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Tools attached to this agent
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Agents this one may hand off to, in declaration order
    pub fn handoffs(&self) -> &[Arc<AgentConfig>] {
        &self.handoffs
    }

    /// Name of the tool a parent calls to hand off to this agent
    ///
    /// ```
    /// use concierge_runtime::AgentConfig;
    ///
    /// let tutor = AgentConfig::builder("Math Tutor").build().unwrap();
    /// assert_eq!(tutor.handoff_tool_name(), "transfer_to_math_tutor");
    /// ```
    pub fn handoff_tool_name(&self) -> String {
        format!("transfer_to_{}", snake_case(&self.name))
    }

    /// Description of the handoff tool shown to a parent agent
    pub fn handoff_tool_description(&self) -> String {
        self.handoff_description.clone().unwrap_or_else(|| {
            format!("Handoff to the {} agent to handle the request.", self.name)
        })
    }

    /// Find a handoff target by its handoff tool name
    pub fn handoff_target(&self, tool_name: &str) -> Option<&AgentConfig> {
        self.handoffs
            .iter()
            .map(|agent| &**agent)
            .find(|agent| agent.handoff_tool_name() == tool_name)
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handoffs: Vec<&str> = self.handoffs.iter().map(|a| a.name()).collect();
        f.debug_struct("AgentConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tools)
            .field("handoffs", &handoffs)
            .finish_non_exhaustive()
    }
}

/// Builder for AgentConfig
pub struct AgentConfigBuilder {
    name: String,
    instructions: String,
    model: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    handoffs: Vec<Arc<AgentConfig>>,
    handoff_description: Option<String>,
}

impl AgentConfigBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            model: None,
            tools: Vec::new(),
            handoffs: Vec::new(),
            handoff_description: None,
        }
    }

    /// Set the instructions (system prompt)
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Pin the agent to a model; otherwise the runner's default is used
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach a tool
    pub fn tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    /// Declare a handoff target
    pub fn handoff(mut self, agent: Arc<AgentConfig>) -> Self {
        self.handoffs.push(agent);
        self
    }

    /// Describe this agent to parents that may hand off to it
    pub fn handoff_description(mut self, description: impl Into<String>) -> Self {
        self.handoff_description = Some(description.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AgentConfig> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "agent name must not be empty".to_string(),
            ));
        }

        let mut tools = ToolRegistry::new();
        for tool in self.tools {
            tools.register(tool)?;
        }

        let mut handoff_names: Vec<String> = Vec::with_capacity(self.handoffs.len());
        for target in &self.handoffs {
            if target.name() == self.name {
                return Err(Error::InvalidConfiguration(format!(
                    "agent '{}' cannot hand off to itself",
                    self.name
                )));
            }

            let tool_name = target.handoff_tool_name();
            if handoff_names.contains(&tool_name) {
                return Err(Error::InvalidConfiguration(format!(
                    "agent '{}' lists handoff target '{}' more than once",
                    self.name,
                    target.name()
                )));
            }
            if tools.contains(&tool_name) {
                return Err(Error::InvalidConfiguration(format!(
                    "handoff tool '{tool_name}' clashes with a tool of the same name"
                )));
            }
            handoff_names.push(tool_name);
        }

        Ok(AgentConfig {
            name: self.name,
            instructions: self.instructions,
            model: self.model,
            tools,
            handoffs: self.handoffs,
            handoff_description: self.handoff_description,
        })
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
