//! Runner for agent loops
//!
//! The Runner implements the local half of the agent loop:
//! 1. Call the model with the conversation, the active agent's instructions and its tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools (or follow a handoff) and loop back
//! 4. If completed, return the final text
//!
//! Which tool to call and which agent to hand off to is always decided by
//! the model; the runner only carries those decisions out.

use crate::agents::{AgentTool, BoundAgent};
use crate::AgentConfig;
use async_trait::async_trait;
use concierge_core::{Error, Result};
use concierge_llm::{
    CompletionRequest, LLMProvider, Message, StopReason, TokenUsage, ToolDefinition,
};
use concierge_utils::Settings;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const TRUNCATED_RESPONSE: &str = "Response truncated due to token limit";

/// Observer callbacks fired while a run progresses
///
/// All methods default to doing nothing, so implementors pick the events
/// they care about.
#[async_trait]
pub trait RunHooks: Send + Sync {
    /// An agent became active (at the start, and after each handoff)
    async fn on_agent_start(&self, _agent: &str) {}

    /// A tool is about to run
    async fn on_tool_start(&self, _agent: &str, _tool: &str, _input: &Value) {}

    /// A tool finished; `output` is the text fed back to the model
    async fn on_tool_end(&self, _agent: &str, _tool: &str, _output: &str) {}

    /// Control moved from one agent to another
    async fn on_handoff(&self, _from: &str, _to: &str) {}
}

/// Hooks that ignore every event
pub struct NoOpHooks;

#[async_trait]
impl RunHooks for NoOpHooks {}

/// Configuration for a run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Model used by agents that do not pin one
    pub model: String,

    /// Maximum model calls per query
    pub max_turns: usize,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature; provider default when unset
    pub temperature: Option<f32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_turns: 10,
            max_tokens: 4096,
            temperature: None,
        }
    }
}

impl RunConfig {
    /// Derive a run configuration from startup settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            model: settings.model.clone(),
            max_turns: settings.max_turns,
            ..Self::default()
        }
    }

    /// Set the default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the turn limit
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set max tokens per completion
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Final text produced by the last active agent
    pub final_output: String,

    /// Name of the agent that produced the final text
    pub last_agent: String,

    /// Number of model calls made
    pub turns: usize,

    /// Token usage summed over all model calls
    pub usage: TokenUsage,

    /// Agents handed off to, in order
    pub handoffs: Vec<String>,

    /// Number of regular tool calls executed
    pub tool_calls: usize,
}

/// Drives agents against an LLM provider
#[derive(Clone)]
pub struct Runner {
    provider: Arc<dyn LLMProvider>,
    config: RunConfig,
    hooks: Arc<dyn RunHooks>,
}

impl Runner {
    /// Create a new runner
    pub fn new(provider: Arc<dyn LLMProvider>, config: RunConfig) -> Self {
        Self {
            provider,
            config,
            hooks: Arc::new(NoOpHooks),
        }
    }

    /// Attach observer hooks
    pub fn with_hooks(mut self, hooks: Arc<dyn RunHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Run configuration in use
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Bind an agent configuration to this runner
    pub fn bind(&self, agent: Arc<AgentConfig>) -> BoundAgent {
        BoundAgent::new(self.clone(), agent)
    }

    /// Expose an agent configuration as a tool for another agent
    pub fn agent_tool(
        &self,
        agent: Arc<AgentConfig>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AgentTool {
        AgentTool::new(Arc::new(self.bind(agent)), name, description)
    }

    /// Run a query through an agent until it produces a final answer
    pub async fn run(&self, agent: &AgentConfig, input: impl Into<String>) -> Result<RunResult> {
        let input = input.into();
        let mut conversation = vec![Message::user(input)];
        let mut active = agent;
        let mut usage = TokenUsage::default();
        let mut handoffs: Vec<String> = Vec::new();
        let mut tool_calls = 0;

        self.hooks.on_agent_start(active.name()).await;

        for turn in 1..=self.config.max_turns {
            let offer_handoffs = handoffs.is_empty();
            let tools = tool_definitions(active, offer_handoffs);
            let model = active.model().unwrap_or(&self.config.model);

            info!(
                agent = %active.name(),
                turn,
                max_turns = self.config.max_turns,
                model = %model,
                tool_count = tools.len(),
                "Sending request to LLM"
            );

            let request = CompletionRequest::builder(model)
                .messages(conversation.clone())
                .system(active.instructions())
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature)
                .tools(tools)
                .build();

            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

            usage += response.usage;
            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );
            if let Some(text) = response.message.text() {
                debug!(response_preview = %preview(&text, 300), "LLM response content preview");
            }

            conversation.push(response.message.clone());

            // A tool-use stop with no calls attached can never make progress
            let stop_reason = match response.stop_reason {
                StopReason::ToolUse if !response.message.has_tool_uses() => {
                    warn!(agent = %active.name(), "Tool use reported without tool calls");
                    StopReason::EndTurn
                }
                other => other,
            };

            match stop_reason {
                StopReason::EndTurn | StopReason::StopSequence => {
                    let final_output = response.message.text().unwrap_or_default();
                    info!(
                        agent = %active.name(),
                        turns = turn,
                        response_length = final_output.len(),
                        "Agent completed"
                    );
                    return Ok(RunResult {
                        final_output,
                        last_agent: active.name().to_string(),
                        turns: turn,
                        usage,
                        handoffs,
                        tool_calls,
                    });
                }

                StopReason::MaxTokens => {
                    warn!(agent = %active.name(), "Hit max tokens in LLM response");
                    let final_output = response
                        .message
                        .text()
                        .unwrap_or_else(|| TRUNCATED_RESPONSE.to_string());
                    return Ok(RunResult {
                        final_output,
                        last_agent: active.name().to_string(),
                        turns: turn,
                        usage,
                        handoffs,
                        tool_calls,
                    });
                }

                StopReason::ToolUse => {
                    let mut next_agent: Option<&AgentConfig> = None;

                    for (id, name, input) in response.message.tool_uses() {
                        if let Some(target) = active.handoff_target(name).filter(|_| offer_handoffs)
                        {
                            if next_agent.is_some() {
                                warn!(tool_name = %name, "Ignoring extra handoff in the same response");
                                conversation.push(Message::tool_error(
                                    id,
                                    "Error: a handoff was already performed for this request",
                                ));
                                continue;
                            }

                            info!(from = %active.name(), to = %target.name(), "Handing off");
                            self.hooks.on_handoff(active.name(), target.name()).await;
                            handoffs.push(target.name().to_string());
                            conversation.push(Message::tool_result(
                                id,
                                json!({ "assistant": target.name() }).to_string(),
                            ));
                            next_agent = Some(target);
                            continue;
                        }

                        tool_calls += 1;
                        let message = self.execute_tool(active, id, name, input).await;
                        conversation.push(message);
                    }

                    if let Some(target) = next_agent {
                        active = target;
                        self.hooks.on_agent_start(active.name()).await;
                    }
                }
            }
        }

        warn!(
            agent = %active.name(),
            max_turns = self.config.max_turns,
            "Max turns reached without a final answer"
        );
        Err(Error::MaxTurnsExceeded(self.config.max_turns))
    }

    /// Execute one tool call and turn the outcome into a tool-result message
    async fn execute_tool(
        &self,
        agent: &AgentConfig,
        id: &str,
        name: &str,
        input: &Value,
    ) -> Message {
        let Some(tool) = agent.tools().get(name) else {
            warn!(agent = %agent.name(), tool_name = %name, "Model requested an unknown tool");
            let output = format!("Error: unknown tool '{name}'");
            self.hooks.on_tool_end(agent.name(), name, &output).await;
            return Message::tool_error(id, output);
        };

        info!(
            tool_name = %name,
            tool_id = %id,
            input_preview = %preview(&input.to_string(), 500),
            "Executing tool"
        );
        self.hooks.on_tool_start(agent.name(), name, input).await;

        let start_time = Instant::now();
        let result = tool.execute(input.clone()).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match result {
            Ok(output) => {
                info!(
                    tool_name = %name,
                    duration_ms,
                    result_length = output.len(),
                    result_preview = %preview(&output, 500),
                    "Tool execution succeeded"
                );
                self.hooks.on_tool_end(agent.name(), name, &output).await;
                Message::tool_result(id, output)
            }
            Err(e) => {
                warn!(tool_name = %name, duration_ms, error = %e, "Tool execution failed");
                let output = format!("Error: {e}");
                self.hooks.on_tool_end(agent.name(), name, &output).await;
                Message::tool_error(id, output)
            }
        }
    }
}

/// Tool definitions for an agent, followed by its handoff tools when offered
fn tool_definitions(agent: &AgentConfig, with_handoffs: bool) -> Vec<ToolDefinition> {
    let mut definitions: Vec<ToolDefinition> = agent
        .tools()
        .list_tools()
        .iter()
        .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
        .collect();

    if with_handoffs {
        definitions.extend(agent.handoffs().iter().map(|target| {
            ToolDefinition::new(
                target.handoff_tool_name(),
                target.handoff_tool_description(),
                json!({ "type": "object", "properties": {}, "required": [] }),
            )
        }));
    }

    definitions
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
