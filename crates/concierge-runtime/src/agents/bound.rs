//! Bound agent implementation (an AgentConfig paired with a Runner)

use crate::{AgentConfig, RunResult, Runner};
use async_trait::async_trait;
use concierge_core::{Agent, Context, Result};
use std::sync::Arc;

/// An agent configuration ready to answer queries
///
/// BoundAgent wraps a [`Runner`] and an [`AgentConfig`] to provide the
/// `Agent` trait interface. Besides returning the final text, it records run
/// metadata into the context: the agent that produced the answer, the
/// number of model calls, token usage, and the handoff trail.
///
/// # Example
///
/// ```no_run
/// use concierge_core::{Agent, Context};
/// use concierge_runtime::{AgentConfig, Runner};
/// use std::sync::Arc;
///
/// # async fn example(runner: Runner) -> concierge_core::Result<()> {
/// let tutor = Arc::new(
///     AgentConfig::builder("History Tutor")
///         .instructions("You answer history questions clearly and concisely.")
///         .build()?,
/// );
///
/// let agent = runner.bind(tutor);
/// let mut context = Context::new();
/// let answer = agent
///     .process("Who was the first president of the United States?".to_string(), &mut context)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BoundAgent {
    runner: Runner,
    config: Arc<AgentConfig>,
}

impl BoundAgent {
    /// Create a new bound agent
    pub fn new(runner: Runner, config: Arc<AgentConfig>) -> Self {
        Self { runner, config }
    }

    /// The agent configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run a query and return the full run result
    pub async fn run(&self, input: impl Into<String>) -> Result<RunResult> {
        self.runner.run(&self.config, input).await
    }
}

#[async_trait]
impl Agent for BoundAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let result = self.run(input).await?;

        context.set_last_agent(&result.last_agent);
        context.set_turns(result.turns);
        context.add_usage(result.usage.input_tokens, result.usage.output_tokens);
        for agent in &result.handoffs {
            context.push_handoff(agent);
        }

        Ok(result.final_output)
    }

    fn name(&self) -> &str {
        self.config.name()
    }
}
