//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Anything that can turn a free-text query into a final answer
///
/// Implemented by runner-bound agent configurations. Because the trait only
/// deals in strings, any implementation can also be wrapped as a tool and
/// called by another agent.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return the final text
    ///
    /// Implementations may record run metadata into `context`.
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shouting;

    #[async_trait]
    impl Agent for Shouting {
        async fn process(&self, input: String, context: &mut Context) -> Result<String> {
            context.set_last_agent(self.name());
            Ok(input.to_uppercase())
        }

        fn name(&self) -> &str {
            "shouting"
        }
    }

    #[tokio::test]
    async fn test_agent_is_object_safe() {
        let agent: Box<dyn Agent> = Box::new(Shouting);
        let mut ctx = Context::new();
        let out = agent.process("hi".to_string(), &mut ctx).await.unwrap();
        assert_eq!(out, "HI");
        assert_eq!(ctx.last_agent(), Some("shouting"));
    }
}
