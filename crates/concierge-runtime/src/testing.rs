//! Scripted model for exercising agents without a network
//!
//! Enabled by the `test-util` feature. [`ScriptedProvider`] replays canned
//! completions in order and records every request, so tests can assert on
//! what the runner sent as well as on what it returned.

use async_trait::async_trait;
use concierge_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, StopReason, TokenUsage,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Replays canned responses in order and records every request it receives
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<CompletionResponse, LLMError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Replay `script` in order; once it runs out every call fails
    pub fn new(script: Vec<Result<CompletionResponse, LLMError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Responses not consumed yet
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::UnexpectedResponse("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn usage() -> TokenUsage {
    TokenUsage {
        input_tokens: 10,
        output_tokens: 5,
    }
}

/// A final answer (10 input and 5 output tokens)
pub fn answer(text: &str) -> Result<CompletionResponse, LLMError> {
    Ok(CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: usage(),
    })
}

/// A response requesting the given `(id, tool, input)` calls
pub fn calls(requests: &[(&str, &str, Value)]) -> Result<CompletionResponse, LLMError> {
    let blocks = requests
        .iter()
        .map(|(id, name, input)| ContentBlock::ToolUse {
            id: (*id).to_string(),
            name: (*name).to_string(),
            input: input.clone(),
        })
        .collect();
    Ok(CompletionResponse {
        message: Message::assistant_blocks(blocks),
        stop_reason: StopReason::ToolUse,
        usage: usage(),
    })
}

/// Tool result blocks sent back in a request, as `(tool_use_id, content, is_error)`
pub fn tool_results(request: &CompletionRequest) -> Vec<(String, String, bool)> {
    request
        .messages
        .iter()
        .filter_map(|m| match &m.content {
            Some(MessageContent::Blocks(blocks)) => Some(blocks),
            _ => None,
        })
        .flatten()
        .filter_map(|b| match b {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => Some((tool_use_id.clone(), content.clone(), is_error.unwrap_or(false))),
            _ => None,
        })
        .collect()
}

/// Names of the tools offered in a request
pub fn offered_tools(request: &CompletionRequest) -> Vec<String> {
    request
        .tools
        .iter()
        .flatten()
        .map(|t| t.name.clone())
        .collect()
}

/// Content of the most recent tool result in a request
pub fn last_tool_result(request: &CompletionRequest) -> Option<String> {
    tool_results(request)
        .pop()
        .map(|(_, content, _)| content)
}
