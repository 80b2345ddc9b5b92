//! Tutor agent configurations

use crate::tools::solve_equation_tool;
use concierge_core::Result;
use concierge_runtime::AgentConfig;
use std::sync::Arc;

/// Width of the dashed line printed after each answer
pub const SEPARATOR_WIDTH: usize = 50;

/// Student questions submitted to the triage agent
pub const TUTOR_QUERIES: [&str; 4] = [
    "Solve the equation 2*x + 3 = 7.",
    "Who was the first president of the United States?",
    "Explain the Pythagorean theorem.",
    "What caused the fall of the Roman Empire?",
];

/// Math specialist with the equation solver
pub fn math_tutor() -> Result<AgentConfig> {
    AgentConfig::builder("Math Tutor")
        .instructions(
            "You are a math tutor. Assist students with math problems, providing clear explanations.",
        )
        .handoff_description("Specialist agent for math questions")
        .tool(solve_equation_tool())
        .build()
}

/// History specialist, no tools
pub fn history_tutor() -> Result<AgentConfig> {
    AgentConfig::builder("History Tutor")
        .instructions(
            "You are a history tutor. Provide detailed and accurate information on historical events and figures.",
        )
        .handoff_description("Specialist agent for historical questions")
        .build()
}

/// Routes each question to one of the tutors by handing off
pub fn triage_agent(math: Arc<AgentConfig>, history: Arc<AgentConfig>) -> Result<AgentConfig> {
    AgentConfig::builder("Triage Agent")
        .instructions(
            "You are an AI Tutor Assistant. Determine the subject of the student's question and \
             route it to the appropriate tutor agent: Math Tutor or History Tutor.",
        )
        .handoff(math)
        .handoff(history)
        .build()
}
