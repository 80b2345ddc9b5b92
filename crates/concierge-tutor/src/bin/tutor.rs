//! Tutor demo CLI
//!
//! Submits a fixed set of student questions to the Triage Agent, which hands
//! each one off to the Math Tutor or the History Tutor.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! cargo run --bin tutor -p concierge-tutor
//! ```

use clap::Parser;
use concierge_llm::providers::{OpenAIConfig, OpenAIProvider};
use concierge_runtime::{QueryDriver, RunConfig, Runner};
use concierge_tutor::{SEPARATOR_WIDTH, TUTOR_QUERIES, history_tutor, math_tutor, triage_agent};
use concierge_utils::{Settings, init_tracing_with_default};
use std::sync::Arc;
use tracing::info;

/// Tutor triage demo with math and history handoffs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();
    init_tracing_with_default("warn,concierge_tutor=info,concierge_runtime=info");

    let settings = Settings::from_env()?;
    info!(?settings, "Loaded settings");

    let provider = OpenAIProvider::with_config(
        OpenAIConfig::new(settings.api_key.clone())
            .with_api_base(settings.api_base.clone())
            .with_timeout(settings.request_timeout),
    )?;
    let runner = Runner::new(Arc::new(provider), RunConfig::from_settings(&settings));

    let triage = triage_agent(Arc::new(math_tutor()?), Arc::new(history_tutor()?))?;
    let agent = runner.bind(Arc::new(triage));

    let mut stdout = std::io::stdout().lock();
    let report = QueryDriver::new(TUTOR_QUERIES)
        .with_settings(&settings)
        .with_separator("-".repeat(SEPARATOR_WIDTH))
        .run(&agent, &mut stdout)
        .await?;
    info!(completed = report.completed, failed = report.failed, "Tutor session finished");

    Ok(())
}
