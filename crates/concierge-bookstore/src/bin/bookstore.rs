//! Bookstore demo CLI
//!
//! Runs the Bookstore Assistant and then the Bookstore Orchestrator over
//! their fixed query batches and prints each query with its answer.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export OPENAI_API_KEY="sk-..."
//!
//! # Run the demo
//! cargo run --bin bookstore -p concierge-bookstore
//! ```

use clap::Parser;
use concierge_bookstore::{
    ASSISTANT_QUERIES, ORCHESTRATOR_QUERIES, bookstore_assistant, bookstore_orchestrator,
};
use concierge_llm::providers::{OpenAIConfig, OpenAIProvider};
use concierge_runtime::{QueryDriver, RunConfig, Runner};
use concierge_utils::{Settings, init_tracing_with_default};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Bookstore assistant and orchestrator demo
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();
    init_tracing_with_default("warn,concierge_bookstore=info,concierge_runtime=info");

    let settings = Settings::from_env()?;
    info!(?settings, "Loaded settings");

    let provider = OpenAIProvider::with_config(
        OpenAIConfig::new(settings.api_key.clone())
            .with_api_base(settings.api_base.clone())
            .with_timeout(settings.request_timeout),
    )?;
    let runner = Runner::new(Arc::new(provider), RunConfig::from_settings(&settings));

    let assistant = Arc::new(bookstore_assistant()?);
    let orchestrator = Arc::new(bookstore_orchestrator(&runner, assistant.clone())?);

    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "===== Running Bookstore Agent =====")?;
    QueryDriver::new(ASSISTANT_QUERIES)
        .with_settings(&settings)
        .run(&runner.bind(assistant), &mut stdout)
        .await?;

    writeln!(stdout, "\n===== Running Orchestrator Agent =====")?;
    QueryDriver::new(ORCHESTRATOR_QUERIES)
        .with_settings(&settings)
        .run(&runner.bind(orchestrator), &mut stdout)
        .await?;

    Ok(())
}
