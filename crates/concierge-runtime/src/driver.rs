//! Query driver
//!
//! Feeds a fixed list of queries through one agent, strictly in order, and
//! writes each query and its answer (or error) to an output sink.

use concierge_core::{Agent, Context, Error, Result};
use concierge_utils::{FailureMode, Settings};
use std::io::Write;
use std::time::Duration;
use tracing::{error, info};

/// Progress of a driver through its batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No query has been submitted yet
    NotStarted,
    /// The query at this index is in flight
    Running(usize),
    /// The batch finished (or was aborted in fail-fast mode)
    Done,
}

/// Summary of a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverReport {
    /// Queries that produced a response
    pub completed: usize,
    /// Queries that failed or timed out
    pub failed: usize,
}

/// Runs a batch of queries through an agent
///
/// Output for each query is a `Query: ...` line followed by either
/// `Response: ...` or `Error: ...`, then the separator line when one is set.
///
/// # Example
///
/// ```no_run
/// use concierge_runtime::QueryDriver;
///
/// # async fn example(agent: &dyn concierge_core::Agent) -> concierge_core::Result<()> {
/// let mut driver = QueryDriver::new(["How much is '1984'?"]);
/// let mut stdout = std::io::stdout().lock();
/// let report = driver.run(agent, &mut stdout).await?;
/// assert_eq!(report.completed + report.failed, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueryDriver {
    queries: Vec<String>,
    timeout: Option<Duration>,
    failure_mode: FailureMode,
    separator: Option<String>,
    state: DriverState,
}

impl QueryDriver {
    /// Create a driver for the given queries
    pub fn new<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: queries.into_iter().map(Into::into).collect(),
            timeout: None,
            failure_mode: FailureMode::default(),
            separator: None,
            state: DriverState::NotStarted,
        }
    }

    /// Apply the query timeout and failure mode from startup settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.timeout = settings.query_timeout;
        self.failure_mode = settings.failure_mode;
        self
    }

    /// Bound each query by a timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Choose what happens after a failed query
    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    /// Print this line after every query/answer pair
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Queries in submission order
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Current state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Submit every query in order and write the transcript to `out`
    ///
    /// In [`FailureMode::Isolate`] a failed query is reported and the batch
    /// continues. In [`FailureMode::FailFast`] the first failure stops the
    /// batch and is returned. Errors writing to `out` always stop the batch.
    pub async fn run<W: Write>(&mut self, agent: &dyn Agent, out: &mut W) -> Result<DriverReport> {
        let mut report = DriverReport::default();
        let queries = self.queries.clone();

        for (index, query) in queries.into_iter().enumerate() {
            self.state = DriverState::Running(index);
            writeln!(out, "Query: {query}")?;

            let mut context = Context::new().with_query_index(index);
            match self.submit(agent, query, &mut context).await {
                Ok(response) => {
                    report.completed += 1;
                    let (input_tokens, output_tokens) = context.usage();
                    info!(
                        query_index = index,
                        agent = %context.last_agent().unwrap_or(agent.name()),
                        turns = context.turns().unwrap_or(0),
                        input_tokens,
                        output_tokens,
                        "Query completed"
                    );
                    writeln!(out, "Response: {response}")?;
                }
                Err(e) => {
                    report.failed += 1;
                    error!(query_index = index, agent = %agent.name(), error = %e, "Query failed");
                    writeln!(out, "Error: {e}")?;

                    if self.failure_mode == FailureMode::FailFast {
                        self.write_separator(out)?;
                        out.flush()?;
                        self.state = DriverState::Done;
                        return Err(e);
                    }
                }
            }

            self.write_separator(out)?;
            out.flush()?;
        }

        self.state = DriverState::Done;
        info!(
            completed = report.completed,
            failed = report.failed,
            "Batch finished"
        );
        Ok(report)
    }

    async fn submit(&self, agent: &dyn Agent, query: String, context: &mut Context) -> Result<String> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, agent.process(query, context))
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => agent.process(query, context).await,
        }
    }

    fn write_separator<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(separator) = &self.separator {
            writeln!(out, "{separator}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers with the query text, failing on queries containing "boom"
    struct Echo {
        calls: AtomicUsize,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Agent for Echo {
        async fn process(&self, input: String, context: &mut Context) -> Result<String> {
            let seen = self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(context.query_index(), Some(seen));
            assert!(context.last_agent().is_none());
            context.set_last_agent("Echo");

            if input.contains("boom") {
                return Err(Error::ProcessingFailed("model unreachable".to_string()));
            }
            Ok(format!("echo: {input}"))
        }

        fn name(&self) -> &str {
            "Echo"
        }
    }

    struct Slow;

    #[async_trait]
    impl Agent for Slow {
        async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
            if input == "slow" {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(input)
        }

        fn name(&self) -> &str {
            "Slow"
        }
    }

    fn transcript(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_answers_in_order() {
        let mut driver = QueryDriver::new(["first", "second", "third"]);
        assert_eq!(driver.state(), DriverState::NotStarted);

        let mut out = Vec::new();
        let report = driver.run(&Echo::new(), &mut out).await.unwrap();

        assert_eq!(report, DriverReport { completed: 3, failed: 0 });
        assert_eq!(driver.state(), DriverState::Done);
        assert_eq!(
            transcript(out),
            "Query: first\nResponse: echo: first\n\
             Query: second\nResponse: echo: second\n\
             Query: third\nResponse: echo: third\n"
        );
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let mut driver = QueryDriver::new(["one", "boom", "three"]);
        let mut out = Vec::new();
        let report = driver.run(&Echo::new(), &mut out).await.unwrap();

        assert_eq!(report, DriverReport { completed: 2, failed: 1 });
        assert_eq!(
            transcript(out),
            "Query: one\nResponse: echo: one\n\
             Query: boom\nError: Agent processing failed: model unreachable\n\
             Query: three\nResponse: echo: three\n"
        );
    }

    #[tokio::test]
    async fn test_fail_fast_stops_batch() {
        let mut driver =
            QueryDriver::new(["one", "boom", "three"]).with_failure_mode(FailureMode::FailFast);
        let mut out = Vec::new();
        let err = driver.run(&Echo::new(), &mut out).await.unwrap_err();

        assert!(matches!(err, Error::ProcessingFailed(_)));
        assert_eq!(driver.state(), DriverState::Done);
        let text = transcript(out);
        assert!(text.ends_with("Query: boom\nError: Agent processing failed: model unreachable\n"));
        assert!(!text.contains("three"));
    }

    #[tokio::test]
    async fn test_separator_follows_each_pair() {
        let separator = "-".repeat(50);
        let mut driver = QueryDriver::new(["a", "b"]).with_separator(separator.clone());
        let mut out = Vec::new();
        driver.run(&Echo::new(), &mut out).await.unwrap();

        let text = transcript(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], separator);
        assert_eq!(lines[5], separator);
    }

    #[tokio::test]
    async fn test_timeout_reported_per_query() {
        let mut driver =
            QueryDriver::new(["fast", "slow", "after"]).with_timeout(Duration::from_millis(50));
        let mut out = Vec::new();
        let report = driver.run(&Slow, &mut out).await.unwrap();

        assert_eq!(report, DriverReport { completed: 2, failed: 1 });
        let text = transcript(out);
        assert!(text.contains("Query: slow\nError: Timed out after 50ms\n"));
        assert!(text.ends_with("Query: after\nResponse: after\n"));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let mut driver = QueryDriver::new(Vec::<String>::new());
        let mut out = Vec::new();
        let report = driver.run(&Echo::new(), &mut out).await.unwrap();
        assert_eq!(report, DriverReport::default());
        assert_eq!(driver.state(), DriverState::Done);
        assert!(out.is_empty());
    }

    #[test]
    fn test_with_settings() {
        let settings = Settings::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "CONCIERGE_QUERY_TIMEOUT_SECS" => Some("30".to_string()),
            "CONCIERGE_FAIL_FAST" => Some("true".to_string()),
            _ => None,
        })
        .unwrap();

        let driver = QueryDriver::new(["q"]).with_settings(&settings);
        assert_eq!(driver.timeout, Some(Duration::from_secs(30)));
        assert_eq!(driver.failure_mode, FailureMode::FailFast);
        assert_eq!(driver.queries(), ["q".to_string()]);
    }
}
