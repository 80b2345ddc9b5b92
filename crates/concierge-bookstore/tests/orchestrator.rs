//! End-to-end runs of the bookstore agents against a scripted model

use concierge_bookstore::{bookstore_assistant, bookstore_orchestrator};
use concierge_runtime::testing::{ScriptedProvider, answer, calls, last_tool_result};
use concierge_runtime::{QueryDriver, RunConfig, Runner};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn assistant_uses_catalog_tools() {
    let script = Arc::new(ScriptedProvider::new(vec![
        calls(&[("c1", "get_book_price", json!({ "title": "1984" }))]),
        answer("'1984' costs $10.99."),
    ]));
    let runner = Runner::new(script.clone(), RunConfig::default().with_model("gpt-4o-mini"));
    let assistant = runner.bind(Arc::new(bookstore_assistant().unwrap()));

    let mut out = Vec::new();
    let report = QueryDriver::new(["How much is '1984'?"])
        .run(&assistant, &mut out)
        .await
        .unwrap();
    assert_eq!(report.completed, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Query: How much is '1984'?\nResponse: '1984' costs $10.99.\n"
    );

    let requests = script.requests();
    assert_eq!(requests[0].model, "gpt-4o");
    assert_eq!(last_tool_result(&requests[1]).as_deref(), Some("$10.99 (fiction)"));
}

#[tokio::test]
async fn orchestrator_delegates_then_taxes() {
    let script = Arc::new(ScriptedProvider::new(vec![
        // orchestrator -> assistant
        calls(&[(
            "o1",
            "bookstore_assistant",
            json!({ "input": "Prices of 'Atomic Habits' and 'Sapiens'" }),
        )]),
        // assistant looks up one price and answers
        calls(&[("a1", "get_book_price", json!({ "title": "Atomic Habits" }))]),
        answer("Atomic Habits is $16.25 and Sapiens is $14.99."),
        // orchestrator computes tax on the sum
        calls(&[("o2", "calculate_tax", json!({ "order_total": 31.24 }))]),
        answer("With tax the total is $33.74."),
    ]));
    let runner = Runner::new(script.clone(), RunConfig::default());
    let assistant = Arc::new(bookstore_assistant().unwrap());
    let orchestrator = bookstore_orchestrator(&runner, assistant).unwrap();
    assert_eq!(
        orchestrator.tools().names(),
        vec!["bookstore_assistant", "calculate_tax"]
    );

    let result = runner
        .run(&orchestrator, "How much is 'Atomic Habits' and 'Sapiens' with tax?")
        .await
        .unwrap();
    assert_eq!(result.final_output, "With tax the total is $33.74.");
    assert_eq!(result.last_agent, "Bookstore Orchestrator");
    assert_eq!(result.tool_calls, 2);

    let requests = script.requests();
    assert_eq!(requests.len(), 5);
    assert_eq!(
        last_tool_result(&requests[2]).as_deref(),
        Some("$16.25 (non_fiction)")
    );
    assert_eq!(
        last_tool_result(&requests[3]).as_deref(),
        Some("Atomic Habits is $16.25 and Sapiens is $14.99.")
    );
    assert_eq!(
        last_tool_result(&requests[4]).as_deref(),
        Some("Tax: $2.50, Total with Tax: $33.74")
    );
}
