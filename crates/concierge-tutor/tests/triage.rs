//! Triage handoffs against a scripted model

use concierge_runtime::testing::{
    ScriptedProvider, answer, calls, last_tool_result, offered_tools,
};
use concierge_runtime::{QueryDriver, RunConfig, Runner};
use concierge_tutor::{SEPARATOR_WIDTH, history_tutor, math_tutor, triage_agent};
use serde_json::json;
use std::sync::Arc;

fn runner(script: &Arc<ScriptedProvider>) -> Runner {
    Runner::new(script.clone(), RunConfig::default())
}

#[tokio::test]
async fn math_question_reaches_equation_solver() {
    let script = Arc::new(ScriptedProvider::new(vec![
        calls(&[("t1", "transfer_to_math_tutor", json!({}))]),
        calls(&[("m1", "solve_equation", json!({ "equation": "2*x + 3 = 7" }))]),
        answer("Subtract 3 and divide by 2: x = 2."),
    ]));
    let triage = triage_agent(
        Arc::new(math_tutor().unwrap()),
        Arc::new(history_tutor().unwrap()),
    )
    .unwrap();

    let result = runner(&script)
        .run(&triage, "Solve the equation 2*x + 3 = 7.")
        .await
        .unwrap();
    assert_eq!(result.last_agent, "Math Tutor");
    assert_eq!(result.handoffs, vec!["Math Tutor"]);
    assert_eq!(result.final_output, "Subtract 3 and divide by 2: x = 2.");

    let requests = script.requests();
    assert_eq!(
        offered_tools(&requests[0]),
        vec!["transfer_to_math_tutor", "transfer_to_history_tutor"]
    );
    assert_eq!(offered_tools(&requests[1]), vec!["solve_equation"]);
    assert_eq!(
        last_tool_result(&requests[2]).as_deref(),
        Some("The solution to the equation 2*x + 3 = 7 is x = 2")
    );
}

#[tokio::test]
async fn session_prints_separated_pairs() {
    let script = Arc::new(ScriptedProvider::new(vec![
        calls(&[("t1", "transfer_to_history_tutor", json!({}))]),
        answer("George Washington."),
        calls(&[("t2", "transfer_to_history_tutor", json!({}))]),
        answer("Many causes, internal and external."),
    ]));
    let triage = triage_agent(
        Arc::new(math_tutor().unwrap()),
        Arc::new(history_tutor().unwrap()),
    )
    .unwrap();
    let agent = runner(&script).bind(Arc::new(triage));
    let separator = "-".repeat(SEPARATOR_WIDTH);

    let mut out = Vec::new();
    let report = QueryDriver::new([
        "Who was the first president of the United States?",
        "What caused the fall of the Roman Empire?",
    ])
    .with_separator(separator.clone())
    .run(&agent, &mut out)
    .await
    .unwrap();
    assert_eq!(report.completed, 2);

    let expected = format!(
        "Query: Who was the first president of the United States?\n\
         Response: George Washington.\n\
         {separator}\n\
         Query: What caused the fall of the Roman Empire?\n\
         Response: Many causes, internal and external.\n\
         {separator}\n"
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);

    // each query starts over at the triage agent
    let requests = script.requests();
    assert_eq!(requests[2].messages.len(), 1);
    assert_eq!(offered_tools(&requests[2]).len(), 2);
}
