//! Tests for the deterministic report renderer.

use scenarist::{ScenarioExecutor, TraceSink};
use scenarist_testing::{ScriptedAction, ScriptedAssertion};

#[tokio::test]
async fn rendering_is_idempotent() {
    let given = ScriptedAction::passing("a seeded database");
    let when = ScriptedAction::passing("querying the index")
        .with_assertion(ScriptedAssertion::passing("one row returned"));

    let mut executor = ScenarioExecutor::new()
        .given(move || Ok(given.build()))
        .when(move || Ok(when.build()))
        .expect("single when");

    let result = executor.execute("idempotent").await.expect("scenario passes");
    let first = scenarist::render(&result);
    let second = scenarist::render(&result);
    assert_eq!(first, second, "same result must render byte-identically");
}

#[tokio::test]
async fn phase_labels_appear_only_for_populated_phases() {
    let when = ScriptedAction::passing("the trigger");
    let mut executor = ScenarioExecutor::new()
        .when(move || Ok(when.build()))
        .expect("single when");

    let result = executor.execute("when only").await.expect("scenario passes");
    let report = scenarist::render(&result);
    assert!(report.contains("When:\n"));
    assert!(!report.contains("Given:"));
    assert!(!report.contains("Then:"));
}

#[tokio::test]
async fn multi_line_messages_keep_block_indentation() {
    let given = ScriptedAction::passing("first line\nsecond line");
    let mut executor = ScenarioExecutor::new().given(move || Ok(given.build()));

    let result = executor.execute("multi line").await.expect("scenario passes");
    let report = scenarist::render(&result);
    assert!(
        report.contains("    Given 1: first line\n    second line\n"),
        "continuation line must align under the step block:\n{report}"
    );
}

#[tokio::test]
async fn multi_line_failure_message_is_re_indented_under_the_mark() {
    let given = ScriptedAction::failing("request summary\nstatus: 500", "server error");
    let sink = TraceSink::new();
    let mut executor = ScenarioExecutor::new()
        .sink(sink.clone())
        .given(move || Ok(given.build()));

    executor.execute("multi line failure").await.expect_err("scenario fails");

    let report = sink.drain().join("\n");
    assert!(
        report.contains("  ! Given 1: request summary\n    status: 500"),
        "continuation line must align under the failed step:\n{report}"
    );
}

#[tokio::test]
async fn failed_step_notes_that_exception_detail_follows() {
    let given = ScriptedAction::failing("a broken fixture", "boom");
    let sink = TraceSink::new();
    let mut executor = ScenarioExecutor::new()
        .sink(sink.clone())
        .given(move || Ok(given.build()));

    executor.execute("detail note").await.expect_err("scenario fails");

    let report = sink.drain().join("\n");
    assert!(report.contains("(exception detail follows in the scenario failure)"));
}

#[tokio::test]
async fn assertions_are_numbered_step_dot_assertion() {
    let when = ScriptedAction::passing("the trigger")
        .with_assertion(ScriptedAssertion::passing("first check"))
        .with_assertion(ScriptedAssertion::passing("second check"));
    let given = ScriptedAction::passing("a precondition");

    let mut executor = ScenarioExecutor::new()
        .given(move || Ok(given.build()))
        .when(move || Ok(when.build()))
        .expect("single when");

    let result = executor.execute("numbering").await.expect("scenario passes");
    let report = scenarist::render(&result);
    assert!(report.contains("      Assertions:\n"));
    assert!(report.contains("        2.1: first check\n"));
    assert!(report.contains("        2.2: second check\n"));
}
