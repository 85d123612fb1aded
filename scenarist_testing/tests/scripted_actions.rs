//! Tests for the scripted spy collaborators themselves.

use scenarist::Action;
use scenarist_testing::{ScriptedAction, ScriptedAssertion};

#[test]
fn clones_share_invocation_counters() {
    let action = ScriptedAction::passing("a step");
    let executions = action.executions();
    executions.increment();
    assert_eq!(action.executions().get(), 1, "handles observe one counter");
}

#[test]
fn result_actions_are_moved_out_once() {
    let mut action = ScriptedAction::passing("a step")
        .with_assertion(ScriptedAssertion::passing("a check"));
    assert_eq!(action.result_actions().len(), 1);
    assert!(
        action.result_actions().is_empty(),
        "assertions are consumed by the first call"
    );
}

#[test]
fn built_copies_keep_the_scripted_message() {
    let action = ScriptedAction::passing("a described step");
    assert_eq!(action.build().message(), "a described step");
}
