//! Deterministic textual rendering of a [`ScenarioResult`].
//!
//! Rendering is a pure function of the result tree: the same input always
//! produces byte-identical output, and rendering never fails. Failed steps
//! and assertions carry a leading `!` mark; steps skipped after an earlier
//! failure render unmarked, with whatever was captured before the
//! short-circuit flag was raised.

use crate::result::{ScenarioResult, StepAssertion, StepResult};

/// Fixed-width separator framing the report header.
const SEPARATOR: &str = "============================================================";

/// Placeholder rendered when a step recorded no message.
const NO_MESSAGE: &str = "<no message>";

const STEP_INDENT: &str = "    ";
const STEP_FAILURE_PREFIX: &str = "  ! ";
const ASSERTION_LABEL_INDENT: &str = "      ";
const ASSERTION_INDENT: &str = "        ";
const ASSERTION_FAILURE_PREFIX: &str = "      ! ";

/// Render the full report for a scenario run.
#[must_use]
pub fn render(result: &ScenarioResult) -> String {
    let mut out = String::new();
    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str("Scenario: ");
    out.push_str(result.name());
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');

    render_phase(&mut out, "Given:", result.givens());
    if let Some(when) = result.when() {
        render_phase(&mut out, "When:", std::slice::from_ref(when));
    }
    render_phase(&mut out, "Then:", result.thens());
    out
}

/// Render one step's block on its own, used as the failure excerpt in the
/// aggregate [`crate::ScenarioFailure`].
#[must_use]
pub(crate) fn render_step_excerpt(step: &StepResult) -> String {
    let mut out = String::new();
    render_step(&mut out, step);
    // The excerpt is embedded into a single failure message; drop the
    // trailing newline so callers control line breaks.
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn render_phase(out: &mut String, label: &str, steps: &[StepResult]) {
    if steps.is_empty() {
        return;
    }
    out.push_str(label);
    out.push('\n');
    for step in steps {
        render_step(out, step);
    }
}

fn render_step(out: &mut String, step: &StepResult) {
    let label = format!("{} {}", step.step_type(), step.step_index());
    if step.failure().is_some() {
        out.push_str(STEP_FAILURE_PREFIX);
        out.push_str(&label);
        out.push_str(": ");
        out.push_str(&formatted(step.message(), STEP_INDENT));
        out.push('\n');
    } else if let Some(message) = step.message() {
        out.push_str(STEP_INDENT);
        out.push_str(&label);
        out.push_str(": ");
        out.push_str(&formatted(Some(message), STEP_INDENT));
        out.push('\n');
    }

    if !step.assertions().is_empty() {
        out.push_str(ASSERTION_LABEL_INDENT);
        out.push_str("Assertions:\n");
        for assertion in step.assertions() {
            render_assertion(out, step.step_index(), assertion);
        }
    }

    if step.failure().is_some() {
        out.push_str(ASSERTION_LABEL_INDENT);
        out.push_str("(exception detail follows in the scenario failure)\n");
    }
}

fn render_assertion(out: &mut String, step_index: usize, assertion: &StepAssertion) {
    if assertion.failure().is_some() {
        out.push_str(ASSERTION_FAILURE_PREFIX);
    } else {
        out.push_str(ASSERTION_INDENT);
    }
    out.push_str(&format!("{step_index}.{}: ", assertion.index()));
    out.push_str(&formatted(Some(assertion.message()), ASSERTION_INDENT));
    out.push('\n');
}

/// Format a possibly absent, possibly multi-line message.
///
/// Continuation lines are prefixed with the surrounding block's indentation
/// so multi-line messages stay visually nested.
fn formatted(message: Option<&str>, indent: &str) -> String {
    let text = message.unwrap_or(NO_MESSAGE);
    if text.contains('\n') {
        let continuation = format!("\n{indent}");
        text.replace('\n', &continuation)
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::formatted;

    #[test]
    fn absent_message_renders_placeholder() {
        assert_eq!(formatted(None, "  "), "<no message>");
    }

    #[test]
    fn continuation_lines_inherit_indentation() {
        assert_eq!(formatted(Some("a\nb\nc"), "    "), "a\n    b\n    c");
    }
}
