//! Canonical error and result types for the crate.
//!
//! This module defines the single public `ScenarioFailure` surface raised by
//! [`crate::executor::ScenarioExecutor::execute`], plus the shared aliases
//! used to carry collaborator failures through the result tree.

use std::sync::Arc;

use crate::result::StepType;

/// Boxed error returned by collaborator effects (factories, actions,
/// assertions, users, and transports).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared handle to a captured collaborator failure.
///
/// A failure is stored on the result object where it occurred and referenced
/// again by the aggregate [`ScenarioFailure`], so it is reference counted
/// rather than cloned.
pub type Failure = Arc<dyn std::error::Error + Send + Sync>;

/// The single failure surfaced by a scenario run.
///
/// `ScenarioFailure` distinguishes setup-time user-initialization errors from
/// step failures discovered while the scenario ran. Step failures name only
/// the *first* failing step; later failures remain visible in the full
/// report.
#[derive(Debug, Clone)]
pub enum ScenarioFailure {
    /// A registered user could not be bound to its transport client; no
    /// steps were attempted.
    Setup {
        /// Name of the scenario that failed to start.
        scenario: String,
        /// The underlying initialization error.
        cause: Failure,
    },
    /// A step (or one of its assertions) failed.
    Step {
        /// Phase of the first failing step.
        step_type: StepType,
        /// Global index of the first failing step.
        step_index: usize,
        /// Rendered report excerpt for the failing step.
        excerpt: String,
        /// The underlying failure captured on the step or assertion.
        cause: Failure,
    },
}

impl ScenarioFailure {
    /// The underlying collaborator failure.
    #[must_use]
    pub fn cause(&self) -> &Failure {
        match self {
            Self::Setup { cause, .. } | Self::Step { cause, .. } => cause,
        }
    }
}

impl std::fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup { scenario, cause } => {
                write!(
                    f,
                    "scenario '{scenario}' failed during user initialization: {cause}"
                )
            }
            Self::Step {
                step_type,
                step_index,
                excerpt,
                cause,
            } => {
                writeln!(f, "{step_type} step {step_index} failed:")?;
                writeln!(f, "{excerpt}")?;
                write!(f, "caused by: {cause}")
            }
        }
    }
}

impl std::error::Error for ScenarioFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Setup { cause, .. } | Self::Step { cause, .. } => {
                Some(cause.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}
