//! Polymorphic step actions and their follow-up assertions.
//!
//! Concrete [`Action`] and [`ResultAction`] variants are supplied entirely by
//! external collaborators and are opaque to the engine. Steps register
//! zero-argument *factories* rather than actions so that a step's message and
//! behaviour can be computed from state established by earlier steps.

use async_trait::async_trait;

use crate::error::BoxError;

/// A unit of work executed by one scenario step.
#[async_trait]
pub trait Action: Send {
    /// Human-readable description of the work.
    ///
    /// Called once, after the factory produces the action and before the
    /// effect runs, so implementations may format runtime data into it.
    fn message(&self) -> String;

    /// Perform the action's effect.
    async fn execute(&mut self) -> Result<(), BoxError>;

    /// Follow-up assertions verified after the effect runs, in order.
    ///
    /// The default has no assertions. Implementations may move captured
    /// state out of `self`; the engine calls this exactly once per action.
    fn result_actions(&mut self) -> Vec<Box<dyn ResultAction>> { Vec::new() }
}

/// A single assertion belonging to an [`Action`].
#[async_trait]
pub trait ResultAction: Send {
    /// Human-readable description of the check.
    fn message(&self) -> String;

    /// Verify the assertion.
    async fn assert(&mut self) -> Result<(), BoxError>;
}

/// Zero-argument producer invoked at execution time to obtain a step's
/// action.
///
/// Factories run when their step is reached, not when it is registered, so
/// closures may reference values only known after a prior step executed.
pub type ActionFactory = Box<dyn FnMut() -> Result<Box<dyn Action>, BoxError> + Send>;
