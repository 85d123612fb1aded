//! Result-tree value objects recording per-step outcomes.
//!
//! A scenario run produces one [`ScenarioResult`] holding a [`StepResult`]
//! per executed step, each with zero or more nested [`StepAssertion`]s.
//! Results are mutated only while their step executes and are immutable
//! afterwards.

use crate::error::Failure;

/// Phase a step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepType {
    /// Precondition establishing scenario state.
    Given,
    /// The single triggering action.
    When,
    /// Postcondition verifying the outcome.
    Then,
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        })
    }
}

/// Outcome of one assertion within a step.
#[derive(Debug)]
pub struct StepAssertion {
    index: usize,
    message: String,
    failure: Option<Failure>,
}

impl StepAssertion {
    pub(crate) fn new(index: usize, message: String) -> Self {
        Self {
            index,
            message,
            failure: None,
        }
    }

    pub(crate) fn record_failure(&mut self, failure: Failure) { self.failure = Some(failure); }

    /// 1-based position of this assertion within its step.
    #[must_use]
    pub fn index(&self) -> usize { self.index }

    /// Description of the check.
    #[must_use]
    pub fn message(&self) -> &str { &self.message }

    /// The captured failure, if the assertion was attempted and failed.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> { self.failure.as_ref() }
}

/// Outcome of one executed step.
#[derive(Debug)]
pub struct StepResult {
    step_index: usize,
    step_type: StepType,
    message: Option<String>,
    failure: Option<Failure>,
    assertions: Vec<StepAssertion>,
}

impl StepResult {
    pub(crate) fn new(step_index: usize, step_type: StepType) -> Self {
        Self {
            step_index,
            step_type,
            message: None,
            failure: None,
            assertions: Vec::new(),
        }
    }

    pub(crate) fn record_message(&mut self, message: String) { self.message = Some(message); }

    pub(crate) fn record_failure(&mut self, failure: Failure) { self.failure = Some(failure); }

    pub(crate) fn push_assertion(&mut self, assertion: StepAssertion) {
        self.assertions.push(assertion);
    }

    /// Global 1-based index, monotonic across all phases of one scenario.
    #[must_use]
    pub fn step_index(&self) -> usize { self.step_index }

    /// Phase this step belongs to.
    #[must_use]
    pub fn step_type(&self) -> StepType { self.step_type }

    /// The action's message, absent when the factory itself failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }

    /// The step's own captured failure (factory or effect).
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> { self.failure.as_ref() }

    /// Assertions recorded for this step, attempted or not.
    #[must_use]
    pub fn assertions(&self) -> &[StepAssertion] { &self.assertions }

    /// Whether this step failed, either directly or through an assertion.
    #[must_use]
    pub fn has_failure(&self) -> bool {
        self.failure.is_some() || self.assertions.iter().any(|a| a.failure.is_some())
    }

    /// The first failure recorded on this step: its own, else the first
    /// failing assertion's.
    #[must_use]
    pub fn failure_cause(&self) -> Option<&Failure> {
        self.failure
            .as_ref()
            .or_else(|| self.assertions.iter().find_map(|a| a.failure.as_ref()))
    }
}

/// Aggregated outcomes of one scenario run.
#[derive(Debug)]
pub struct ScenarioResult {
    name: String,
    givens: Vec<StepResult>,
    when: Option<StepResult>,
    thens: Vec<StepResult>,
}

impl ScenarioResult {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            givens: Vec::new(),
            when: None,
            thens: Vec::new(),
        }
    }

    pub(crate) fn push_given(&mut self, step: StepResult) { self.givens.push(step); }

    pub(crate) fn record_when(&mut self, step: StepResult) { self.when = Some(step); }

    pub(crate) fn push_then(&mut self, step: StepResult) { self.thens.push(step); }

    /// Name the scenario was executed under.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Given-step results in execution order.
    #[must_use]
    pub fn givens(&self) -> &[StepResult] { &self.givens }

    /// The When-step result, present iff a When step was registered.
    #[must_use]
    pub fn when(&self) -> Option<&StepResult> { self.when.as_ref() }

    /// Then-step results in execution order.
    #[must_use]
    pub fn thens(&self) -> &[StepResult] { &self.thens }

    /// All step results in phase order: Givens, then When, then Thens.
    pub fn steps(&self) -> impl Iterator<Item = &StepResult> {
        self.givens
            .iter()
            .chain(self.when.as_ref())
            .chain(self.thens.iter())
    }

    /// The first failing step, searched in strict phase order.
    #[must_use]
    pub fn first_failure(&self) -> Option<&StepResult> {
        self.steps().find(|step| step.has_failure())
    }
}
