//! Scenario orchestration: phase iteration, short-circuiting, reporting.
//!
//! [`ScenarioExecutor`] collects step factories and users at registration
//! time, then [`execute`](ScenarioExecutor::execute)s them as one scenario:
//! Givens, the single When, then Thens, in registration order. Every step is
//! recorded; once any failure occurs, the effects of later steps and
//! assertions are skipped while their presence is still captured for the
//! report. The full report is always rendered; at most one aggregate failure
//! reaches the caller.

use std::sync::Arc;

use futures::future;

use crate::{
    action::{Action, ActionFactory},
    client::Client,
    error::{BoxError, Failure, ScenarioFailure},
    report,
    result::{ScenarioResult, StepAssertion, StepResult, StepType},
    trace::TraceSink,
    transport::{NotFoundTransport, Transport},
    user::User,
};

/// A When-step factory was registered twice for one scenario.
#[derive(Debug)]
pub struct WhenAlreadyRegistered;

impl std::fmt::Display for WhenAlreadyRegistered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a When step was already registered")
    }
}

impl std::error::Error for WhenAlreadyRegistered {}

/// Executes one scenario against an in-process application pipeline.
///
/// Registration methods consume and return `self` so scenarios can be
/// composed by chaining. A single executor instance owns its result tree and
/// short-circuit flag for the duration of one `execute` call; distinct
/// executors may run concurrently provided they do not share a sink.
pub struct ScenarioExecutor {
    givens: Vec<ActionFactory>,
    when: Option<ActionFactory>,
    thens: Vec<ActionFactory>,
    users: Vec<Box<dyn User>>,
    transport: Arc<dyn Transport>,
    sink: Option<TraceSink>,
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self {
            givens: Vec::new(),
            when: None,
            thens: Vec::new(),
            users: Vec::new(),
            transport: Arc::new(NotFoundTransport),
            sink: None,
        }
    }
}

impl ScenarioExecutor {
    /// Construct an executor with no steps, no users, and the fail-fast
    /// 404 transport.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register a Given-step factory. Registration order is execution order.
    #[must_use]
    pub fn given<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn Action>, BoxError> + Send + 'static,
    {
        self.givens.push(Box::new(factory));
        self
    }

    /// Register the single When-step factory.
    ///
    /// # Errors
    ///
    /// Returns [`WhenAlreadyRegistered`] if a When step was registered
    /// before; a scenario has at most one triggering action.
    pub fn when<F>(mut self, factory: F) -> Result<Self, WhenAlreadyRegistered>
    where
        F: FnMut() -> Result<Box<dyn Action>, BoxError> + Send + 'static,
    {
        if self.when.is_some() {
            return Err(WhenAlreadyRegistered);
        }
        self.when = Some(Box::new(factory));
        Ok(self)
    }

    /// Register a Then-step factory. Registration order is execution order.
    #[must_use]
    pub fn then<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn Action>, BoxError> + Send + 'static,
    {
        self.thens.push(Box::new(factory));
        self
    }

    /// Register a user to be bound to a fresh client before any step runs.
    #[must_use]
    pub fn user<U: User + 'static>(mut self, user: U) -> Self {
        self.users.push(Box::new(user));
        self
    }

    /// Install the application pipeline requests are sent through.
    #[must_use]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Attach a diagnostic sink; the rendered report is written to it on
    /// every run, successful or not.
    #[must_use]
    pub fn sink(mut self, sink: TraceSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the scenario.
    ///
    /// Initializes all users, executes every registered step in phase order,
    /// renders the full report, and returns the populated
    /// [`ScenarioResult`].
    ///
    /// # Errors
    ///
    /// Returns a single [`ScenarioFailure`] naming the first failing step
    /// (or the user-initialization error). Later failures are visible only
    /// in the report.
    pub async fn execute(&mut self, scenario_name: &str) -> Result<ScenarioResult, ScenarioFailure> {
        self.initialize_users(scenario_name).await?;

        let mut result = ScenarioResult::new(scenario_name);
        let mut failure_occurred = false;
        let mut step_index = 0usize;

        for factory in &mut self.givens {
            step_index += 1;
            let step =
                execute_step(factory, StepType::Given, step_index, &mut failure_occurred).await;
            result.push_given(step);
        }
        if let Some(factory) = &mut self.when {
            step_index += 1;
            let step =
                execute_step(factory, StepType::When, step_index, &mut failure_occurred).await;
            result.record_when(step);
        }
        for factory in &mut self.thens {
            step_index += 1;
            let step =
                execute_step(factory, StepType::Then, step_index, &mut failure_occurred).await;
            result.push_then(step);
        }

        let rendered = report::render(&result);
        if let Some(sink) = &self.sink {
            sink.write(&rendered);
        }
        tracing::info!(scenario = scenario_name, "scenario report:\n{rendered}");

        let first_failure = result
            .steps()
            .find_map(|step| step.failure_cause().map(|cause| (step, cause)));
        if let Some((step, cause)) = first_failure {
            let failure = ScenarioFailure::Step {
                step_type: step.step_type(),
                step_index: step.step_index(),
                excerpt: report::render_step_excerpt(step),
                cause: Arc::clone(cause),
            };
            tracing::error!(error = %failure, "scenario failed");
            return Err(failure);
        }
        Ok(result)
    }

    /// Bind every registered user to a fresh client, concurrently.
    ///
    /// Initialization has no ordering dependency between users, but all of
    /// it completes before the first Given: this is a synchronization
    /// barrier, not best-effort.
    async fn initialize_users(&mut self, scenario_name: &str) -> Result<(), ScenarioFailure> {
        let transport = &self.transport;
        let initializations = self
            .users
            .iter_mut()
            .map(|user| user.initialize(Client::new(Arc::clone(transport))));
        for outcome in future::join_all(initializations).await {
            outcome.map_err(|cause| ScenarioFailure::Setup {
                scenario: scenario_name.to_owned(),
                cause: Failure::from(cause),
            })?;
        }
        Ok(())
    }
}

/// Execute one step, capturing every failure into the returned result.
///
/// Never fails. The factory always runs; the action's effect and assertion
/// checks are skipped once `failure_occurred` is set, while their presence
/// is still recorded.
async fn execute_step(
    factory: &mut ActionFactory,
    step_type: StepType,
    step_index: usize,
    failure_occurred: &mut bool,
) -> StepResult {
    let mut step = StepResult::new(step_index, step_type);

    let mut action = match factory() {
        Ok(action) => action,
        Err(cause) => {
            *failure_occurred = true;
            step.record_failure(Failure::from(cause));
            return step;
        }
    };
    step.record_message(action.message());

    if *failure_occurred {
        tracing::debug!(step = %step_type, index = step_index, "skipping step effect");
    } else if let Err(cause) = action.execute().await {
        *failure_occurred = true;
        step.record_failure(Failure::from(cause));
    }

    for (position, mut result_action) in action.result_actions().into_iter().enumerate() {
        let mut assertion = StepAssertion::new(position + 1, result_action.message());
        if *failure_occurred {
            tracing::debug!(
                step = %step_type,
                index = step_index,
                assertion = position + 1,
                "skipping assertion"
            );
        } else if let Err(cause) = result_action.assert().await {
            *failure_occurred = true;
            assertion.record_failure(Failure::from(cause));
        }
        step.push_assertion(assertion);
    }
    step
}
