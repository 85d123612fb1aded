//! Scripted spy actions, assertions, and users.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use scenarist::{Action, BoxError, Client, ResultAction, User};

/// Shared invocation counter for spy collaborators.
#[derive(Clone, Debug, Default)]
pub struct CallCount(Arc<AtomicUsize>);

impl CallCount {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn increment(&self) { self.0.fetch_add(1, Ordering::SeqCst); }

    #[must_use]
    pub fn get(&self) -> usize { self.0.load(Ordering::SeqCst) }
}

/// An assertion whose message and outcome are scripted up front.
///
/// `checks` increments each time `assert` is actually invoked, letting tests
/// distinguish attempted assertions from recorded-but-skipped ones.
#[derive(Clone)]
pub struct ScriptedAssertion {
    message: String,
    outcome: Result<(), String>,
    checks: CallCount,
}

impl ScriptedAssertion {
    /// An assertion that passes.
    #[must_use]
    pub fn passing(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            outcome: Ok(()),
            checks: CallCount::new(),
        }
    }

    /// An assertion that fails with `error`.
    #[must_use]
    pub fn failing(message: &str, error: &str) -> Self {
        Self {
            message: message.to_owned(),
            outcome: Err(error.to_owned()),
            checks: CallCount::new(),
        }
    }

    /// Counter incremented on every attempted check.
    #[must_use]
    pub fn checks(&self) -> CallCount { self.checks.clone() }
}

#[async_trait]
impl ResultAction for ScriptedAssertion {
    fn message(&self) -> String { self.message.clone() }

    async fn assert(&mut self) -> Result<(), BoxError> {
        self.checks.increment();
        self.outcome.clone().map_err(BoxError::from)
    }
}

/// An action whose message, outcome, and assertions are scripted up front.
#[derive(Clone)]
pub struct ScriptedAction {
    message: String,
    outcome: Result<(), String>,
    executions: CallCount,
    assertions: Vec<ScriptedAssertion>,
}

impl ScriptedAction {
    /// An action whose effect succeeds.
    #[must_use]
    pub fn passing(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            outcome: Ok(()),
            executions: CallCount::new(),
            assertions: Vec::new(),
        }
    }

    /// An action whose effect fails with `error`.
    #[must_use]
    pub fn failing(message: &str, error: &str) -> Self {
        Self {
            outcome: Err(error.to_owned()),
            ..Self::passing(message)
        }
    }

    /// Append a follow-up assertion.
    #[must_use]
    pub fn with_assertion(mut self, assertion: ScriptedAssertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Counter incremented on every attempted effect.
    #[must_use]
    pub fn executions(&self) -> CallCount { self.executions.clone() }

    /// Box a fresh copy, as an action factory would produce it.
    ///
    /// Clones share the same counters, so a factory written as
    /// `move || Ok(action.build())` still reports invocations to the test.
    #[must_use]
    pub fn build(&self) -> Box<dyn Action> { Box::new(self.clone()) }
}

#[async_trait]
impl Action for ScriptedAction {
    fn message(&self) -> String { self.message.clone() }

    async fn execute(&mut self) -> Result<(), BoxError> {
        self.executions.increment();
        self.outcome.clone().map_err(BoxError::from)
    }

    fn result_actions(&mut self) -> Vec<Box<dyn ResultAction>> {
        std::mem::take(&mut self.assertions)
            .into_iter()
            .map(|assertion| Box::new(assertion) as Box<dyn ResultAction>)
            .collect()
    }
}

/// A user that records its initialization and keeps the client it was bound
/// to, shared with the test through an `Arc`.
#[derive(Clone, Default)]
pub struct RecordingUser {
    initializations: CallCount,
    client: Arc<std::sync::Mutex<Option<Arc<Client>>>>,
    failure: Option<String>,
}

impl RecordingUser {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A user whose initialization fails with `error`.
    #[must_use]
    pub fn failing(error: &str) -> Self {
        Self {
            failure: Some(error.to_owned()),
            ..Self::default()
        }
    }

    /// Counter incremented each time the engine initializes this user.
    #[must_use]
    pub fn initializations(&self) -> CallCount { self.initializations.clone() }

    /// The client this user was bound to, if initialization ran.
    #[must_use]
    pub fn client(&self) -> Option<Arc<Client>> {
        self.client.lock().expect("client slot poisoned").clone()
    }
}

#[async_trait]
impl User for RecordingUser {
    async fn initialize(&mut self, client: Client) -> Result<(), BoxError> {
        self.initializations.increment();
        *self.client.lock().expect("client slot poisoned") = Some(Arc::new(client));
        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }
}
