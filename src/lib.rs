//! Public API for the `scenarist` library.
//!
//! This crate provides a scenario-execution engine for behaviour-driven
//! tests of request/response style applications: ordered Given/When/Then
//! phases, per-step outcome recording with nested assertions, failure
//! short-circuiting, and deterministic report rendering. Request transport,
//! users, and concrete actions are pluggable collaborators behind narrow
//! trait interfaces.

pub mod action;
pub mod client;
pub mod error;
pub mod executor;
pub mod report;
pub mod result;
pub mod trace;
pub mod transport;
pub mod user;

pub use action::{Action, ActionFactory, ResultAction};
pub use client::{Client, ClientError};
pub use error::{BoxError, Failure, ScenarioFailure};
pub use executor::{ScenarioExecutor, WhenAlreadyRegistered};
pub use report::render;
pub use result::{ScenarioResult, StepAssertion, StepResult, StepType};
pub use trace::TraceSink;
pub use transport::{NotFoundTransport, Request, Response, Transport};
pub use user::User;
