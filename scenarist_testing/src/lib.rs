//! Shared collaborators for exercising the `scenarist` engine in tests.
//!
//! [`ScriptedAction`] and [`ScriptedAssertion`] are spy implementations of
//! the engine's action traits: their messages and outcomes are scripted up
//! front and their invocation counts are observable, so tests can verify
//! which effects actually ran. [`log_capture`] drains the global log stream
//! so tests can search the records the engine emitted.

pub mod actions;
pub mod logging;

pub use actions::{CallCount, RecordingUser, ScriptedAction, ScriptedAssertion};
pub use logging::{LogCapture, log_capture};
