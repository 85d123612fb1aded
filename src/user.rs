//! User collaborator bound to a transport client before steps run.

use async_trait::async_trait;

use crate::{client::Client, error::BoxError};

/// An entity participating in a scenario.
///
/// Each registered user is bound to a fresh [`Client`] exactly once per
/// scenario run, before any step executes. Implementations typically store
/// the client for use by the actions they author.
#[async_trait]
pub trait User: Send {
    /// Bind this user to its transport client.
    ///
    /// # Errors
    ///
    /// Any error aborts the scenario before its first step with a setup
    /// failure.
    async fn initialize(&mut self, client: Client) -> Result<(), BoxError>;
}
