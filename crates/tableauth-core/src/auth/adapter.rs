//! The capability interface of authentication adapters

use super::{AuthenticationResult, Error};
use async_trait::async_trait;
use std::fmt::Debug;

/// Defines the requirements for authentication adapters.
///
/// An adapter holds the identity and credential of the attempt it is about to make, which is why
/// [`authenticate`](Adapter::authenticate) takes `&mut self`. Sharing one adapter between
/// concurrent attempts therefore needs external serialization; the usual approach is one adapter
/// per attempt.
#[async_trait]
pub trait Adapter: Send + Debug {
    /// Sets the identity (for instance a username or email address) to look up.
    fn set_identity(&mut self, identity: impl Into<String>) -> &mut Self
    where
        Self: Sized;

    /// Sets the credential (for instance a password) to check.
    fn set_credential(&mut self, credential: impl Into<String>) -> &mut Self
    where
        Self: Sized;

    /// Attempts an authentication with the identity and credential set before.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the attempt cannot be answered: the adapter is not fully
    /// configured or the lookup query failed. Failed logins are not errors; they are reported
    /// through the returned [`AuthenticationResult`].
    async fn authenticate(&mut self) -> Result<AuthenticationResult, Error>;
}
