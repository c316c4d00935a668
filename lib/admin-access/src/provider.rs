//! Identity provider abstraction.
//!
//! The identity provider verifies email/password pairs, issues sessions and
//! signs them out. The provider keeps the current session as client-side
//! state, the way browser SDKs do; `revoke_session` clears it.

use crate::credentials::Credentials;
use crate::error::{AuthenticationError, RevocationError};
use crate::session::Session;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for verifying credentials and managing the resulting session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies the credentials and returns the new current session.
    ///
    /// Rejections carry the provider's error code.
    async fn authenticate(&self, credentials: &Credentials)
    -> Result<Session, AuthenticationError>;

    /// Signs out the current session.
    ///
    /// Idempotent: signing out with no current session succeeds.
    async fn revoke_session(&self) -> Result<(), RevocationError>;

    /// Returns the current session, if one is active.
    fn current_session(&self) -> Option<Session>;
}

#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for Arc<T> {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, AuthenticationError> {
        (**self).authenticate(credentials).await
    }

    async fn revoke_session(&self) -> Result<(), RevocationError> {
        (**self).revoke_session().await
    }

    fn current_session(&self) -> Option<Session> {
        (**self).current_session()
    }
}

#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for Box<T> {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, AuthenticationError> {
        (**self).authenticate(credentials).await
    }

    async fn revoke_session(&self) -> Result<(), RevocationError> {
        (**self).revoke_session().await
    }

    fn current_session(&self) -> Option<Session> {
        (**self).current_session()
    }
}
