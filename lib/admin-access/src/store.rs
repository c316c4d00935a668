//! Document store abstraction for administrator records.
//!
//! Authorization is a single existence check: an account is an
//! administrator if the administrators collection holds a document keyed by
//! its account ID. The portal never writes to the collection.

use crate::error::LookupError;
use crate::session::AuthorizationKey;
use async_trait::async_trait;
use std::sync::Arc;

/// Default name of the administrators collection.
pub const DEFAULT_ADMIN_COLLECTION: &str = "admins";

/// Trait for checking whether an administrator record exists.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    /// Returns true if an administrator record exists for the key.
    async fn lookup_authorization(&self, key: &AuthorizationKey) -> Result<bool, LookupError>;
}

#[async_trait]
impl<T: AuthorizationStore + ?Sized> AuthorizationStore for Arc<T> {
    async fn lookup_authorization(&self, key: &AuthorizationKey) -> Result<bool, LookupError> {
        (**self).lookup_authorization(key).await
    }
}

#[async_trait]
impl<T: AuthorizationStore + ?Sized> AuthorizationStore for Box<T> {
    async fn lookup_authorization(&self, key: &AuthorizationKey) -> Result<bool, LookupError> {
        (**self).lookup_authorization(key).await
    }
}
