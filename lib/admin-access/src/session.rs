//! Sessions issued by the identity provider.
//!
//! A session is the provider's handle for an authenticated account. The
//! provider owns it; the login controller only borrows a copy long enough to
//! derive the authorization lookup key and, when access is denied, to ask
//! for it to be revoked.

use medicare_core::SessionId;
use secrecy::SecretString;

/// Account identifier assigned by the identity provider.
///
/// Account IDs are opaque strings (for Firebase, the user's `localId`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account ID from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Key used to look up an administrator record for a session.
///
/// The document ID is the account ID. Stores that enforce access rules also
/// need the session's bearer token.
#[derive(Debug, Clone)]
pub struct AuthorizationKey {
    document_id: String,
    bearer_token: Option<SecretString>,
}

impl AuthorizationKey {
    /// Returns the document ID within the administrators collection.
    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Returns the bearer token to present to the store, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }
}

/// An authenticated session handle.
#[derive(Debug, Clone)]
pub struct Session {
    /// Portal-side identifier for correlating log lines.
    id: SessionId,
    /// The authenticated account.
    account_id: AccountId,
    /// The account's email, as reported by the provider.
    email: Option<String>,
    /// Provider ID token, presented to the document store.
    id_token: Option<SecretString>,
}

impl Session {
    /// Creates a session for the given account.
    #[must_use]
    pub fn new(account_id: AccountId) -> Self {
        Self {
            id: SessionId::new(),
            account_id,
            email: None,
            id_token: None,
        }
    }

    /// Sets the account email.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Attaches the provider's ID token.
    #[must_use]
    pub fn with_id_token(mut self, id_token: String) -> Self {
        self.id_token = Some(SecretString::from(id_token));
        self
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the authenticated account's ID.
    #[must_use]
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Returns the account email, if the provider reported one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the provider ID token, if present.
    #[must_use]
    pub fn id_token(&self) -> Option<&SecretString> {
        self.id_token.as_ref()
    }

    /// Derives the administrators-collection key for this session.
    #[must_use]
    pub fn authorization_key(&self) -> AuthorizationKey {
        AuthorizationKey {
            document_id: self.account_id.as_str().to_string(),
            bearer_token: self.id_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn account_id_display() {
        let id = AccountId::new("uid_123");
        assert_eq!(id.to_string(), "uid_123");
        assert_eq!(AccountId::from("uid_123"), id);
    }

    #[test]
    fn new_session_has_no_email_or_token() {
        let session = Session::new(AccountId::new("uid_1"));
        assert_eq!(session.account_id().as_str(), "uid_1");
        assert!(session.email().is_none());
        assert!(session.id_token().is_none());
        assert!(session.authorization_key().bearer_token().is_none());
    }

    #[test]
    fn authorization_key_uses_account_id_and_id_token() {
        let session = Session::new(AccountId::new("uid_42"))
            .with_email(Some("admin@hospital.com".to_string()))
            .with_id_token("id-token".to_string());

        let key = session.authorization_key();
        assert_eq!(key.document_id(), "uid_42");
        assert_eq!(
            key.bearer_token().map(|t| t.expose_secret().to_string()),
            Some("id-token".to_string())
        );
        assert_eq!(session.email(), Some("admin@hospital.com"));
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let session =
            Session::new(AccountId::new("uid_42")).with_id_token("very-secret-id-token".to_string());
        assert!(!format!("{session:?}").contains("very-secret-id-token"));
    }
}
