//! Static account directory for local development.
//!
//! The directory is configured with a fixed list of accounts and plays both
//! external roles: it authenticates email/password pairs like the identity
//! provider and answers administrator lookups like the document store. It
//! reports the same error codes the hosted provider does, so the login form
//! behaves identically against either backend.

use crate::credentials::Credentials;
use crate::error::{AuthenticationError, LookupError, ProviderErrorCode, RevocationError};
use crate::provider::IdentityProvider;
use crate::session::{AccountId, AuthorizationKey, Session};
use crate::store::AuthorizationStore;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Configuration for the static directory.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticDirectoryConfig {
    /// Accounts known to the directory.
    #[serde(default)]
    pub accounts: Vec<StaticAccount>,

    /// Consecutive wrong passwords after which an email is throttled.
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    /// Minutes after the last wrong password before a throttled email can
    /// sign in again.
    #[serde(default = "default_lockout_minutes")]
    pub lockout_minutes: u32,
}

fn default_max_failed_attempts() -> u32 {
    5
}

fn default_lockout_minutes() -> u32 {
    15
}

impl Default for StaticDirectoryConfig {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            max_failed_attempts: default_max_failed_attempts(),
            lockout_minutes: default_lockout_minutes(),
        }
    }
}

/// One configured account.
#[derive(Clone, Deserialize)]
pub struct StaticAccount {
    /// Account ID; derived from the position in the list when omitted.
    #[serde(default)]
    pub uid: Option<String>,
    /// Sign-in email.
    pub email: String,
    /// Sign-in password.
    pub password: String,
    /// Whether the account has an administrator record.
    #[serde(default)]
    pub administrator: bool,
}

struct DirectoryEntry {
    account_id: AccountId,
    email: String,
    password: String,
}

impl std::fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("account_id", &self.account_id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for StaticAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAccount")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("administrator", &self.administrator)
            .finish()
    }
}

/// Consecutive wrong passwords for one email.
#[derive(Debug, Clone, Copy)]
struct FailedAttempts {
    count: u32,
    last_failure: DateTime<Utc>,
}

/// In-memory accounts and administrator records.
#[derive(Debug)]
pub struct StaticDirectory {
    entries: HashMap<String, DirectoryEntry>,
    administrators: HashMap<String, bool>,
    failed_attempts: Mutex<HashMap<String, FailedAttempts>>,
    max_failed_attempts: u32,
    lockout: Duration,
}

impl StaticDirectory {
    /// Builds a directory from configuration.
    #[must_use]
    pub fn from_config(config: &StaticDirectoryConfig) -> Self {
        let mut entries = HashMap::new();
        let mut administrators = HashMap::new();

        for (index, account) in config.accounts.iter().enumerate() {
            let account_id = account
                .uid
                .clone()
                .map(AccountId::new)
                .unwrap_or_else(|| AccountId::new(format!("static-{index}")));
            administrators.insert(account_id.as_str().to_string(), account.administrator);
            entries.insert(
                normalize_email(&account.email),
                DirectoryEntry {
                    account_id,
                    email: account.email.clone(),
                    password: account.password.clone(),
                },
            );
        }

        Self {
            entries,
            administrators,
            failed_attempts: Mutex::new(HashMap::new()),
            max_failed_attempts: config.max_failed_attempts,
            lockout: Duration::minutes(i64::from(config.lockout_minutes)),
        }
    }

    /// Returns the number of configured accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no accounts are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verifies credentials and issues a session.
    pub fn verify(&self, credentials: &Credentials) -> Result<Session, AuthenticationError> {
        self.verify_at(credentials, Utc::now())
    }

    fn verify_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthenticationError> {
        if !is_plausible_email(credentials.email()) {
            return Err(AuthenticationError::Rejected {
                code: ProviderErrorCode::InvalidEmail,
            });
        }

        let key = normalize_email(credentials.email());
        let entry = self
            .entries
            .get(&key)
            .ok_or(AuthenticationError::Rejected {
                code: ProviderErrorCode::UserNotFound,
            })?;

        let mut failed = self
            .failed_attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // A lockout lasts until `lockout` has passed since the last wrong password.
        if failed
            .get(&key)
            .is_some_and(|attempts| now - attempts.last_failure >= self.lockout)
        {
            failed.remove(&key);
        }

        if failed
            .get(&key)
            .is_some_and(|attempts| attempts.count >= self.max_failed_attempts)
        {
            return Err(AuthenticationError::Rejected {
                code: ProviderErrorCode::TooManyRequests,
            });
        }

        if !credentials.password_matches(&entry.password) {
            let attempts = failed.entry(key).or_insert(FailedAttempts {
                count: 0,
                last_failure: now,
            });
            attempts.count += 1;
            attempts.last_failure = now;
            return Err(AuthenticationError::Rejected {
                code: ProviderErrorCode::WrongPassword,
            });
        }

        failed.remove(&key);
        Ok(Session::new(entry.account_id.clone()).with_email(Some(entry.email.clone())))
    }

    /// Returns true if the account has an administrator record.
    #[must_use]
    pub fn is_administrator(&self, account_id: &str) -> bool {
        self.administrators
            .get(account_id)
            .copied()
            .unwrap_or(false)
    }
}

#[async_trait]
impl AuthorizationStore for StaticDirectory {
    async fn lookup_authorization(&self, key: &AuthorizationKey) -> Result<bool, LookupError> {
        Ok(self.is_administrator(key.document_id()))
    }
}

/// Identity provider over a shared static directory.
///
/// Each instance holds its own current session, the way each browser holds
/// its own signed-in user.
#[derive(Debug)]
pub struct StaticIdentityProvider {
    directory: Arc<StaticDirectory>,
    current: Mutex<Option<Session>>,
}

impl StaticIdentityProvider {
    /// Creates a provider with no current session.
    #[must_use]
    pub fn new(directory: Arc<StaticDirectory>) -> Self {
        Self {
            directory,
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, AuthenticationError> {
        let session = self.directory.verify(credentials)?;
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(session)
    }

    async fn revoke_session(&self) -> Result<(), RevocationError> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
