//! Error types for the admin-access crate.
//!
//! Errors follow the login flow:
//! - `AuthenticationError`: the identity provider rejected or could not check credentials
//! - `LookupError`: the administrators collection could not be queried
//! - `RevocationError`: signing the session out failed
//! - `LoginFailure`: what an attempt ended with, and the one message the user sees

use std::fmt;

/// Message shown when an authenticated account has no administrator record.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. This portal is for administrators only.";

/// Message shown for every failure without a more specific classification.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Login failed. Please check your credentials and try again.";

/// Error code reported by the identity provider for a rejected sign-in.
///
/// Providers namespace their codes (`auth/wrong-password`); parsing accepts
/// both the namespaced and the bare form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// No account exists for the email.
    UserNotFound,
    /// The account exists but the password does not match.
    WrongPassword,
    /// The email is malformed.
    InvalidEmail,
    /// The provider throttled the account after repeated failures.
    TooManyRequests,
    /// Any code the portal does not classify.
    Other(String),
}

impl ProviderErrorCode {
    const NAMESPACE: &'static str = "auth/";

    /// Parses a provider code, with or without the `auth/` namespace.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        match code.strip_prefix(Self::NAMESPACE).unwrap_or(code) {
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "invalid-email" => Self::InvalidEmail,
            "too-many-requests" => Self::TooManyRequests,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the bare code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserNotFound => "user-not-found",
            Self::WrongPassword => "wrong-password",
            Self::InvalidEmail => "invalid-email",
            Self::TooManyRequests => "too-many-requests",
            Self::Other(code) => code.as_str(),
        }
    }

    /// Returns true if the code has a dedicated user-facing message.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns the message shown to the user for this code.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UserNotFound => "No administrator account found with this email.",
            Self::WrongPassword => "Incorrect password. Please try again.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::TooManyRequests => "Too many failed login attempts. Please try again later.",
            Self::Other(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<&str> for ProviderErrorCode {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::NAMESPACE, self.as_str())
    }
}

/// Errors from authenticating credentials with the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The provider answered and refused the credentials.
    Rejected { code: ProviderErrorCode },
    /// The provider could not be reached or answered with something unreadable.
    Unavailable { reason: String },
}

impl AuthenticationError {
    /// Creates a rejection from a raw provider code.
    #[must_use]
    pub fn rejected(code: impl Into<ProviderErrorCode>) -> Self {
        Self::Rejected { code: code.into() }
    }

    /// Returns the provider code, if the provider supplied one.
    #[must_use]
    pub fn code(&self) -> Option<&ProviderErrorCode> {
        match self {
            Self::Rejected { code } => Some(code),
            Self::Unavailable { .. } => None,
        }
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Rejected { code } => code.user_message(),
            Self::Unavailable { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { code } => write!(f, "identity provider rejected sign-in: {code}"),
            Self::Unavailable { reason } => {
                write!(f, "identity provider unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Errors from querying the administrators collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The document store could not be reached.
    Unavailable { reason: String },
    /// The document store refused the request.
    Rejected { status: u16, reason: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "document store unavailable: {reason}"),
            Self::Rejected { status, reason } => {
                write!(f, "document store rejected lookup ({status}): {reason}")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Error from signing out a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationError {
    /// Why the sign-out failed.
    pub reason: String,
}

impl fmt::Display for RevocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session revocation failed: {}", self.reason)
    }
}

impl std::error::Error for RevocationError {}

/// Why an admin login attempt did not reach the admin area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    /// Credentials were not accepted; no session exists.
    Authentication(AuthenticationError),
    /// Credentials were accepted but the account is not an administrator.
    AuthorizationDenied,
    /// Anything else that went wrong along the way.
    Transient { reason: String },
}

impl LoginFailure {
    /// Returns the single message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Authentication(err) => err.user_message(),
            Self::AuthorizationDenied => ACCESS_DENIED_MESSAGE,
            Self::Transient { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<AuthenticationError> for LoginFailure {
    fn from(err: AuthenticationError) -> Self {
        Self::Authentication(err)
    }
}

impl From<LookupError> for LoginFailure {
    fn from(err: LookupError) -> Self {
        Self::Transient {
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(err) => write!(f, "{err}"),
            Self::AuthorizationDenied => write!(f, "account is not an administrator"),
            Self::Transient { reason } => write!(f, "login failed: {reason}"),
        }
    }
}

impl std::error::Error for LoginFailure {}
