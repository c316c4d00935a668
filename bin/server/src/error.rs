//! Domain error types for server operations.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors from the admin login server function, before an attempt runs.
#[derive(Debug)]
pub enum LoginError {
    /// The request carried an empty email or password.
    MissingField { field: &'static str },
    /// No identity backend is attached to the request.
    BackendMissing { details: String },
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "login request is missing '{}'", field),
            Self::BackendMissing { details } => {
                write!(f, "identity backend unavailable: {}", details)
            }
        }
    }
}

impl std::error::Error for LoginError {}

impl LoginError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            LoginError::MissingField { .. } => {
                ServerFnError::new("Please enter your email and password.")
            }
            LoginError::BackendMissing { .. } => {
                ServerFnError::new(crate::types::LOGIN_FAILED_MESSAGE)
            }
        }
    }
}

/// Errors from building the identity backend at startup.
#[derive(Debug)]
pub enum BackendError {
    /// The Firebase backend could not be set up.
    Firebase { details: String },
    /// The static accounts file could not be read.
    AccountsFile { path: String, details: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firebase { details } => write!(f, "firebase backend: {}", details),
            Self::AccountsFile { path, details } => {
                write!(f, "failed to read accounts file '{}': {}", path, details)
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_hides_details() {
        let err = LoginError::BackendMissing {
            details: "Extension of type AccessBackend was not found".to_string(),
        };
        assert!(err.to_string().contains("AccessBackend"));
        assert!(!err.into_server_error().to_string().contains("AccessBackend"));
    }

    #[test]
    fn backend_error_names_the_file() {
        let err = BackendError::AccountsFile {
            path: "accounts.toml".to_string(),
            details: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read accounts file 'accounts.toml': not found"
        );
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = LoginError::MissingField { field: "password" };
        assert_eq!(err.to_string(), "login request is missing 'password'");
    }
}
