//! Shared types used across server functions and UI components.

use leptos::server_fn::error::ServerFnError;
use serde::{Deserialize, Serialize};

/// Message shown when the login request itself fails.
pub const LOGIN_FAILED_MESSAGE: &str =
    "Login failed. Please check your credentials and try again.";

/// Result of an admin login attempt, as sent to the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginOutcome {
    /// Access granted; the browser should move to `redirect_to`.
    Authorized { redirect_to: String, replace: bool },
    /// Signed in, but not an administrator.
    Denied { message: String },
    /// Sign-in or the administrator lookup failed.
    Failed { message: String },
    /// Another attempt was already in flight.
    InProgress,
}

impl LoginOutcome {
    /// Returns the message to display, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Denied { message } | Self::Failed { message } => Some(message.as_str()),
            Self::Authorized { .. } | Self::InProgress => None,
        }
    }
}

/// Returns the text to show for a failed login request.
///
/// Messages the server function chose to return are shown as they are;
/// transport and encoding failures get the generic message.
#[must_use]
pub fn login_error_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) if !message.is_empty() => message.clone(),
        _ => LOGIN_FAILED_MESSAGE.to_string(),
    }
}

#[cfg(feature = "ssr")]
impl LoginOutcome {
    /// Builds the wire outcome from the controller's final state and the
    /// navigation it requested.
    #[must_use]
    pub fn from_attempt(
        state: &medicare_admin_access::OutcomeState,
        navigation: Option<medicare_admin_access::Navigation>,
    ) -> Self {
        use medicare_admin_access::OutcomeState;
        use medicare_admin_access::navigator::ADMIN_DASHBOARD;

        match state {
            OutcomeState::Authorized => match navigation {
                Some(navigation) => Self::Authorized {
                    redirect_to: navigation.destination,
                    replace: navigation.options.replace_history,
                },
                None => Self::Authorized {
                    redirect_to: ADMIN_DASHBOARD.to_string(),
                    replace: true,
                },
            },
            OutcomeState::Denied { reason } => Self::Denied {
                message: reason.clone(),
            },
            OutcomeState::Failed { reason } => Self::Failed {
                message: reason.clone(),
            },
            OutcomeState::Submitting => Self::InProgress,
            OutcomeState::Idle => Self::Failed {
                message: LOGIN_FAILED_MESSAGE.to_string(),
            },
        }
    }
}
