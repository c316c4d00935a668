//! State of an admin login attempt.

use crate::error::LoginFailure;

/// Where the admin login flow currently stands.
///
/// `Idle -> Submitting -> {Authorized | Denied | Failed}`. `Denied` and
/// `Failed` go back to `Submitting` on the next submission; `Authorized` ends
/// the flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutcomeState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// An attempt is in flight; re-submission is ignored.
    Submitting,
    /// The account authenticated but is not an administrator.
    Denied { reason: String },
    /// Authentication or the lookup failed.
    Failed { reason: String },
    /// The account is an administrator.
    Authorized,
}

impl OutcomeState {
    /// Returns true while an attempt is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns true if access was granted.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Returns the message to display, present only for `Denied` and `Failed`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Denied { reason } | Self::Failed { reason } => Some(reason.as_str()),
            Self::Idle | Self::Submitting | Self::Authorized => None,
        }
    }
}

impl From<&LoginFailure> for OutcomeState {
    fn from(failure: &LoginFailure) -> Self {
        let reason = failure.user_message().to_string();
        match failure {
            LoginFailure::AuthorizationDenied => Self::Denied { reason },
            LoginFailure::Authentication(_) | LoginFailure::Transient { .. } => {
                Self::Failed { reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ACCESS_DENIED_MESSAGE, AuthenticationError, GENERIC_FAILURE_MESSAGE};

    #[test]
    fn only_denied_and_failed_carry_messages() {
        assert_eq!(OutcomeState::Idle.message(), None);
        assert_eq!(OutcomeState::Submitting.message(), None);
        assert_eq!(OutcomeState::Authorized.message(), None);
        assert_eq!(
            OutcomeState::Failed {
                reason: "nope".to_string()
            }
            .message(),
            Some("nope")
        );
    }

    #[test]
    fn denial_becomes_denied_state() {
        let state = OutcomeState::from(&LoginFailure::AuthorizationDenied);
        assert_eq!(
            state,
            OutcomeState::Denied {
                reason: ACCESS_DENIED_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn transient_failure_becomes_generic_failed_state() {
        let state = OutcomeState::from(&LoginFailure::Transient {
            reason: "boom".to_string(),
        });
        assert_eq!(state.message(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(!state.is_authorized());
    }

    #[test]
    fn authentication_failure_becomes_failed_state() {
        let failure = LoginFailure::from(AuthenticationError::rejected("wrong-password"));
        assert_eq!(
            OutcomeState::from(&failure),
            OutcomeState::Failed {
                reason: "Incorrect password. Please try again.".to_string()
            }
        );
    }
}
