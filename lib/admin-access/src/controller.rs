//! Admin access controller.
//!
//! Runs one admin login attempt end to end:
//! 1. Authenticates the credentials with the identity provider
//! 2. Looks up the account in the administrators collection
//! 3. Navigates to the admin dashboard, or signs the session out and
//!    reports the denial
//!
//! The controller owns the attempt's `OutcomeState`. Observers subscribe to
//! it to drive the form (error message, disabled submit button).

use crate::credentials::Credentials;
use crate::error::{GENERIC_FAILURE_MESSAGE, LoginFailure};
use crate::navigator::{ADMIN_DASHBOARD, NavigateOptions, Navigator};
use crate::outcome::OutcomeState;
use crate::provider::IdentityProvider;
use crate::session::Session;
use crate::store::AuthorizationStore;
use medicare_core::AttemptId;
use tokio::sync::watch;
use tracing::instrument;

/// Decides whether submitted credentials grant access to the admin area.
pub struct AdminAccessController<P, S, N> {
    provider: P,
    store: S,
    navigator: N,
    state: watch::Sender<OutcomeState>,
}

impl<P, S, N> AdminAccessController<P, S, N>
where
    P: IdentityProvider,
    S: AuthorizationStore,
    N: Navigator,
{
    /// Creates a controller in the `Idle` state.
    #[must_use]
    pub fn new(provider: P, store: S, navigator: N) -> Self {
        let (state, _) = watch::channel(OutcomeState::Idle);
        Self {
            provider,
            store,
            navigator,
            state,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> OutcomeState {
        self.state.borrow().clone()
    }

    /// Returns true while an attempt is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    /// Subscribes to state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OutcomeState> {
        self.state.subscribe()
    }

    /// Returns the identity provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Attempts an admin login and returns the resulting state.
    ///
    /// A submission made while another attempt is in flight is ignored: no
    /// collaborator is called and `Submitting` is returned. Every other path
    /// ends in `Authorized`, `Denied` or `Failed`, and all failures are
    /// absorbed into the returned state.
    #[instrument(skip_all, fields(attempt_id = %AttemptId::new()))]
    pub async fn attempt_admin_login(&self, credentials: Credentials) -> OutcomeState {
        let Some(submission) = Submission::begin(&self.state) else {
            tracing::debug!("ignoring submission while another attempt is in flight");
            return OutcomeState::Submitting;
        };

        match self.authenticate_and_authorize(credentials).await {
            Ok(session) => {
                tracing::info!(
                    account_id = %session.account_id(),
                    session_id = %session.id(),
                    "administrator signed in"
                );
                submission.finish(OutcomeState::Authorized);
                self.navigator
                    .go_to(ADMIN_DASHBOARD, NavigateOptions::replace());
                OutcomeState::Authorized
            }
            Err(failure) => {
                let outcome = OutcomeState::from(&failure);
                submission.finish(outcome.clone());
                outcome
            }
        }
    }

    async fn authenticate_and_authorize(
        &self,
        credentials: Credentials,
    ) -> Result<Session, LoginFailure> {
        let session = self
            .provider
            .authenticate(&credentials)
            .await
            .map_err(|err| {
                tracing::info!(
                    code = err.code().map(|c| c.as_str()),
                    error = %err,
                    "admin authentication failed"
                );
                LoginFailure::from(err)
            })?;
        drop(credentials);

        let key = session.authorization_key();
        match self.store.lookup_authorization(&key).await {
            Ok(true) => Ok(session),
            Ok(false) => {
                tracing::warn!(
                    account_id = %session.account_id(),
                    "non-administrator attempted admin login"
                );
                self.revoke(&session).await;
                Err(LoginFailure::AuthorizationDenied)
            }
            Err(err) => {
                tracing::error!(
                    account_id = %session.account_id(),
                    error = %err,
                    "administrator lookup failed"
                );
                self.revoke(&session).await;
                Err(err.into())
            }
        }
    }

    /// Signs the session out. A failed sign-out is logged, never surfaced.
    async fn revoke(&self, session: &Session) {
        match self.provider.revoke_session().await {
            Ok(()) => {
                tracing::debug!(session_id = %session.id(), "session revoked");
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %session.id(),
                    account_id = %session.account_id(),
                    error = %err,
                    "failed to revoke session"
                );
            }
        }
    }
}

/// Holds the `Submitting` state for the duration of one attempt.
///
/// If the attempt is dropped before finishing (cancelled future, panicking
/// collaborator) the state falls back to the generic failure so the form is
/// usable again.
struct Submission<'a> {
    state: &'a watch::Sender<OutcomeState>,
    finished: bool,
}

impl<'a> Submission<'a> {
    fn begin(state: &'a watch::Sender<OutcomeState>) -> Option<Self> {
        let started = state.send_if_modified(|current| {
            if current.is_submitting() {
                false
            } else {
                *current = OutcomeState::Submitting;
                true
            }
        });

        started.then_some(Self {
            state,
            finished: false,
        })
    }

    fn finish(mut self, outcome: OutcomeState) {
        self.state.send_replace(outcome);
        self.finished = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("admin login attempt abandoned before completion");
            self.state.send_replace(OutcomeState::Failed {
                reason: GENERIC_FAILURE_MESSAGE.to_string(),
            });
        }
    }
}
