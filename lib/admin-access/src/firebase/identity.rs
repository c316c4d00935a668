//! Password sign-in against the Identity Toolkit REST API.

use super::{FirebaseConfig, error_message};
use crate::credentials::Credentials;
use crate::error::{AuthenticationError, ProviderErrorCode, RevocationError};
use crate::provider::IdentityProvider;
use crate::session::{AccountId, Session};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::instrument;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
}

/// Identity provider backed by Firebase Authentication.
#[derive(Debug)]
pub struct FirebaseIdentityProvider {
    http: reqwest::Client,
    config: Arc<FirebaseConfig>,
    current: Mutex<Option<Session>>,
}

impl FirebaseIdentityProvider {
    pub(super) fn new(http: reqwest::Client, config: Arc<FirebaseConfig>) -> Self {
        Self {
            http,
            config,
            current: Mutex::new(None),
        }
    }

    fn set_current(&self, session: Option<Session>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    #[instrument(skip_all)]
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, AuthenticationError> {
        let request = SignInRequest {
            email: credentials.email(),
            password: credentials.password().expose_secret(),
            return_secure_token: true,
        };

        let response = self
            .http
            .post(self.config.sign_in_url())
            .query(&[("key", self.config.api_key())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthenticationError::Unavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthenticationError::Unavailable {
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(match error_message(&body) {
                Some(message) => AuthenticationError::Rejected {
                    code: code_for_message(&message),
                },
                None => AuthenticationError::Unavailable {
                    reason: format!("sign-in returned {status}"),
                },
            });
        }

        let signed_in: SignInResponse =
            serde_json::from_str(&body).map_err(|e| AuthenticationError::Unavailable {
                reason: format!("unreadable sign-in response: {e}"),
            })?;

        let session = Session::new(AccountId::new(signed_in.local_id))
            .with_email(signed_in.email)
            .with_id_token(signed_in.id_token);

        tracing::debug!(account_id = %session.account_id(), "password sign-in succeeded");
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    /// Forgets the signed-in session. ID tokens cannot be revoked server-side
    /// through the REST API; dropping them is the client-side sign-out.
    async fn revoke_session(&self) -> Result<(), RevocationError> {
        self.set_current(None);
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Maps an Identity Toolkit error message to a provider code.
///
/// Messages look like `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account
/// has been temporarily disabled...`; only the leading token matters.
fn code_for_message(message: &str) -> ProviderErrorCode {
    let token = message
        .split(|c: char| c == ':' || c.is_whitespace())
        .find(|part| !part.is_empty())
        .unwrap_or_default();

    match token {
        "EMAIL_NOT_FOUND" => ProviderErrorCode::UserNotFound,
        "INVALID_PASSWORD" => ProviderErrorCode::WrongPassword,
        "INVALID_EMAIL" => ProviderErrorCode::InvalidEmail,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => ProviderErrorCode::TooManyRequests,
        "USER_DISABLED" => ProviderErrorCode::Other("user-disabled".to_string()),
        "INVALID_LOGIN_CREDENTIALS" => ProviderErrorCode::Other("invalid-credential".to_string()),
        "MISSING_PASSWORD" => ProviderErrorCode::Other("missing-password".to_string()),
        other => ProviderErrorCode::Other(other.to_ascii_lowercase().replace('_', "-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firebase::FirebaseBackend;
    use httpmock::prelude::*;
    use serde_json::json;

    fn provider(server: &MockServer) -> FirebaseIdentityProvider {
        let config = FirebaseConfig::new("test-key", "medicare").with_base_url(server.base_url());
        FirebaseBackend::new(config)
            .expect("backend")
            .identity_provider()
    }

    async fn reject_with(message: &str) -> AuthenticationError {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/accounts:signInWithPassword");
                then.status(400).json_body(json!({
                    "error": {"code": 400, "message": message, "errors": []}
                }));
            })
            .await;

        provider(&server)
            .authenticate(&Credentials::new("admin@hospital.com", "wrong"))
            .await
            .expect_err("should be rejected")
    }

    #[tokio::test]
    async fn successful_sign_in_creates_session() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/accounts:signInWithPassword")
                    .query_param("key", "test-key")
                    .json_body(json!({
                        "email": "admin@hospital.com",
                        "password": "validpass",
                        "returnSecureToken": true
                    }));
                then.status(200).json_body(json!({
                    "kind": "identitytoolkit#VerifyPasswordResponse",
                    "localId": "admin_uid",
                    "email": "admin@hospital.com",
                    "idToken": "id-token",
                    "refreshToken": "refresh-token",
                    "expiresIn": "3600",
                    "registered": true
                }));
            })
            .await;

        let provider = provider(&server);
        let session = provider
            .authenticate(&Credentials::new("admin@hospital.com", "validpass"))
            .await
            .expect("should sign in");

        mock.assert_async().await;
        assert_eq!(session.account_id().as_str(), "admin_uid");
        assert_eq!(session.email(), Some("admin@hospital.com"));
        assert_eq!(
            session.id_token().map(|t| t.expose_secret().to_string()),
            Some("id-token".to_string())
        );
        assert!(provider.current_session().is_some());
    }

    #[tokio::test]
    async fn classified_errors_map_to_codes() {
        assert_eq!(
            reject_with("EMAIL_NOT_FOUND").await,
            AuthenticationError::rejected("user-not-found")
        );
        assert_eq!(
            reject_with("INVALID_PASSWORD").await,
            AuthenticationError::rejected("wrong-password")
        );
        assert_eq!(
            reject_with("INVALID_EMAIL").await,
            AuthenticationError::rejected("invalid-email")
        );
        assert_eq!(
            reject_with(
                "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"
            )
            .await,
            AuthenticationError::rejected("too-many-requests")
        );
    }

    #[tokio::test]
    async fn unclassified_errors_keep_their_code() {
        let err = reject_with("USER_DISABLED").await;
        assert_eq!(err.code().map(ProviderErrorCode::as_str), Some("user-disabled"));
        assert!(!err.code().is_some_and(ProviderErrorCode::is_classified));
    }

    #[tokio::test]
    async fn unreadable_error_body_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/accounts:signInWithPassword");
                then.status(502).body("bad gateway");
            })
            .await;

        let err = provider(&server)
            .authenticate(&Credentials::new("admin@hospital.com", "validpass"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, AuthenticationError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn revoke_clears_current_session() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/accounts:signInWithPassword");
                then.status(200).json_body(json!({
                    "localId": "nurse_uid",
                    "idToken": "id-token"
                }));
            })
            .await;

        let provider = provider(&server);
        provider
            .authenticate(&Credentials::new("nurse@hospital.com", "validpass"))
            .await
            .expect("should sign in");
        assert!(provider.current_session().is_some());

        provider.revoke_session().await.expect("revoke");
        assert!(provider.current_session().is_none());
    }

    #[test]
    fn message_tokens() {
        assert_eq!(code_for_message("EMAIL_NOT_FOUND"), ProviderErrorCode::UserNotFound);
        assert_eq!(
            code_for_message("INVALID_LOGIN_CREDENTIALS"),
            ProviderErrorCode::Other("invalid-credential".to_string())
        );
        assert_eq!(
            code_for_message("WEAK_PASSWORD : Password should be at least 6 characters"),
            ProviderErrorCode::Other("weak-password".to_string())
        );
        assert_eq!(code_for_message(""), ProviderErrorCode::Other(String::new()));
    }
}
