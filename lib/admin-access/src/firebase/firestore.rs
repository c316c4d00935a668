//! Administrator records in Firestore.

use super::{FirebaseConfig, error_message};
use crate::error::LookupError;
use crate::session::AuthorizationKey;
use crate::store::AuthorizationStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;

/// Looks up administrator documents by account ID.
///
/// A document existing at `{collection}/{account_id}` grants access; its
/// contents are not read.
#[derive(Debug, Clone)]
pub struct FirestoreAuthorizationStore {
    http: reqwest::Client,
    config: Arc<FirebaseConfig>,
}

impl FirestoreAuthorizationStore {
    pub(super) fn new(http: reqwest::Client, config: Arc<FirebaseConfig>) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl AuthorizationStore for FirestoreAuthorizationStore {
    #[instrument(skip_all, fields(document_id = key.document_id()))]
    async fn lookup_authorization(&self, key: &AuthorizationKey) -> Result<bool, LookupError> {
        let document_id = key.document_id();
        if document_id.is_empty()
            || document_id.contains('/')
            || document_id == "."
            || document_id == ".."
        {
            tracing::debug!("account ID cannot address a document");
            return Ok(false);
        }

        let url = self
            .config
            .admin_document_url(document_id)
            .ok_or_else(|| LookupError::Unavailable {
                reason: "firestore base URL is not a valid base URL".to_string(),
            })?;
        let mut request = self.http.get(url);
        if let Some(token) = key.bearer_token() {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| LookupError::Unavailable {
            reason: e.to_string(),
        })?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(LookupError::Rejected {
                    status: status.as_u16(),
                    reason: error_message(&body).unwrap_or_else(|| status.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firebase::FirebaseBackend;
    use crate::session::{AccountId, Session};
    use httpmock::prelude::*;
    use serde_json::json;

    const ADMIN_PATH: &str = "/v1/projects/medicare/databases/(default)/documents/admins/admin_uid";

    fn store(server: &MockServer) -> FirestoreAuthorizationStore {
        let config = FirebaseConfig::new("test-key", "medicare").with_base_url(server.base_url());
        FirebaseBackend::new(config)
            .expect("backend")
            .authorization_store()
    }

    fn key(account: &str) -> AuthorizationKey {
        Session::new(AccountId::new(account))
            .with_id_token("id-token".to_string())
            .authorization_key()
    }

    #[tokio::test]
    async fn existing_document_grants_access() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(ADMIN_PATH)
                    .header("authorization", "Bearer id-token");
                then.status(200).json_body(json!({
                    "name": "projects/medicare/databases/(default)/documents/admins/admin_uid",
                    "fields": {"role": {"stringValue": "superadmin"}}
                }));
            })
            .await;

        let allowed = store(&server)
            .lookup_authorization(&key("admin_uid"))
            .await
            .expect("lookup");

        mock.assert_async().await;
        assert!(allowed);
    }

    #[tokio::test]
    async fn missing_document_denies_access() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/projects/medicare/databases/(default)/documents/admins/nurse_uid");
                then.status(404).json_body(json!({
                    "error": {"code": 404, "message": "Document not found", "status": "NOT_FOUND"}
                }));
            })
            .await;

        let allowed = store(&server)
            .lookup_authorization(&key("nurse_uid"))
            .await
            .expect("lookup");
        assert!(!allowed);
    }

    #[tokio::test]
    async fn refused_lookup_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(ADMIN_PATH);
                then.status(403).json_body(json!({
                    "error": {
                        "code": 403,
                        "message": "Missing or insufficient permissions.",
                        "status": "PERMISSION_DENIED"
                    }
                }));
            })
            .await;

        let err = store(&server)
            .lookup_authorization(&key("admin_uid"))
            .await
            .expect_err("should fail");
        assert_eq!(
            err,
            LookupError::Rejected {
                status: 403,
                reason: "Missing or insufficient permissions.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unroutable_account_id_is_not_an_administrator() {
        let config = FirebaseConfig::new("k", "medicare").with_base_url("http://127.0.0.1:1");
        let store = FirebaseBackend::new(config)
            .expect("backend")
            .authorization_store();

        for account in ["", "../other/doc", ".", ".."] {
            let allowed = store
                .lookup_authorization(&key(account))
                .await
                .expect("no request is made");
            assert!(!allowed);
        }
    }

    #[tokio::test]
    async fn unreachable_store_is_unavailable() {
        let config = FirebaseConfig::new("k", "medicare").with_base_url("http://127.0.0.1:1");
        let store = FirebaseBackend::new(config)
            .expect("backend")
            .authorization_store();

        let err = store
            .lookup_authorization(&key("admin_uid"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, LookupError::Unavailable { .. }));
    }
}
