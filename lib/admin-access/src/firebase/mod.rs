//! Firebase-backed identity provider and administrators collection.
//!
//! Talks to the Identity Toolkit and Firestore REST APIs. One
//! `FirebaseBackend` is built at startup and shared; it hands out a fresh
//! identity provider per login attempt, since a provider holds the signed-in
//! session of one client.

mod config;
mod firestore;
mod identity;

pub use config::FirebaseConfig;
pub use firestore::FirestoreAuthorizationStore;
pub use identity::FirebaseIdentityProvider;

use rootcause::prelude::Report;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Errors from setting up the Firebase backend.
#[derive(Debug)]
pub enum FirebaseError {
    /// The configuration is unusable.
    InvalidConfig { details: String },
    /// The HTTP client could not be built.
    ClientBuild { details: String },
}

impl fmt::Display for FirebaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { details } => write!(f, "invalid Firebase configuration: {details}"),
            Self::ClientBuild { details } => write!(f, "failed to build HTTP client: {details}"),
        }
    }
}

impl std::error::Error for FirebaseError {}

/// Shared HTTP client and configuration.
#[derive(Debug, Clone)]
pub struct FirebaseBackend {
    http: reqwest::Client,
    config: Arc<FirebaseConfig>,
}

impl FirebaseBackend {
    /// Validates the configuration and builds the HTTP client.
    pub fn new(config: FirebaseConfig) -> Result<Self, Report<FirebaseError>> {
        if config.api_key().trim().is_empty() {
            return Err(FirebaseError::InvalidConfig {
                details: "api_key is empty".to_string(),
            }
            .into());
        }
        if config.project_id().trim().is_empty() {
            return Err(FirebaseError::InvalidConfig {
                details: "project_id is empty".to_string(),
            }
            .into());
        }
        let collection = config.admin_collection();
        if collection.trim().is_empty() || collection.contains('/') {
            return Err(FirebaseError::InvalidConfig {
                details: format!("admin_collection '{collection}' is not a collection name"),
            }
            .into());
        }
        if config.admin_document_url("document").is_none() {
            return Err(FirebaseError::InvalidConfig {
                details: "firestore base URL is not a valid base URL".to_string(),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FirebaseError::ClientBuild {
                details: e.to_string(),
            })?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    /// Creates an identity provider with no signed-in session.
    #[must_use]
    pub fn identity_provider(&self) -> FirebaseIdentityProvider {
        FirebaseIdentityProvider::new(self.http.clone(), self.config.clone())
    }

    /// Creates a store over the administrators collection.
    #[must_use]
    pub fn authorization_store(&self) -> FirestoreAuthorizationStore {
        FirestoreAuthorizationStore::new(self.http.clone(), self.config.clone())
    }
}

/// Error envelope shared by Google REST APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Extracts `error.message` from a Google API error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let err = FirebaseBackend::new(FirebaseConfig::new(" ", "p")).expect_err("should fail");
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn rejects_empty_project_id() {
        let err = FirebaseBackend::new(FirebaseConfig::new("k", "")).expect_err("should fail");
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn rejects_unusable_admin_collection() {
        for collection in ["", " ", "admins/extra"] {
            let config = FirebaseConfig::new("k", "p").with_admin_collection(collection);
            let err = FirebaseBackend::new(config).expect_err("should fail");
            assert!(err.to_string().contains("admin_collection"));
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = FirebaseConfig::new("k", "p").with_base_url("not a url");
        let err = FirebaseBackend::new(config).expect_err("should fail");
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn builds_with_valid_config() {
        let backend = FirebaseBackend::new(FirebaseConfig::new("k", "p")).expect("should build");
        assert_eq!(backend.config().project_id(), "p");
    }

    #[test]
    fn parses_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#;
        assert_eq!(error_message(body).as_deref(), Some("EMAIL_NOT_FOUND"));
        assert_eq!(error_message("<html>bad gateway</html>"), None);
    }
}
