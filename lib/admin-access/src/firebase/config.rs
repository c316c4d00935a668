//! Firebase project configuration.

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Configuration for the hosted identity provider and document store.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Clone, Deserialize)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    api_key: String,
    /// Firebase project ID (e.g., "medicare-hospital").
    project_id: String,
    /// Collection holding one document per administrator, keyed by account ID.
    /// Default: "admins"
    #[serde(default = "default_admin_collection")]
    admin_collection: String,
    /// Base URL of the Identity Toolkit REST API.
    /// Default: "https://identitytoolkit.googleapis.com"
    #[serde(default = "default_auth_base_url")]
    auth_base_url: String,
    /// Base URL of the Firestore REST API.
    /// Default: "https://firestore.googleapis.com"
    #[serde(default = "default_firestore_base_url")]
    firestore_base_url: String,
    /// Per-request timeout in seconds.
    /// Default: 10
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_admin_collection() -> String {
    crate::store::DEFAULT_ADMIN_COLLECTION.to_string()
}

fn default_auth_base_url() -> String {
    "https://identitytoolkit.googleapis.com".to_string()
}

fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl FirebaseConfig {
    /// Creates a configuration with defaults for optional fields.
    #[must_use]
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            admin_collection: default_admin_collection(),
            auth_base_url: default_auth_base_url(),
            firestore_base_url: default_firestore_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Points both REST APIs at `base_url`, as the local emulator suite does.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.auth_base_url.clone_from(&base_url);
        self.firestore_base_url = base_url;
        self
    }

    /// Overrides the administrators collection.
    #[must_use]
    pub fn with_admin_collection(mut self, collection: impl Into<String>) -> Self {
        self.admin_collection = collection.into();
        self
    }

    /// Returns the web API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the project ID.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the administrators collection name.
    #[must_use]
    pub fn admin_collection(&self) -> &str {
        &self.admin_collection
    }

    /// Returns the password sign-in endpoint.
    #[must_use]
    pub fn sign_in_url(&self) -> String {
        format!(
            "{}/v1/accounts:signInWithPassword",
            self.auth_base_url.trim_end_matches('/')
        )
    }

    /// Returns the URL of the administrator document for `document_id`.
    ///
    /// Every path segment is percent-encoded. Returns `None` if the Firestore
    /// base URL cannot carry a path.
    #[must_use]
    pub fn admin_document_url(&self, document_id: &str) -> Option<Url> {
        let mut url = Url::parse(&self.firestore_base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                self.admin_collection.as_str(),
                document_id,
            ]);
        Some(url)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"[REDACTED]")
            .field("project_id", &self.project_id)
            .field("admin_collection", &self.admin_collection)
            .field("auth_base_url", &self.auth_base_url)
            .field("firestore_base_url", &self.firestore_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_hosted_apis() {
        let config = FirebaseConfig::new("key", "medicare");
        assert_eq!(config.admin_collection(), "admins");
        assert_eq!(
            config.sign_in_url(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword"
        );
        assert_eq!(
            config.admin_document_url("uid_1").map(String::from).as_deref(),
            Some(
                "https://firestore.googleapis.com/v1/projects/medicare/databases/(default)/documents/admins/uid_1"
            )
        );
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let config = FirebaseConfig::new("key", "medicare")
            .with_base_url("http://127.0.0.1:9099/")
            .with_admin_collection("staff_admins");
        assert_eq!(
            config.sign_in_url(),
            "http://127.0.0.1:9099/v1/accounts:signInWithPassword"
        );
        assert_eq!(
            config.admin_document_url("u").map(String::from).as_deref(),
            Some(
                "http://127.0.0.1:9099/v1/projects/medicare/databases/(default)/documents/staff_admins/u"
            )
        );
    }

    #[test]
    fn document_url_escapes_reserved_characters() {
        let config = FirebaseConfig::new("key", "medicare");
        let url = config
            .admin_document_url("a b?c#d/e%f")
            .expect("valid base url");
        assert_eq!(
            url.path(),
            "/v1/projects/medicare/databases/(default)/documents/admins/a%20b%3Fc%23d%2Fe%25f"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn unusable_base_url_has_no_document_url() {
        let config = FirebaseConfig::new("key", "medicare").with_base_url("not a url");
        assert!(config.admin_document_url("uid_1").is_none());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: FirebaseConfig =
            serde_json::from_str(r#"{"api_key":"k","project_id":"p"}"#).expect("deserialize");
        assert_eq!(config.project_id(), "p");
        assert_eq!(config.admin_collection(), "admins");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = FirebaseConfig::new("super-secret-key", "p");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
