//! Administrator authentication for the MediCare server.
//!
//! The configured identity backend is built once at startup and attached to
//! every request as an `axum::Extension`. Each login attempt gets its own
//! `AdminAccessController`: the identity provider behind it holds the
//! signed-in session of a single client, so controllers are never shared
//! between requests.

use crate::config::IdentityBackendConfig;
use crate::error::BackendError;
use medicare_admin_access::{
    AdminAccessController, AuthorizationStore, FirebaseBackend, IdentityProvider,
    RecordingNavigator, StaticDirectory, StaticIdentityProvider,
};
use std::sync::Arc;

/// Controller over boxed collaborators, as built per request.
pub type PortalController = AdminAccessController<
    Box<dyn IdentityProvider>,
    Box<dyn AuthorizationStore>,
    RecordingNavigator,
>;

/// Shared identity backend.
#[derive(Clone, Debug)]
pub enum AccessBackend {
    /// Firebase Authentication and Firestore.
    Firebase(FirebaseBackend),
    /// Static account directory.
    Static(Arc<StaticDirectory>),
}

impl AccessBackend {
    /// Builds the backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend configuration is unusable.
    pub fn from_config(config: IdentityBackendConfig) -> medicare_core::Result<Self, BackendError> {
        match config {
            IdentityBackendConfig::Firebase(firebase) => {
                tracing::info!(project_id = firebase.project_id(), "using Firebase identity backend");
                let backend = FirebaseBackend::new(firebase).map_err(|e| BackendError::Firebase {
                    details: e.to_string(),
                })?;
                Ok(Self::Firebase(backend))
            }
            IdentityBackendConfig::Static(backend) => {
                let accounts_file = backend.accounts_file.display().to_string();
                let directory = backend.load().map_err(|e| BackendError::AccountsFile {
                    path: accounts_file.clone(),
                    details: e.to_string(),
                })?;
                let directory = StaticDirectory::from_config(&directory);
                if directory.is_empty() {
                    tracing::warn!(accounts_file = %accounts_file, "static directory has no accounts");
                } else {
                    tracing::info!(
                        accounts_file = %accounts_file,
                        accounts = directory.len(),
                        "using static identity backend"
                    );
                }
                Ok(Self::Static(Arc::new(directory)))
            }
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Firebase(_) => "firebase",
            Self::Static(_) => "static",
        }
    }

    /// Creates a controller for one login attempt.
    #[must_use]
    pub fn controller(&self, navigator: RecordingNavigator) -> PortalController {
        let (provider, store): (Box<dyn IdentityProvider>, Box<dyn AuthorizationStore>) =
            match self {
                Self::Firebase(backend) => (
                    Box::new(backend.identity_provider()),
                    Box::new(backend.authorization_store()),
                ),
                Self::Static(directory) => (
                    Box::new(StaticIdentityProvider::new(directory.clone())),
                    Box::new(directory.clone()),
                ),
            };
        AdminAccessController::new(provider, store, navigator)
    }
}
