//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! The identity backend is selected with `IDENTITY__BACKEND`:
//! - `firebase`: `IDENTITY__API_KEY`, `IDENTITY__PROJECT_ID` and optionally
//!   `IDENTITY__ADMIN_COLLECTION`, `IDENTITY__AUTH_BASE_URL`,
//!   `IDENTITY__FIRESTORE_BASE_URL` (see
//!   [`FirebaseConfig`](medicare_admin_access::FirebaseConfig))
//! - `static`: `IDENTITY__ACCOUNTS_FILE` pointing at a TOML or JSON file of
//!   accounts (see
//!   [`StaticDirectoryConfig`](medicare_admin_access::StaticDirectoryConfig))

use medicare_admin_access::{FirebaseConfig, StaticDirectoryConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Where credentials are checked and administrators are listed.
    pub identity: IdentityBackendConfig,
}

/// Identity backend selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum IdentityBackendConfig {
    /// Firebase Authentication and Firestore.
    Firebase(FirebaseConfig),
    /// Accounts listed in a local file.
    Static(StaticBackendConfig),
}

/// Static backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticBackendConfig {
    /// Path to the accounts file.
    pub accounts_file: PathBuf,
}

impl StaticBackendConfig {
    /// Reads the accounts file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load(&self) -> Result<StaticDirectoryConfig, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(self.accounts_file.as_path()))
            .build()?
            .try_deserialize()
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
