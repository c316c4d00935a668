//! Administrator authentication and authorization for the MediCare portal.
//!
//! This crate provides:
//! - The admin login flow (`AdminAccessController`)
//! - Seams to the identity provider (`IdentityProvider`) and the
//!   administrators collection (`AuthorizationStore`)
//! - Navigation abstraction (`Navigator`, `RecordingNavigator`)
//! - Backends: Firebase over REST (`firebase`) and a static account list
//!   for local development (`directory`)
//!
//! # Access Control Model
//!
//! Signing in is not enough to reach the admin area. After the identity
//! provider accepts the credentials, the account must also have a document
//! in the administrators collection, keyed by its account ID. Accounts
//! without one are signed out again immediately.
//!
//! # Example
//!
//! ```
//! use medicare_admin_access::{
//!     Credentials, ProviderErrorCode, StaticAccount, StaticDirectory, StaticDirectoryConfig,
//! };
//!
//! let config = StaticDirectoryConfig {
//!     accounts: vec![StaticAccount {
//!         uid: Some("admin_uid".to_string()),
//!         email: "admin@hospital.com".to_string(),
//!         password: "validpass".to_string(),
//!         administrator: true,
//!     }],
//!     ..StaticDirectoryConfig::default()
//! };
//! let directory = StaticDirectory::from_config(&config);
//!
//! let session = directory
//!     .verify(&Credentials::new("admin@hospital.com", "validpass"))
//!     .unwrap();
//! assert!(directory.is_administrator(session.account_id().as_str()));
//!
//! let err = directory
//!     .verify(&Credentials::new("admin@hospital.com", "nope"))
//!     .unwrap_err();
//! assert_eq!(err.code(), Some(&ProviderErrorCode::WrongPassword));
//! ```

pub mod controller;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod firebase;
pub mod navigator;
pub mod outcome;
pub mod provider;
pub mod session;
pub mod store;

// Re-export main types at crate root
pub use controller::AdminAccessController;
pub use credentials::Credentials;
pub use directory::{StaticAccount, StaticDirectory, StaticDirectoryConfig, StaticIdentityProvider};
pub use error::{
    ACCESS_DENIED_MESSAGE, AuthenticationError, GENERIC_FAILURE_MESSAGE, LoginFailure,
    LookupError, ProviderErrorCode, RevocationError,
};
pub use firebase::{FirebaseBackend, FirebaseConfig, FirebaseError};
pub use navigator::{NavigateOptions, Navigation, Navigator, RecordingNavigator};
pub use outcome::OutcomeState;
pub use provider::IdentityProvider;
pub use session::{AccountId, AuthorizationKey, Session};
pub use store::{AuthorizationStore, DEFAULT_ADMIN_COLLECTION};
