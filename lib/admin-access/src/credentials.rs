//! Email and password submitted from the admin login form.

use secrecy::{ExposeSecret, SecretString};

/// Credentials collected at submission time.
///
/// Credentials are never persisted. The password is held as a secret so it
/// is redacted from `Debug` output and tracing fields.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Creates credentials from the submitted form fields.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Returns the submitted email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password secret.
    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Returns true if the password matches `candidate`.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_password() {
        let credentials = Credentials::new("admin@hospital.com", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("admin@hospital.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn password_matches_exact_value() {
        let credentials = Credentials::new("admin@hospital.com", "validpass");
        assert!(credentials.password_matches("validpass"));
        assert!(!credentials.password_matches("validpass "));
        assert_eq!(credentials.password().expose_secret(), "validpass");
    }
}
