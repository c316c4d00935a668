//! Navigation abstraction.
//!
//! The login flow ends by moving the user somewhere else. Where navigation
//! actually happens (browser history, a redirect, a test log) is up to the
//! `Navigator` implementation.

use std::sync::{Arc, Mutex, PoisonError};

/// Admin area landing page.
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";

/// Options for a navigation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one, so
    /// back-navigation skips the page being left.
    pub replace_history: bool,
}

impl NavigateOptions {
    /// Options that replace the current history entry.
    #[must_use]
    pub const fn replace() -> Self {
        Self {
            replace_history: true,
        }
    }
}

/// A navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Destination path.
    pub destination: String,
    /// How to navigate there.
    pub options: NavigateOptions,
}

/// Trait for moving the user to another location.
pub trait Navigator: Send + Sync {
    /// Navigates to `destination`.
    fn go_to(&self, destination: &str, options: NavigateOptions);
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn go_to(&self, destination: &str, options: NavigateOptions) {
        (**self).go_to(destination, options);
    }
}

/// Navigator that records requests instead of performing them.
///
/// Used where the controller runs away from the browser: the recorded
/// navigation is handed back to the client, which applies it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    navigations: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every navigation recorded so far, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<Navigation> {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent navigation, if any.
    #[must_use]
    pub fn last(&self) -> Option<Navigation> {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, destination: &str, options: NavigateOptions) {
        tracing::debug!(destination, replace = options.replace_history, "navigation requested");
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Navigation {
                destination: destination.to_string(),
                options,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_navigations_in_order() {
        let navigator = RecordingNavigator::new();
        navigator.go_to("/", NavigateOptions::default());
        navigator.go_to(ADMIN_DASHBOARD, NavigateOptions::replace());

        let recorded = navigator.navigations();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].destination, "/");
        assert!(!recorded[0].options.replace_history);
        assert_eq!(
            navigator.last(),
            Some(Navigation {
                destination: "/admin/dashboard".to_string(),
                options: NavigateOptions {
                    replace_history: true
                },
            })
        );
    }

    #[test]
    fn clones_share_the_same_log() {
        let navigator = RecordingNavigator::new();
        let shared = Arc::new(navigator.clone());
        shared.go_to("/login", NavigateOptions::default());
        assert_eq!(
            navigator.last().map(|n| n.destination),
            Some("/login".to_string())
        );
    }
}
