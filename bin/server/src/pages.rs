//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod admin_dashboard;
pub mod admin_login;
pub mod home;
pub mod login;

// Re-export all page components for convenient access
pub use admin_dashboard::AdminDashboardPage;
pub use admin_login::AdminLoginPage;
pub use home::HomePage;
pub use login::LoginPage;
