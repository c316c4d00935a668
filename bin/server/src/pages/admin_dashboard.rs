//! Admin dashboard placeholder.

use leptos::prelude::*;

/// Landing page after a successful administrator login.
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <div class="admin-page">
            <h1>"Admin Dashboard"</h1>
            <p>"Hospital management tools will appear here."</p>
        </div>
    }
}
