//! Home page component.

use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"MediCare Hospital"</h1>
            <p>"Caring for our community, every day."</p>
            <div class="home-actions">
                <a href="/login" class="cta-button">"Patient Portal"</a>
                <a href="/admin/login" class="link-button">"Administrator Portal"</a>
            </div>
        </div>
    }
}
