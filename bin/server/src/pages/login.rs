//! Patient portal login page.

use leptos::prelude::*;

/// Patient portal entry point.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Patient Portal"</h1>
                <p>"Patient sign-in is not available yet."</p>
                <p>
                    "Staff members can use the "
                    <a href="/admin/login">"Administrator Portal"</a>
                    "."
                </p>
            </div>
        </div>
    }
}
