//! Main Leptos application component and routing.

use crate::pages::{AdminDashboardPage, AdminLoginPage, HomePage, LoginPage};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_navigate,
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="MediCare Hospital"/>
        <Router>
            <div class="page">
                <Header/>
                <main class="container">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=path!("/") view=HomePage/>
                        <Route path=path!("/login") view=LoginPage/>
                        <Route path=path!("/admin/login") view=AdminLoginPage/>
                        <Route path=path!("/admin/dashboard") view=AdminDashboardPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// Header with the hospital logo and a way back to the home page.
#[component]
fn Header() -> impl IntoView {
    let navigate = use_navigate();
    let back_to_home = move |_| navigate("/", Default::default());

    view! {
        <header class="header">
            <div class="header-content">
                <a href="/" class="logo">
                    <div class="logo-icon">
                        <svg width="40" height="40" viewBox="0 0 40 40" fill="none" xmlns="http://www.w3.org/2000/svg">
                            <rect x="18" y="8" width="4" height="24" fill="#2563eb"/>
                            <rect x="8" y="18" width="24" height="4" fill="#2563eb"/>
                            <circle cx="20" cy="20" r="18" stroke="#2563eb" stroke-width="2"/>
                        </svg>
                    </div>
                    <h1 class="hospital-name">"MediCare Hospital"</h1>
                </a>
                <button type="button" class="back-button" on:click=back_to_home>
                    "Back to Home"
                </button>
            </div>
        </header>
    }
}
