//! Administrator login page and its server function.

use crate::types::{LoginOutcome, login_error_message};
use leptos::form::ActionForm;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Server function that runs one admin login attempt.
#[server]
pub async fn admin_login(email: String, password: String) -> Result<LoginOutcome, ServerFnError> {
    use crate::auth::AccessBackend;
    use crate::error::LoginError;
    use axum::Extension;
    use medicare_admin_access::{Credentials, RecordingNavigator};

    if email.trim().is_empty() {
        return Err(LoginError::MissingField { field: "email" }.into_server_error());
    }
    if password.is_empty() {
        return Err(LoginError::MissingField { field: "password" }.into_server_error());
    }

    let Extension(backend): Extension<AccessBackend> =
        leptos_axum::extract().await.map_err(|e| {
            tracing::error!(error = %e, "identity backend missing from request");
            LoginError::BackendMissing {
                details: e.to_string(),
            }
            .into_server_error()
        })?;

    let navigator = RecordingNavigator::new();
    let controller = backend.controller(navigator.clone());
    let state = controller
        .attempt_admin_login(Credentials::new(email.trim(), password))
        .await;

    Ok(LoginOutcome::from_attempt(&state, navigator.last()))
}

/// Administrator portal login form.
#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let login = ServerAction::<AdminLogin>::new();
    let pending = login.pending();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(Ok(LoginOutcome::Authorized {
            redirect_to,
            replace,
        })) = login.value().get()
        {
            navigate(
                &redirect_to,
                NavigateOptions {
                    replace,
                    ..Default::default()
                },
            );
        }
    });

    let error_message = move || {
        if pending.get() {
            return None;
        }
        login.value().get().and_then(|result| match result {
            Ok(outcome) => outcome.message().map(str::to_string),
            Err(error) => Some(login_error_message(&error)),
        })
    };

    view! {
        <div class="login-page">
            <div class="login-container">
                <div class="login-header">
                    <h2>"Administrator Portal"</h2>
                    <p>"Secure access to hospital management system"</p>
                </div>

                <ActionForm action=login>
                    <div class="login-form">
                        <div class="form-group">
                            <label for="email">"Admin Email"</label>
                            <input
                                id="email"
                                type="email"
                                name="email"
                                required
                                placeholder="Enter your admin email"
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">"Password"</label>
                            <input
                                id="password"
                                type="password"
                                name="password"
                                required
                                placeholder="Enter your password"
                            />
                        </div>

                        {move || error_message().map(|msg| view! { <div class="error-message">{msg}</div> })}

                        <button type="submit" class="login-button" disabled=move || pending.get()>
                            {move || if pending.get() { "Signing In..." } else { "Sign In to Admin Portal" }}
                        </button>
                    </div>
                </ActionForm>

                <div class="login-footer">
                    <p class="admin-note">
                        "For administrative access only. If you're a patient, please use the "
                        <a href="/login" class="patient-portal-link">"Patient Portal"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
