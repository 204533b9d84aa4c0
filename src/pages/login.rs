//! Login page that hands the browser to the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server owns the OAuth dance. This page only asks it where to go
//! (`GET /Api/Auth/Login`) and performs a full-page redirect; the session
//! cookie set on the way back is picked up by the next identity fetch.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::net::api::ApiClient;

/// Accept only absolute http(s) URLs from the login endpoint.
///
/// # Errors
///
/// Returns the message to show when the server sent something unusable.
pub fn validate_auth_url(raw: &str) -> Result<String, &'static str> {
    let url = raw.trim();
    if url.is_empty() {
        return Err("The sign-in service did not return a login address.");
    }
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err("The sign-in service returned an invalid login address.");
    }
    Ok(url.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = expect_context::<ApiClient>();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_sign_in = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Redirecting to sign-in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let target = match api.login_redirect().await {
                    Ok(raw) => validate_auth_url(&raw).map_err(str::to_owned),
                    Err(e) => Err(format!("Sign-in failed: {e}")),
                };
                match target {
                    Ok(url) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&url);
                        }
                    }
                    Err(message) => {
                        log::warn!("login redirect unavailable: {message}");
                        info.set(message);
                        busy.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Lunch Order"</h1>
                <p class="login-card__subtitle">"Order, donate, and claim workplace lunches."</p>
                <button class="login-button" on:click=on_sign_in disabled=move || busy.get()>
                    "Sign in"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
