//! Top navigation bar with route links and the logout action.

use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

use crate::nav::routes::RouteId;
#[cfg(feature = "csr")]
use crate::state::admin_gate::AdminGate;
use crate::state::session::{Session, SessionStore};

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let store = expect_context::<SessionStore>();
    #[cfg(feature = "csr")]
    let gate = expect_context::<AdminGate>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        {
            let store = store.clone();
            let gate = gate.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = store.logout().await;
                gate.logout();
                navigate(outcome.redirect.path(), NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = &store;
    };

    let user_name = move || session.get().user().map(|u| u.display_name()).unwrap_or_default();

    view! {
        <nav class="nav-bar" class:nav-bar--hidden=move || !session.get().is_authenticated()>
            <A href=RouteId::Home.path()>"Order"</A>
            <A href=RouteId::GiveMeal.path()>"Give a meal"</A>
            <A href=RouteId::ReceiveMeal.path()>"Receive a meal"</A>
            <A href=RouteId::DonationRequest.path()>"Request a meal"</A>
            <Show when=move || session.get().is_admin()>
                <A href=RouteId::Admin.path()>"Admin"</A>
            </Show>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__user">{user_name}</span>
            <button class="btn nav-bar__logout" on:click=on_logout>
                "Logout"
            </button>
        </nav>
    }
}
