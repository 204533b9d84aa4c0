//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the single [`SessionStore`] and the other shared handles, provides
//! them through context, and declares the route table. Every routed page is
//! wrapped in [`Guarded`] so nothing renders before its access check.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guarded::Guarded;
use crate::components::nav_bar::NavBar;
use crate::config::ClientConfig;
use crate::nav::guard::GuardConfig;
use crate::nav::routes::RouteId;
use crate::net::api::ApiClient;
use crate::pages::admin::AdminPage;
use crate::pages::donation_request::DonationRequestPage;
use crate::pages::errors::{ForbiddenPage, NotFoundPage, UnauthorizedPage};
use crate::pages::give_meal::GiveMealPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::receive_meal::ReceiveMealPage;
use crate::state::admin_gate::AdminGate;
use crate::state::session::SessionStore;
use crate::util::prefs;
use crate::util::storage::{CookieStore, LocalStorage, SharedStore};

fn segment(route: RouteId) -> StaticSegment<&'static str> {
    StaticSegment(route.path().trim_start_matches('/'))
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let api = ApiClient::from_config(&config);
    let storage: SharedStore = Arc::new(LocalStorage);
    prefs::migrate_name_cookie(&CookieStore, storage.as_ref());

    let store = SessionStore::new(Arc::new(api.clone()), storage.clone());
    let gate = AdminGate::new(Arc::new(api.clone()), storage.clone());

    // Mirror the store into a signal so views re-render on session changes.
    let session = RwSignal::new(store.snapshot());
    store.subscribe(move |snapshot| {
        let _ = session.try_set(snapshot.clone());
    });

    provide_context(GuardConfig::from(&config));
    provide_context(config);
    provide_context(api);
    provide_context(storage);
    provide_context(store);
    provide_context(gate);
    provide_context(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/lunch-order.css"/>
        <Title text="Lunch Order"/>

        <Router>
            <NavBar/>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route
                        path=segment(RouteId::Login)
                        view=|| view! { <Guarded route=RouteId::Login><LoginPage/></Guarded> }
                    />
                    <Route
                        path=segment(RouteId::Home)
                        view=|| view! { <Guarded route=RouteId::Home><HomePage/></Guarded> }
                    />
                    <Route
                        path=segment(RouteId::GiveMeal)
                        view=|| view! { <Guarded route=RouteId::GiveMeal><GiveMealPage/></Guarded> }
                    />
                    <Route
                        path=segment(RouteId::ReceiveMeal)
                        view=|| view! { <Guarded route=RouteId::ReceiveMeal><ReceiveMealPage/></Guarded> }
                    />
                    <Route
                        path=segment(RouteId::DonationRequest)
                        view=|| view! { <Guarded route=RouteId::DonationRequest><DonationRequestPage/></Guarded> }
                    />
                    <Route
                        path=segment(RouteId::Admin)
                        view=|| view! { <Guarded route=RouteId::Admin><AdminPage/></Guarded> }
                    />
                    <Route path=segment(RouteId::Unauthorized) view=UnauthorizedPage/>
                    <Route path=segment(RouteId::Forbidden) view=ForbiddenPage/>
                </Routes>
            </main>
        </Router>
    }
}
