//! Route wrapper that runs the navigation guard before rendering a page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed view in `app` is wrapped in [`Guarded`]. The page body is only
//! built once the guard allows it; a redirect replaces the history entry so
//! "back" does not land on the refused route again.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::nav::guard::{GuardConfig, NavigationDecision};
use crate::nav::routes::RouteId;
use crate::state::session::{Session, SessionStore};
use crate::util::auth::install_session_watch;

#[component]
pub fn Guarded(route: RouteId, children: ChildrenFn) -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let config = expect_context::<GuardConfig>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let decision = RwSignal::new(None::<NavigationDecision>);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let outcome = crate::nav::guard::evaluate(route.descriptor(), &store, config).await;
        decision.try_set(Some(outcome));
    });
    #[cfg(not(feature = "csr"))]
    decision.set(Some(crate::nav::guard::decide(route.descriptor(), &store.snapshot(), config)));

    let navigate_away = navigate.clone();
    Effect::new(move || {
        if let Some(NavigationDecision::Redirect(target)) = decision.get() {
            navigate_away(target.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    install_session_watch(session, route, config, navigate);

    view! {
        <Show
            when=move || decision.get() == Some(NavigationDecision::Allow)
            fallback=|| view! { <p class="page-loading">"Loading..."</p> }
        >
            {children()}
        </Show>
    }
}
