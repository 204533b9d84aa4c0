//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded views and page actions should react identically when the session
//! ends or the API rejects a request.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::nav::guard::{GuardConfig, NavigationDecision, decide};
use crate::nav::routes::{RouteDescriptor, RouteId};
use crate::net::error::ApiError;
use crate::state::session::Session;

/// Where a view that was already allowed must go after `session` changed.
///
/// Returns `None` while a fetch is in flight, before the first one settles,
/// and after a logout (the logout caller navigates on its own).
pub fn redirect_after_change(route: &RouteDescriptor, session: &Session, config: GuardConfig) -> Option<RouteId> {
    if session.loading || !session.is_resolved() || session.logged_out {
        return None;
    }
    match decide(route, session, config) {
        NavigationDecision::Allow => None,
        NavigationDecision::Redirect(target) => Some(target),
    }
}

/// Re-run the guard whenever the mirrored session changes.
pub fn install_session_watch<F>(session: RwSignal<Session>, route: RouteId, config: GuardConfig, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = session.get();
        if let Some(target) = redirect_after_change(route.descriptor(), &state, config) {
            log::debug!("session changed on {}, leaving for {}", route.path(), target.path());
            navigate(target.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Navigate to `/401` or `/403` if `error` calls for it.
///
/// Returns whether a navigation was issued.
pub fn follow_error_redirect<F>(error: &ApiError, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    let Some(target) = error.redirect_route() else {
        return false;
    };
    navigate(target.path(), NavigateOptions::default());
    true
}
