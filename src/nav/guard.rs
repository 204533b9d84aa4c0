//! Navigation guard deciding whether a route change may proceed.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before a routed view renders (see
//! [`crate::components::guarded::Guarded`]). These checks only shape the UI;
//! the API still enforces access on every request.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{RouteDescriptor, RouteId};
use crate::config::{ClientConfig, UnauthenticatedRedirect};
use crate::state::session::{Session, SessionStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(RouteId),
}

impl NavigationDecision {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Redirect(route) => Some(route.path()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardConfig {
    pub unauthenticated: UnauthenticatedRedirect,
}

impl From<&ClientConfig> for GuardConfig {
    fn from(config: &ClientConfig) -> Self {
        Self { unauthenticated: config.unauthenticated_redirect }
    }
}

impl GuardConfig {
    fn unauthenticated_route(self) -> RouteId {
        match self.unauthenticated {
            UnauthenticatedRedirect::Login => RouteId::Login,
            UnauthenticatedRedirect::Unauthorized => RouteId::Unauthorized,
        }
    }
}

/// Decide a navigation to `route` given an already-resolved `session`.
pub fn decide(route: &RouteDescriptor, session: &Session, config: GuardConfig) -> NavigationDecision {
    if route.requires_auth && !session.is_authenticated() {
        return NavigationDecision::Redirect(config.unauthenticated_route());
    }
    if route.requires_admin && !session.is_admin() {
        return NavigationDecision::Redirect(RouteId::Forbidden);
    }
    if route.id == RouteId::Login && session.is_authenticated() {
        return NavigationDecision::Redirect(RouteId::Home);
    }
    NavigationDecision::Allow
}

/// Resolve the session if it never has been, then [`decide`].
///
/// Issues at most one identity request and never retries.
pub async fn evaluate(route: &RouteDescriptor, store: &SessionStore, config: GuardConfig) -> NavigationDecision {
    let current = store.snapshot();
    let session = if current.is_resolved() { current } else { store.fetch_identity().await };
    let decision = decide(route, &session, config);
    log::debug!("navigation to {} -> {decision:?}", route.path);
    decision
}
