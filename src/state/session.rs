//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionStore`] is created when the app starts and shared through
//! context. The navigation guard reads it before every route change; the nav
//! bar calls `logout`. Nothing else writes to it.
//!
//! DESIGN
//! ======
//! The store is a cheap `Arc` handle. State sits behind an `RwLock` that is
//! never held across an `.await`. Changes are published to subscribers after
//! the lock is released, which is how the Leptos layer mirrors the store into
//! a signal.
//!
//! ERROR HANDLING
//! ==============
//! Every fetch failure (transport, status, decode) collapses to "anonymous".
//! Logout always clears local state, whatever the server said.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::nav::routes::RouteId;
use crate::net::auth::AuthApi;
use crate::net::types::User;
use crate::util::prefs;
use crate::util::storage::{AUTH_KEY, SharedStore, write_flag};

/// What the client currently believes about the visitor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// No identity fetch has settled yet.
    #[default]
    Unresolved,
    /// The last fetch failed, or the user logged out.
    Anonymous,
    Authenticated(User),
}

/// Point-in-time view of the session handed to readers and subscribers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub status: SessionStatus,
    /// An identity fetch is in flight.
    pub loading: bool,
    /// The session ended through [`SessionStore::logout`]; whoever called it
    /// performs the redirect. Cleared by the next settled fetch.
    pub logged_out: bool,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::has_admin_flag)
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.status, SessionStatus::Unresolved)
    }
}

/// Returned by [`SessionStore::logout`]; the caller performs the redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// The server confirmed the session was invalidated.
    pub server_acknowledged: bool,
    pub redirect: RouteId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    api: Arc<dyn AuthApi>,
    storage: SharedStore,
    session: RwLock<Session>,
    /// Bumped on logout; fetches that started under an older epoch are dropped.
    epoch: AtomicU64,
    pending: AtomicUsize,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_listener: AtomicU64,
}

/// Process-wide owner of [`Session`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").field("session", &self.snapshot()).finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>, storage: SharedStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                storage,
                session: RwLock::new(Session::default()),
                epoch: AtomicU64::new(0),
                pending: AtomicUsize::new(0),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot().is_admin()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().loading
    }

    /// Call `listener` with a fresh snapshot after every state change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Re-fetch the identity and settle the session.
    ///
    /// Overlapping calls each settle on their own; the last to finish wins.
    /// A result that arrives after a `logout` issued during its flight is
    /// discarded. Returns the snapshot after settling.
    pub async fn fetch_identity(&self) -> Session {
        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        self.update(|s| s.loading = true);

        let result = self.inner.api.fetch_identity().await;

        let still_pending = self.inner.pending.fetch_sub(1, Ordering::SeqCst) > 1;
        if self.inner.epoch.load(Ordering::SeqCst) != epoch {
            log::debug!("dropping identity fetch that settled after logout");
            return self.update(|s| s.loading = still_pending);
        }

        let storage = self.inner.storage.as_ref();
        match result {
            Ok(user) => {
                log::info!("session established for user {}", user.id);
                write_flag(storage, AUTH_KEY, true);
                prefs::remember_user(storage, &user);
                self.update(|s| {
                    s.status = SessionStatus::Authenticated(user);
                    s.loading = still_pending;
                    s.logged_out = false;
                })
            }
            Err(e) => {
                log::warn!("identity fetch failed, treating session as anonymous: {e}");
                write_flag(storage, AUTH_KEY, false);
                self.update(|s| {
                    s.status = SessionStatus::Anonymous;
                    s.loading = still_pending;
                    s.logged_out = false;
                })
            }
        }
    }

    /// Invalidate the server session (best effort) and clear local state.
    pub async fn logout(&self) -> LogoutOutcome {
        let server_acknowledged = match self.inner.api.invalidate_session().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("logout request failed, clearing local session anyway: {e}");
                false
            }
        };

        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        let storage = self.inner.storage.as_ref();
        write_flag(storage, AUTH_KEY, false);
        prefs::forget_user(storage);
        let still_pending = self.inner.pending.load(Ordering::SeqCst) > 0;
        self.update(|s| {
            s.status = SessionStatus::Anonymous;
            s.loading = still_pending;
            s.logged_out = true;
        });

        LogoutOutcome { server_acknowledged, redirect: RouteId::Login }
    }

    fn update(&self, mutate: impl FnOnce(&mut Session)) -> Session {
        let snapshot = {
            let mut session = self.inner.session.write().unwrap_or_else(PoisonError::into_inner);
            mutate(&mut session);
            session.clone()
        };
        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, snapshot: &Session) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}
