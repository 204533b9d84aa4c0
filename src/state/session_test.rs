use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use super::*;
use crate::net::error::ApiError;
use crate::test_support::{harness, make_user, network_error, server_error};
use crate::util::prefs::{remembered_name, remembered_user_id};
use crate::util::storage::{KeyValueStore, read_flag};

// =============================================================
// Initial state
// =============================================================

#[test]
fn new_store_is_unresolved() {
    let h = harness();
    let session = h.store.snapshot();
    assert_eq!(session.status, SessionStatus::Unresolved);
    assert!(!session.is_resolved());
    assert!(!h.store.is_authenticated());
    assert!(!h.store.is_admin());
    assert!(!h.store.is_loading());
    assert_eq!(h.api.fetches(), 0);
}

// =============================================================
// fetch_identity
// =============================================================

#[test]
fn fetch_success_then_server_error_clears_identity() {
    let h = harness();
    let user: User =
        serde_json::from_str(r#"{"id":1,"name":"A","email":"a@x.com","isAdmin":false}"#).unwrap();
    h.api.push_identity(Ok(user.clone()));
    h.api.push_identity(Err(server_error()));

    let session = block_on(h.store.fetch_identity());
    assert!(session.is_authenticated());
    assert!(!session.is_admin());
    assert_eq!(session.user(), Some(&user));
    assert!(h.store.is_authenticated());
    assert!(!h.store.is_admin());

    let session = block_on(h.store.fetch_identity());
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert_eq!(session.status, SessionStatus::Anonymous);
    assert!(!h.store.is_authenticated());
}

#[test]
fn fetch_with_gorm_shaped_identity_authenticates() {
    let h = harness();
    let user: User = serde_json::from_str(
        r#"{"ID":5,"CreatedAt":"2024-05-06T09:00:00Z","name":"Ann","email":"ann@impact.com","googleId":"g1","role":"admin"}"#,
    )
    .unwrap();
    h.api.push_identity(Ok(user));

    let session = block_on(h.store.fetch_identity());
    assert!(session.is_authenticated());
    assert!(h.store.is_authenticated());
    assert!(h.store.is_admin());
    assert_eq!(remembered_user_id(h.storage.as_ref()).as_deref(), Some("5"));
}

#[test]
fn fetch_network_error_resolves_to_anonymous() {
    let h = harness();
    h.api.push_identity(Err(network_error()));
    let session = block_on(h.store.fetch_identity());
    assert!(session.is_resolved());
    assert!(!session.is_authenticated());
    assert!(!session.loading);
}

#[test]
fn fetch_decode_error_resolves_to_anonymous() {
    let h = harness();
    h.api.push_identity(Err(ApiError::Decode("expected value".to_owned())));
    let session = block_on(h.store.fetch_identity());
    assert_eq!(session.status, SessionStatus::Anonymous);
}

#[test]
fn fetch_admin_user_exposes_admin_flag() {
    let h = harness();
    h.api.push_identity(Ok(make_user(9, true)));
    block_on(h.store.fetch_identity());
    assert!(h.store.is_admin());
}

#[test]
fn refetch_replaces_identity_wholesale() {
    let h = harness();
    h.api.push_identity(Ok(make_user(1, true)));
    h.api.push_identity(Ok(make_user(2, false)));
    block_on(h.store.fetch_identity());
    let session = block_on(h.store.fetch_identity());
    assert_eq!(session.user().map(|u| u.id), Some(2));
    assert!(!session.is_admin());
}

#[test]
fn fetch_persists_auth_flag_and_prefill_values() {
    let h = harness();
    h.api.push_identity(Ok(make_user(7, false)));
    block_on(h.store.fetch_identity());
    assert!(read_flag(h.storage.as_ref(), AUTH_KEY));
    assert_eq!(remembered_name(h.storage.as_ref()).as_deref(), Some("user-7"));
    assert_eq!(remembered_user_id(h.storage.as_ref()).as_deref(), Some("7"));

    h.api.push_identity(Err(server_error()));
    block_on(h.store.fetch_identity());
    assert!(!read_flag(h.storage.as_ref(), AUTH_KEY));
    // The display name is kept for pre-filling forms.
    assert_eq!(remembered_name(h.storage.as_ref()).as_deref(), Some("user-7"));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_state_and_redirects_to_login() {
    let h = harness();
    h.api.push_identity(Ok(make_user(1, true)));
    block_on(h.store.fetch_identity());

    let outcome = block_on(h.store.logout());
    assert!(outcome.server_acknowledged);
    assert_eq!(outcome.redirect, RouteId::Login);
    assert!(!h.store.is_authenticated());
    assert!(!h.store.is_admin());
    assert!(h.store.snapshot().user().is_none());
    assert!(h.storage.get(AUTH_KEY).is_none());
    assert!(remembered_user_id(h.storage.as_ref()).is_none());
}

#[test]
fn logout_clears_state_even_when_request_fails() {
    let h = harness();
    h.api.push_identity(Ok(make_user(1, false)));
    block_on(h.store.fetch_identity());
    h.api.fail_logout(network_error());

    let outcome = block_on(h.store.logout());
    assert_eq!(h.api.logout_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(!outcome.server_acknowledged);
    assert_eq!(outcome.redirect, RouteId::Login);
    assert!(!h.store.is_authenticated());
    assert!(h.store.snapshot().user().is_none());
    assert!(!read_flag(h.storage.as_ref(), AUTH_KEY));
}

#[test]
fn logout_leaves_session_resolved() {
    let h = harness();
    block_on(h.store.logout());
    let session = h.store.snapshot();
    assert!(session.is_resolved());
    assert_eq!(session.status, SessionStatus::Anonymous);
    assert!(session.logged_out);
}

#[test]
fn next_settled_fetch_clears_logged_out() {
    let h = harness();
    block_on(h.store.logout());
    h.api.push_identity(Err(network_error()));
    let session = block_on(h.store.fetch_identity());
    assert_eq!(session.status, SessionStatus::Anonymous);
    assert!(!session.logged_out);
}

#[test]
fn fetch_settling_after_logout_is_discarded() {
    let h = harness();
    let release = h.api.gate_next_fetch();

    block_on(async {
        let fetch = h.store.fetch_identity();
        let logout_then_release = async {
            h.store.logout().await;
            release.send(Ok(make_user(3, true))).unwrap();
        };
        futures::join!(fetch, logout_then_release);
    });

    let session = h.store.snapshot();
    assert!(!session.is_authenticated());
    assert!(!session.loading);
    assert!(!read_flag(h.storage.as_ref(), AUTH_KEY));
}

// =============================================================
// Overlapping fetches
// =============================================================

#[test]
fn overlapping_fetches_last_to_settle_wins() {
    let h = harness();
    let first = h.api.gate_next_fetch();
    let second = h.api.gate_next_fetch();
    let seen = Arc::new(Mutex::new(Vec::<Session>::new()));
    let sink = seen.clone();
    h.store.subscribe(move |s| sink.lock().unwrap().push(s.clone()));

    block_on(async {
        let release = async {
            second.send(Ok(make_user(5, false))).unwrap();
            first.send(Err(server_error())).unwrap();
        };
        futures::join!(h.store.fetch_identity(), h.store.fetch_identity(), release);
    });

    assert_eq!(h.api.fetches(), 2);
    let session = h.store.snapshot();
    assert!(session.is_authenticated());
    assert!(!session.loading);

    // The first fetch to settle must not clear the loading flag.
    let seen = seen.lock().unwrap();
    let first_settled = seen.iter().find(|s| s.status == SessionStatus::Anonymous).unwrap();
    assert!(first_settled.loading);
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn subscribers_observe_each_transition() {
    let h = harness();
    let seen = Arc::new(Mutex::new(Vec::<Session>::new()));
    let sink = seen.clone();
    h.store.subscribe(move |s| sink.lock().unwrap().push(s.clone()));

    h.api.push_identity(Ok(make_user(1, false)));
    block_on(h.store.fetch_identity());
    block_on(h.store.logout());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].loading);
    assert_eq!(seen[0].status, SessionStatus::Unresolved);
    assert!(!seen[1].loading);
    assert!(seen[1].is_authenticated());
    assert_eq!(seen[2].status, SessionStatus::Anonymous);
}

#[test]
fn unsubscribe_stops_notifications() {
    let h = harness();
    let count = Arc::new(Mutex::new(0_usize));
    let sink = count.clone();
    let id = h.store.subscribe(move |_| *sink.lock().unwrap() += 1);

    h.api.push_identity(Err(network_error()));
    block_on(h.store.fetch_identity());
    assert_eq!(*count.lock().unwrap(), 2);

    assert!(h.store.unsubscribe(id));
    assert!(!h.store.unsubscribe(id));
    block_on(h.store.logout());
    assert_eq!(*count.lock().unwrap(), 2);
}

#[test]
fn listener_may_read_the_store() {
    let h = harness();
    let reader = h.store.clone();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let sink = observed.clone();
    h.store.subscribe(move |_| sink.lock().unwrap().push(reader.is_authenticated()));

    h.api.push_identity(Ok(make_user(1, false)));
    block_on(h.store.fetch_identity());
    assert_eq!(*observed.lock().unwrap(), vec![false, true]);
}

#[test]
fn debug_output_includes_session() {
    let h = harness();
    let rendered = format!("{:?}", h.store);
    assert!(rendered.contains("SessionStore"));
    assert!(rendered.contains("Unresolved"));
}
