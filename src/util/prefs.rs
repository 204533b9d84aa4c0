//! Remembered display name and user id for pre-filling forms.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use super::storage::{KeyValueStore, NAME_COOKIE, USER_ID_KEY, USER_NAME_KEY};
use crate::net::types::User;

pub fn remember_user(store: &dyn KeyValueStore, user: &User) {
    store.set(USER_NAME_KEY, &user.display_name());
    store.set(USER_ID_KEY, &user.id.to_string());
}

/// Remember a name typed into a form, ignoring blank input.
pub fn remember_name(store: &dyn KeyValueStore, name: &str) {
    let name = name.trim();
    if !name.is_empty() {
        store.set(USER_NAME_KEY, name);
    }
}

pub fn forget_user(store: &dyn KeyValueStore) {
    store.remove(USER_NAME_KEY);
    store.remove(USER_ID_KEY);
}

pub fn remembered_name(store: &dyn KeyValueStore) -> Option<String> {
    store.get(USER_NAME_KEY).filter(|n| !n.trim().is_empty())
}

pub fn remembered_user_id(store: &dyn KeyValueStore) -> Option<String> {
    store.get(USER_ID_KEY).filter(|id| !id.is_empty())
}

/// Move a name left in the legacy `username` cookie into `store`.
///
/// A name already present in `store` wins; the cookie is dropped either way.
pub fn migrate_name_cookie(cookies: &dyn KeyValueStore, store: &dyn KeyValueStore) {
    let Some(name) = cookies.get(NAME_COOKIE) else {
        return;
    };
    if remembered_name(store).is_none() {
        remember_name(store, &name);
        log::debug!("migrated display name from legacy cookie");
    }
    cookies.remove(NAME_COOKIE);
}

/// Name to pre-fill: the remembered one, else the session user's.
pub fn prefill_name(store: &dyn KeyValueStore, user: Option<&User>) -> String {
    remembered_name(store)
        .or_else(|| user.map(User::display_name))
        .unwrap_or_default()
}
