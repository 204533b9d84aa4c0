//! Pluggable key-value persistence for client state that survives reloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store and admin gate persist small flags; forms persist the
//! user's display name. They all go through [`KeyValueStore`] so the same
//! logic runs against `localStorage`, cookies, or memory in native tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Set once a profile fetch succeeds; cleared on failure and logout.
pub const AUTH_KEY: &str = "lunch-order-auth";
/// Set once the shared admin password is accepted.
pub const ADMIN_AUTH_KEY: &str = "lunch-order-admin-auth";
/// Display name used to pre-fill donor/claimant/requester fields.
pub const USER_NAME_KEY: &str = "lunch-order-user-name";
/// Opaque user identifier remembered alongside the name.
pub const USER_ID_KEY: &str = "lunch-order-user-id";
/// Cookie name older deployments used for the display name.
pub const NAME_COOKIE: &str = "username";

/// One year, matching the lifetime of the name cookie.
pub const COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared handle stored in app context.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Read a `"true"`/`"false"` flag; anything else counts as unset.
pub fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

pub fn write_flag(store: &dyn KeyValueStore, key: &str, value: bool) {
    if value {
        store.set(key, "true");
    } else {
        store.remove(key);
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local store for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

// =============================================================================
// LOCAL STORAGE
// =============================================================================

/// `window.localStorage`. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

// =============================================================================
// COOKIES
// =============================================================================

/// `document.cookie`, one-year expiry, site-wide path. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieStore;

/// Serialize a `name=value` cookie assignment. `value` must already be encoded.
pub fn format_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value};max-age={max_age_secs};path=/")
}

/// Find `name` in a `document.cookie` string and return its raw value.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim_start)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(str::to_owned)
}

#[cfg(feature = "csr")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let cookies = html_document()?.cookie().ok()?;
            let raw = parse_cookie(&cookies, key)?;
            js_sys::decode_uri_component(&raw).ok().map(String::from)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(doc) = html_document() {
                let encoded = String::from(js_sys::encode_uri_component(value));
                let _ = doc.set_cookie(&format_cookie(key, &encoded, COOKIE_MAX_AGE_SECS));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(doc) = html_document() {
                let _ = doc.set_cookie(&format_cookie(key, "", 0));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
