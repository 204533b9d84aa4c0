use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set("k", "v1");
    store.set("k", "v2");
    assert_eq!(store.get("k").as_deref(), Some("v2"));
    assert_eq!(store.len(), 1);
    store.remove("k");
    assert_eq!(store.get("k"), None);
    store.remove("missing");
    assert!(store.is_empty());
}

#[test]
fn flags_read_only_literal_true() {
    let store = MemoryStore::new();
    assert!(!read_flag(&store, AUTH_KEY));
    store.set(AUTH_KEY, "yes");
    assert!(!read_flag(&store, AUTH_KEY));
    write_flag(&store, AUTH_KEY, true);
    assert!(read_flag(&store, AUTH_KEY));
    write_flag(&store, AUTH_KEY, false);
    assert_eq!(store.get(AUTH_KEY), None);
}

#[test]
fn storage_keys_are_distinct() {
    let keys = [AUTH_KEY, ADMIN_AUTH_KEY, USER_NAME_KEY, USER_ID_KEY, NAME_COOKIE];
    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(ADMIN_AUTH_KEY, "lunch-order-admin-auth");
}

// =============================================================
// Browser stores outside the browser
// =============================================================

#[cfg(not(feature = "csr"))]
#[test]
fn browser_stores_are_inert_natively() {
    LocalStorage.set("k", "v");
    assert_eq!(LocalStorage.get("k"), None);
    LocalStorage.remove("k");
    CookieStore.set(NAME_COOKIE, "Ann");
    assert_eq!(CookieStore.get(NAME_COOKIE), None);
    CookieStore.remove(NAME_COOKIE);
}

// =============================================================
// Cookie strings
// =============================================================

#[test]
fn format_cookie_includes_max_age_and_path() {
    assert_eq!(format_cookie("username", "Ann%20Lee", 60), "username=Ann%20Lee;max-age=60;path=/");
}

#[test]
fn parse_cookie_finds_value_among_others() {
    let cookies = "theme=dark; username=Ann%20Lee; other=1";
    assert_eq!(parse_cookie(cookies, "username").as_deref(), Some("Ann%20Lee"));
    assert_eq!(parse_cookie(cookies, "theme").as_deref(), Some("dark"));
}

#[test]
fn parse_cookie_does_not_match_name_prefix() {
    let cookies = "usernamex=wrong; username=right";
    assert_eq!(parse_cookie(cookies, "username").as_deref(), Some("right"));
}

#[test]
fn parse_cookie_missing_or_empty() {
    assert_eq!(parse_cookie("", "username"), None);
    assert_eq!(parse_cookie("a=1;b=2", "username"), None);
    assert_eq!(parse_cookie("username=", "username").as_deref(), Some(""));
}
