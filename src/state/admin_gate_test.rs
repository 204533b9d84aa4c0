use futures::executor::block_on;

use super::*;
use crate::test_support::{FakeAdminApi, network_error};
use crate::util::storage::{KeyValueStore, MemoryStore};

fn gate() -> (Arc<FakeAdminApi>, Arc<MemoryStore>, AdminGate) {
    let api = Arc::new(FakeAdminApi::default());
    let storage = Arc::new(MemoryStore::new());
    let gate = AdminGate::new(api.clone(), storage.clone());
    (api, storage, gate)
}

#[test]
fn accepted_password_persists_flag() {
    let (api, storage, gate) = gate();
    api.push_result(Ok(true));
    assert!(block_on(gate.login("hunter2")));
    assert!(gate.is_authenticated());
    assert_eq!(storage.get(ADMIN_AUTH_KEY).as_deref(), Some("true"));
    assert_eq!(*api.passwords.lock().unwrap(), vec!["hunter2".to_owned()]);
}

#[test]
fn flag_survives_a_new_gate_over_the_same_storage() {
    let (api, storage, gate) = gate();
    api.push_result(Ok(true));
    block_on(gate.login("hunter2"));

    let reloaded = AdminGate::new(Arc::new(FakeAdminApi::default()), storage);
    assert!(reloaded.is_authenticated());
}

#[test]
fn rejected_password_closes_gate() {
    let (api, _storage, gate) = gate();
    api.push_result(Ok(true));
    api.push_result(Ok(false));
    block_on(gate.login("right"));
    assert!(!block_on(gate.login("wrong")));
    assert!(!gate.is_authenticated());
}

#[test]
fn request_failure_closes_gate() {
    let (api, _storage, gate) = gate();
    api.push_result(Err(network_error()));
    assert!(!block_on(gate.login("hunter2")));
    assert!(!gate.is_authenticated());
}

#[test]
fn empty_password_is_not_sent() {
    let (api, _storage, gate) = gate();
    assert!(!block_on(gate.login("")));
    assert!(api.passwords.lock().unwrap().is_empty());
}

#[test]
fn logout_removes_flag() {
    let (api, storage, gate) = gate();
    api.push_result(Ok(true));
    block_on(gate.login("hunter2"));
    gate.logout();
    assert!(!gate.is_authenticated());
    assert!(storage.get(ADMIN_AUTH_KEY).is_none());
}
