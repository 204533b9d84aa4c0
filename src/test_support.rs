//! Scripted fakes shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::net::auth::{AdminApi, AuthApi};
use crate::net::error::ApiError;
use crate::net::types::User;
use crate::state::session::SessionStore;
use crate::util::storage::MemoryStore;

pub(crate) fn make_user(id: u64, is_admin: bool) -> User {
    User {
        id,
        name: format!("user-{id}"),
        email: Some(format!("user{id}@impact.com")),
        first_name: None,
        last_name: None,
        avatar_url: None,
        is_admin,
        role: None,
    }
}

pub(crate) fn server_error() -> ApiError {
    ApiError::Status { status: 500, message: "internal error".to_owned() }
}

pub(crate) fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_owned())
}

type Gate = oneshot::Receiver<Result<User, ApiError>>;

/// [`AuthApi`] that replays queued results, or waits on gates the test opens.
#[derive(Default)]
pub(crate) struct FakeAuthApi {
    identities: Mutex<VecDeque<Result<User, ApiError>>>,
    gates: Mutex<VecDeque<Gate>>,
    logout_error: Mutex<Option<ApiError>>,
    pub fetch_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl FakeAuthApi {
    pub fn push_identity(&self, result: Result<User, ApiError>) {
        self.identities.lock().unwrap().push_back(result);
    }

    /// The next fetch blocks until the returned sender fires.
    pub fn gate_next_fetch(&self) -> oneshot::Sender<Result<User, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn fail_logout(&self, error: ApiError) {
        *self.logout_error.lock().unwrap() = Some(error);
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeAuthApi {
    async fn fetch_identity(&self) -> Result<User, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(rx) = gate {
            return rx.await.unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_owned())));
        }
        self.identities
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_owned())))
    }

    async fn invalidate_session(&self) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        match self.logout_error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// [`AdminApi`] that replays queued results and records submitted passwords.
#[derive(Default)]
pub(crate) struct FakeAdminApi {
    results: Mutex<VecDeque<Result<bool, ApiError>>>,
    pub passwords: Mutex<Vec<String>>,
}

impl FakeAdminApi {
    pub fn push_result(&self, result: Result<bool, ApiError>) {
        self.results.lock().unwrap().push_back(result);
    }
}

#[async_trait(?Send)]
impl AdminApi for FakeAdminApi {
    async fn admin_login(&self, password: &str) -> Result<bool, ApiError> {
        self.passwords.lock().unwrap().push(password.to_owned());
        self.results.lock().unwrap().pop_front().unwrap_or(Ok(false))
    }
}

/// A store wired to fresh fakes, plus handles to inspect them.
pub(crate) struct Harness {
    pub api: Arc<FakeAuthApi>,
    pub storage: Arc<MemoryStore>,
    pub store: SessionStore,
}

pub(crate) fn harness() -> Harness {
    let api = Arc::new(FakeAuthApi::default());
    let storage = Arc::new(MemoryStore::new());
    let store = SessionStore::new(api.clone(), storage.clone());
    Harness { api, storage, store }
}
