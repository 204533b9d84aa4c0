//! Shared-password gate in front of the admin tools.
//!
//! Deployments without per-user admin flags protect the admin screen with one
//! shared password. Acceptance is remembered under `lunch-order-admin-auth`
//! so a reload does not ask again.

#[cfg(test)]
#[path = "admin_gate_test.rs"]
mod admin_gate_test;

use std::fmt;
use std::sync::Arc;

use crate::net::auth::AdminApi;
use crate::util::storage::{ADMIN_AUTH_KEY, SharedStore, read_flag, write_flag};

#[derive(Clone)]
pub struct AdminGate {
    api: Arc<dyn AdminApi>,
    storage: SharedStore,
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl AdminGate {
    pub fn new(api: Arc<dyn AdminApi>, storage: SharedStore) -> Self {
        Self { api, storage }
    }

    pub fn is_authenticated(&self) -> bool {
        read_flag(self.storage.as_ref(), ADMIN_AUTH_KEY)
    }

    /// Submit `password`; returns whether the gate is now open.
    ///
    /// Rejections and request failures both close the gate.
    pub async fn login(&self, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        let accepted = match self.api.admin_login(password).await {
            Ok(accepted) => {
                if !accepted {
                    log::info!("admin password rejected");
                }
                accepted
            }
            Err(e) => {
                log::warn!("admin login failed: {e}");
                false
            }
        };
        write_flag(self.storage.as_ref(), ADMIN_AUTH_KEY, accepted);
        accepted
    }

    pub fn logout(&self) {
        write_flag(self.storage.as_ref(), ADMIN_AUTH_KEY, false);
    }
}
