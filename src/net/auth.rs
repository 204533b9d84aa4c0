//! Auth-facing seams over the HTTP client.
//!
//! DESIGN
//! ======
//! The session store and admin gate only need a couple of calls each. Keeping
//! them behind traits lets the browser build use [`ApiClient`] while tests
//! drive the stores with scripted fakes.

use async_trait::async_trait;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::User;

/// Identity calls used by [`crate::state::session::SessionStore`].
#[async_trait(?Send)]
pub trait AuthApi: Send + Sync {
    /// Fetch the profile bound to the current session cookie.
    async fn fetch_identity(&self) -> Result<User, ApiError>;

    /// Ask the server to invalidate the current session.
    async fn invalidate_session(&self) -> Result<(), ApiError>;
}

/// Shared-password check used by [`crate::state::admin_gate::AdminGate`].
#[async_trait(?Send)]
pub trait AdminApi: Send + Sync {
    async fn admin_login(&self, password: &str) -> Result<bool, ApiError>;
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn fetch_identity(&self) -> Result<User, ApiError> {
        self.current_user().await
    }

    async fn invalidate_session(&self) -> Result<(), ApiError> {
        self.logout().await
    }
}

#[async_trait(?Send)]
impl AdminApi for ApiClient {
    async fn admin_login(&self, password: &str) -> Result<bool, ApiError> {
        ApiClient::admin_login(self, password).await
    }
}
