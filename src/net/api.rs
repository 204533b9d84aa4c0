//! REST API client for the lunch-order server.
//!
//! Browser (csr): real HTTP calls via `gloo-net`, sending the session cookie
//! with every request.
//! Native builds: every call returns [`ApiError::Unavailable`] since the
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so a failed call degrades
//! the page that made it without taking the app down.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    AdminLoginResponse, ApiResult, ClaimedDonation, DonationClaimCreate, DonationClaimSummary, DonationCreate,
    DonationRequestCreate, DonationRequestSummary, LoginRedirect, Meal, MealOrder, MealOrderCreate, MealUpload,
    UnclaimedDonation, User,
};
use crate::config::ClientConfig;

pub const ME_PATH: &str = "/Api/Me";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const LOGIN_PATH: &str = "/Api/Auth/Login";
pub const ADMIN_LOGIN_PATH: &str = "/Api/Admin/Login";
pub const MEAL_PATH: &str = "/Api/Meal";
pub const MEAL_TODAY_PATH: &str = "/Api/Meal/Today";
pub const MEAL_UPLOAD_PATH: &str = "/Api/Meal/Upload";
pub const DONATION_PATH: &str = "/Api/Donation";
pub const DONATION_CLAIM_PATH: &str = "/Api/Donation/Claim";
pub const DONATION_REQUEST_PATH: &str = "/Api/DonationRequest";
pub const DONATION_REQUEST_USER_PATH: &str = "/Api/DonationRequest/User";
pub const MEAL_ORDER_PATH: &str = "/Api/MealOrder";
pub const CLAIMS_SUMMARY_PATH: &str = "/Api/Stats/Claims/Summary";

/// Typed handle over the server's HTTP surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    #[cfg(any(test, feature = "csr"))]
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Fetch the signed-in user from `GET /Api/Me`.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, or undecodable body.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let body = self.get_text(ME_PATH, &[]).await?;
        decode(&body)
    }

    /// Ask the server to drop the session cookie via `POST /auth/logout`.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-2xx status.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post_empty(LOGOUT_PATH).await.map(|_| ())
    }

    /// Identity-provider URL to send the browser to, from `GET /Api/Auth/Login`.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, or a body without `auth_url`.
    pub async fn login_redirect(&self) -> Result<String, ApiError> {
        let body = self.get_text(LOGIN_PATH, &[]).await?;
        let redirect: LoginRedirect = decode(&body)?;
        Ok(redirect.auth_url)
    }

    /// Check the shared admin password via `POST /Api/Admin/Login`.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, or undecodable body.
    pub async fn admin_login(&self, password: &str) -> Result<bool, ApiError> {
        let payload = serde_json::json!({ "password": password });
        let body = self.post_json(ADMIN_LOGIN_PATH, &payload).await?;
        let response: AdminLoginResponse = decode(&body)?;
        Ok(response.data.authenticated)
    }

    // =========================================================================
    // MEALS
    // =========================================================================

    /// Meals served between two ISO dates, inclusive.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn meals(&self, start_date: &str, end_date: &str) -> Result<Vec<Meal>, ApiError> {
        let body = self
            .get_text(MEAL_PATH, &[("startDate", start_date), ("endDate", end_date)])
            .await?;
        Ok(decode_envelope(&body)?.unwrap_or_default())
    }

    /// Meals served today.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn meals_today(&self) -> Result<Vec<Meal>, ApiError> {
        let body = self.get_text(MEAL_TODAY_PATH, &[]).await?;
        Ok(decode_envelope(&body)?.unwrap_or_default())
    }

    /// Upload a `date,description` CSV menu (admin only).
    ///
    /// # Errors
    ///
    /// Any transport failure or error status, including a rejected CSV.
    pub async fn upload_meals(&self, csv: &str) -> Result<(), ApiError> {
        let body = self.post_json(MEAL_UPLOAD_PATH, &MealUpload { csv: csv.to_owned() }).await?;
        decode_envelope::<serde_json::Value>(&body).map(|_| ())
    }

    // =========================================================================
    // DONATIONS
    // =========================================================================

    /// Donate one of today's meals.
    ///
    /// # Errors
    ///
    /// Any transport failure or error status.
    pub async fn donate(&self, donation: &DonationCreate) -> Result<(), ApiError> {
        let body = self.post_json(DONATION_PATH, donation).await?;
        decode_envelope::<serde_json::Value>(&body).map(|_| ())
    }

    /// Today's donations nobody has claimed yet.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn unclaimed_donations(&self) -> Result<Vec<UnclaimedDonation>, ApiError> {
        let body = self.get_text(DONATION_PATH, &[]).await?;
        Ok(decode_envelope(&body)?.unwrap_or_default())
    }

    /// Claim a donated meal for `claim.name`.
    ///
    /// # Errors
    ///
    /// Any transport failure or error status (already claimed, unknown id).
    pub async fn claim_donation(&self, claim: &DonationClaimCreate) -> Result<(), ApiError> {
        let body = self.post_json(DONATION_CLAIM_PATH, claim).await?;
        decode_envelope::<serde_json::Value>(&body).map(|_| ())
    }

    /// The donation `name` has claimed today, if any.
    ///
    /// # Errors
    ///
    /// Any transport failure or error status other than 404.
    pub async fn donation_claim(&self, name: &str) -> Result<Option<ClaimedDonation>, ApiError> {
        match self.get_text(DONATION_CLAIM_PATH, &[("name", name)]).await {
            Ok(body) => decode_envelope(&body),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Admin view of today's (or `date`'s) donations and who claimed them.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn claims_summary(&self, date: Option<&str>) -> Result<Vec<DonationClaimSummary>, ApiError> {
        let query: Vec<(&str, &str)> = date.map(|d| ("date", d)).into_iter().collect();
        let body = self.get_text(CLAIMS_SUMMARY_PATH, &query).await?;
        Ok(decode_envelope(&body)?.unwrap_or_default())
    }

    // =========================================================================
    // DONATION REQUESTS
    // =========================================================================

    /// Ask to be matched with a future donation of any of `request.meal_ids`.
    ///
    /// # Errors
    ///
    /// Any transport failure or error status.
    pub async fn create_donation_request(&self, request: &DonationRequestCreate) -> Result<(), ApiError> {
        let body = self.post_json(DONATION_REQUEST_PATH, request).await?;
        decode_envelope::<serde_json::Value>(&body).map(|_| ())
    }

    /// All requests still waiting for a donation.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn pending_donation_requests(&self) -> Result<Vec<DonationRequestSummary>, ApiError> {
        let body = self.get_text(DONATION_REQUEST_PATH, &[]).await?;
        Ok(decode_envelope(&body)?.unwrap_or_default())
    }

    /// Requests made by `name`, optionally limited to one day.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn user_donation_requests(
        &self,
        name: &str,
        date: Option<&str>,
    ) -> Result<Vec<DonationRequestSummary>, ApiError> {
        let mut query = vec![("name", name)];
        if let Some(date) = date {
            query.push(("date", date));
        }
        let body = self.get_text(DONATION_REQUEST_USER_PATH, &query).await?;
        Ok(decode_envelope(&body)?.unwrap_or_default())
    }

    // =========================================================================
    // MEAL ORDERS
    // =========================================================================

    /// Place the weekly order. The server answers 409 when one already exists.
    ///
    /// # Errors
    ///
    /// Any transport failure or error status.
    pub async fn create_meal_order(&self, order: &MealOrderCreate) -> Result<(), ApiError> {
        let body = self.post_json(MEAL_ORDER_PATH, order).await?;
        decode_envelope::<serde_json::Value>(&body).map(|_| ())
    }

    /// The signed-in user's order for the week starting `week_start_date`.
    ///
    /// # Errors
    ///
    /// Any transport failure, error status, or undecodable envelope.
    pub async fn meal_order(&self, week_start_date: &str) -> Result<Option<MealOrder>, ApiError> {
        let body = self
            .get_text(MEAL_ORDER_PATH, &[("weekStartDate", week_start_date)])
            .await?;
        decode_envelope(&body)
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::get(&self.endpoint(path))
                .query(query.iter().copied())
                .credentials(web_sys::RequestCredentials::Include)
                .build();
            dispatch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (path, query);
            Err(ApiError::Unavailable)
        }
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&self.endpoint(path))
                .credentials(web_sys::RequestCredentials::Include)
                .json(body);
            dispatch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (path, body);
            Err(ApiError::Unavailable)
        }
    }

    async fn post_empty(&self, path: &str) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&self.endpoint(path))
                .credentials(web_sys::RequestCredentials::Include)
                .build();
            dispatch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
async fn dispatch(request: Result<gloo_net::http::Request, gloo_net::Error>) -> Result<String, ApiError> {
    let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
    let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::from_status(status, &body));
    }
    Ok(body)
}

/// Decode a raw JSON body.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode an [`ApiResult`] envelope and return its `data`.
///
/// An empty body is treated as "no data". An envelope that reports an error
/// is turned into [`ApiError::Status`] even when the HTTP status was 2xx.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let result: ApiResult<T> = decode(body)?;
    if result.status_code >= 400 || !result.error.is_empty() {
        return Err(ApiError::Status { status: result.status_code, message: result.error });
    }
    Ok(result.data)
}
