//! Data-transfer objects for the lunch-order JSON API.
//!
//! DESIGN
//! ======
//! Field names mirror the server's camelCase JSON so serde round-trips stay
//! lossless. Optional profile fields default when the server omits them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// The signed-in user as returned by the identity endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The Go server embeds `gorm.Model`, which serializes the key as `ID`.
    #[serde(alias = "ID")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// Older servers report `role: "admin"` instead of `isAdmin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Whether either admin marker is set.
    pub fn has_admin_flag(&self) -> bool {
        self.is_admin || self.role.as_deref() == Some("admin")
    }

    /// First and last name when both are known, otherwise `name`.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => format!("{first} {last}"),
            _ => self.name.clone(),
        }
    }
}

/// Response of `GET /Api/Auth/Login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginRedirect {
    pub auth_url: String,
}

/// Response of `POST /Api/Admin/Login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdminLoginResponse {
    pub data: AdminLoginData,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdminLoginData {
    #[serde(default)]
    pub authenticated: bool,
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// Uniform `{ statusCode, error, data }` wrapper used by the `/Api` handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub status_code: u16,
    #[serde(default)]
    pub error: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

// =============================================================================
// MEALS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u64,
    pub description: String,
    /// ISO `YYYY-MM-DD` serving date.
    pub date: String,
}

/// Body of the admin CSV menu upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MealUpload {
    pub csv: String,
}

// =============================================================================
// DONATIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationCreate {
    pub meal_id: u64,
    pub donor_name: String,
}

/// A donated meal nobody has claimed yet.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnclaimedDonation {
    pub id: u64,
    pub description: String,
    pub donor_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationClaimCreate {
    pub donation_id: u64,
    pub name: String,
}

/// The donation a given claimant has already taken.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedDonation {
    pub id: u64,
    pub description: String,
    pub donor_name: String,
}

/// One row of the admin daily claims summary.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationClaimSummary {
    pub claimed: bool,
    pub description: String,
    pub donor_name: String,
    #[serde(default)]
    pub recipient_name: String,
}

// =============================================================================
// DONATION REQUESTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestCreate {
    pub requester_name: String,
    pub meal_ids: Vec<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationRequestStatus {
    Pending,
    Fulfilled,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl DonationRequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Waiting for a donation",
            Self::Fulfilled => "Fulfilled",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestSummary {
    pub id: u64,
    pub requester_name: String,
    /// Comma-separated descriptions of the acceptable meals.
    pub description: String,
    pub status: DonationRequestStatus,
}

// =============================================================================
// MEAL ORDERS
// =============================================================================

/// The four weekdays lunch can be ordered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl OrderDay {
    pub const ALL: [Self; 4] = [Self::Monday, Self::Tuesday, Self::Wednesday, Self::Thursday];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
        }
    }

    /// Days after Monday.
    pub fn offset(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
        }
    }
}

/// Body of `POST /Api/MealOrder`; one optional meal per weekday.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOrderCreate {
    pub week_start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday_meal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday_meal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday_meal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday_meal_id: Option<u64>,
}

impl MealOrderCreate {
    pub fn new(week_start_date: impl Into<String>) -> Self {
        Self { week_start_date: week_start_date.into(), ..Self::default() }
    }

    pub fn set(&mut self, day: OrderDay, meal_id: Option<u64>) {
        let slot = match day {
            OrderDay::Monday => &mut self.monday_meal_id,
            OrderDay::Tuesday => &mut self.tuesday_meal_id,
            OrderDay::Wednesday => &mut self.wednesday_meal_id,
            OrderDay::Thursday => &mut self.thursday_meal_id,
        };
        *slot = meal_id;
    }

    pub fn get(&self, day: OrderDay) -> Option<u64> {
        match day {
            OrderDay::Monday => self.monday_meal_id,
            OrderDay::Tuesday => self.tuesday_meal_id,
            OrderDay::Wednesday => self.wednesday_meal_id,
            OrderDay::Thursday => self.thursday_meal_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        OrderDay::ALL.iter().all(|day| self.get(*day).is_none())
    }
}

/// A placed weekly order as returned by `GET /Api/MealOrder`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOrder {
    pub id: u64,
    pub week_start_date: String,
    #[serde(default)]
    pub monday_meal: Option<Meal>,
    #[serde(default)]
    pub tuesday_meal: Option<Meal>,
    #[serde(default)]
    pub wednesday_meal: Option<Meal>,
    #[serde(default)]
    pub thursday_meal: Option<Meal>,
}

impl MealOrder {
    pub fn meal_for(&self, day: OrderDay) -> Option<&Meal> {
        match day {
            OrderDay::Monday => self.monday_meal.as_ref(),
            OrderDay::Tuesday => self.tuesday_meal.as_ref(),
            OrderDay::Wednesday => self.wednesday_meal.as_ref(),
            OrderDay::Thursday => self.thursday_meal.as_ref(),
        }
    }
}
