//! Calendar helpers for the Monday-to-Thursday ordering week.
//!
//! Weeks start on Monday. A Sunday belongs to the week that began the Monday
//! before it, so ordering on a Sunday still shows the week just finished.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::macros::format_description;
use time::{Date, Duration, Weekday};

use crate::net::types::OrderDay;

pub fn monday_of(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

pub fn thursday_of(date: Date) -> Date {
    day_date(monday_of(date), OrderDay::Thursday)
}

/// The date of `day` in the week starting `monday`.
pub fn day_date(monday: Date, day: OrderDay) -> Date {
    monday + Duration::days(i64::from(day.offset()))
}

pub fn order_day_of(date: Date) -> Option<OrderDay> {
    match date.weekday() {
        Weekday::Monday => Some(OrderDay::Monday),
        Weekday::Tuesday => Some(OrderDay::Tuesday),
        Weekday::Wednesday => Some(OrderDay::Wednesday),
        Weekday::Thursday => Some(OrderDay::Thursday),
        _ => None,
    }
}

/// Zero-padded `YYYY-MM-DD`.
pub fn format_iso(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

pub fn parse_iso(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Today's date: the browser's local calendar day, or UTC natively.
pub fn today() -> Date {
    #[cfg(feature = "csr")]
    {
        browser_today()
    }
    #[cfg(not(feature = "csr"))]
    {
        time::OffsetDateTime::now_utc().date()
    }
}

#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation)]
fn browser_today() -> Date {
    let now = js_sys::Date::new_0();
    let year = i32::try_from(now.get_full_year()).ok();
    let month = u8::try_from(now.get_month() + 1)
        .ok()
        .and_then(|m| time::Month::try_from(m).ok());
    let day = u8::try_from(now.get_date()).ok();
    if let (Some(year), Some(month), Some(day)) = (year, month, day) {
        if let Ok(date) = Date::from_calendar_date(year, month, day) {
            return date;
        }
    }
    let secs = (now.get_time() / 1000.0) as i64;
    time::OffsetDateTime::from_unix_timestamp(secs).map_or(Date::MIN, |t| t.date())
}

pub fn today_iso() -> String {
    format_iso(today())
}

/// Monday of the current week as `YYYY-MM-DD`.
pub fn monday_date() -> String {
    format_iso(monday_of(today()))
}

/// Thursday of the current week as `YYYY-MM-DD`.
pub fn thursday_date() -> String {
    format_iso(thursday_of(today()))
}
