// SPDX-License-Identifier: MIT

//! Shared helpers for date/time handling.
//!
//! All calendar-day logic (streaks) uses UTC dates so that client and
//! server clocks cannot disagree about what "today" means.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current UTC calendar date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Current timestamp formatted for stored records.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}
