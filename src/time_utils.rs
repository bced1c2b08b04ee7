// SPDX-License-Identifier: MIT

//! Shared helpers for date/time handling.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current UTC calendar date.
///
/// The HTTP layer resolves "today" before handing dates to the aggregators,
/// which only ever see plain calendar dates.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
