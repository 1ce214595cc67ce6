// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time as RFC3339, for storage timestamps.
pub fn now_utc_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Format a timestamp as a 12-hour clock string without a leading zero
/// ("9:30 AM"), the form the planner service expects.
pub fn format_clock_12h(date: DateTime<FixedOffset>) -> String {
    date.format("%-I:%M %p").to_string()
}
