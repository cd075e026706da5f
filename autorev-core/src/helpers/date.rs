//! Timestamp parsing for `VCS_DATE`.

use chrono::{DateTime, FixedOffset};

/// ISO 8601 with a colon-less offset, which is what autorevision writes.
const ISO8601_COMPACT_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse an RFC 3339 timestamp, keeping its UTC offset.
///
/// Also accepts offsets written without a colon (`2016-05-13T11:14:55-0700`).
/// Returns `None` for anything else.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, ISO8601_COMPACT_OFFSET))
        .ok()
}
