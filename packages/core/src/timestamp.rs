//! Timestamp normalization for submitted record times.
//!
//! Callers submit times in whatever interchange format their client
//! produces; storage holds one fixed representation. The conversion keeps
//! the wall-clock fields the sender wrote: an explicit UTC offset is parsed
//! and then dropped, so `2024-01-01T10:00:00+08:00` stores as
//! `2024-01-01 10:00:00` on every server, in every timezone. Shifting to
//! UTC here would make the displayed time disagree with what the caregiver
//! typed.

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

/// The fixed storage representation: zero-padded local calendar fields.
pub const STORAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive formats accepted in addition to RFC 3339 and RFC 2822.
/// Seconds default to `:00` where the format omits them.
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Error returned when a submitted time matches no accepted format.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unparseable date-time: {0:?}")]
pub struct TimestampError(pub String);

/// Convert a submitted time into the fixed storage representation.
///
/// Accepted inputs, tried in order:
/// 1. RFC 3339 / ISO 8601 with an explicit offset or `Z`, with or without
///    fractional seconds. The offset is dropped after parsing; the sender's
///    own calendar fields are kept.
/// 2. RFC 2822 (`Mon, 01 Jan 2024 10:00:00 +0800`), same offset handling.
/// 3. The naive forms in [`NAIVE_FORMATS`], taken verbatim.
///
/// The result is always `YYYY-MM-DD HH:MM:SS`.
pub fn normalize_timestamp(raw: &str) -> Result<String, TimestampError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local().format(STORAGE_TIME_FORMAT).to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Ok(dt.naive_local().format(STORAGE_TIME_FORMAT).to_string());
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.format(STORAGE_TIME_FORMAT).to_string());
        }
    }

    Err(TimestampError(raw.to_string()))
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_dropped_not_shifted() {
        assert_eq!(
            normalize_timestamp("2024-01-01T10:00:00+08:00").unwrap(),
            "2024-01-01 10:00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-01-01T10:00:00-05:00").unwrap(),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn utc_suffix_keeps_utc_fields() {
        assert_eq!(
            normalize_timestamp("2024-06-30T23:59:59Z").unwrap(),
            "2024-06-30 23:59:59"
        );
    }

    #[test]
    fn fractional_seconds_are_truncated() {
        assert_eq!(
            normalize_timestamp("2024-01-01T10:00:00.123+08:00").unwrap(),
            "2024-01-01 10:00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-01-01 10:00:00.5").unwrap(),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn naive_input_passes_through_zero_padded() {
        assert_eq!(
            normalize_timestamp("2024-01-01 10:00:00").unwrap(),
            "2024-01-01 10:00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-1-1 9:05").unwrap(),
            "2024-01-01 09:05:00"
        );
        assert_eq!(
            normalize_timestamp("2024/01/01 09:05").unwrap(),
            "2024-01-01 09:05:00"
        );
    }

    #[test]
    fn minutes_only_forms_get_zero_seconds() {
        assert_eq!(
            normalize_timestamp("2024-01-01T10:00").unwrap(),
            "2024-01-01 10:00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-01-01 10:00").unwrap(),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn rfc2822_is_accepted() {
        assert_eq!(
            normalize_timestamp("Mon, 1 Jan 2024 10:00:00 +0800").unwrap(),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(
            normalize_timestamp("  2024-01-01T10:00:00+08:00  ").unwrap(),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(normalize_timestamp("not a time").is_err());
        assert!(normalize_timestamp("2024-13-01 10:00:00").is_err());
        assert!(normalize_timestamp("").is_err());
    }
}
