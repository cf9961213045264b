//! Timestamp normalization
//!
//! Metric collectors report RFC 3339 timestamps with up to nanosecond
//! precision. Time series deduplicate on the second, so every timestamp is
//! truncated and rendered in one canonical layout before comparison.
//!
//! The source offset is kept as-is: `2021-01-01T10:00:00.9+02:00` becomes
//! `2021-01-01T10:00:00`, not the UTC wall clock.
//!
//! Parsing is strict RFC 3339: an uppercase `T` separator, an uppercase `Z`
//! designator and no leap second. chrono's parser alone also takes a space
//! or lowercase letters, and second `60`.

use std::fmt::Write as _;

use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::{DateTime, FixedOffset, Timelike};

use crate::{Error, Result};

/// Canonical second-resolution layout (`YYYY-MM-DDTHH:MM:SS`).
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an RFC 3339 timestamp, keeping its offset.
///
/// # Errors
///
/// Returns [`Error::TimestampParse`] if `timestamp` is not RFC 3339.
pub fn parse_rfc3339(timestamp: &str) -> Result<DateTime<FixedOffset>> {
    let reject = |reason: String| Error::TimestampParse {
        timestamp: timestamp.to_string(),
        reason,
    };

    if timestamp.as_bytes().get(10) != Some(&b'T') {
        return Err(reject("expected 'T' between date and time".to_string()));
    }
    if timestamp.ends_with('z') {
        return Err(reject("UTC designator must be 'Z'".to_string()));
    }
    let parsed = DateTime::parse_from_rfc3339(timestamp).map_err(|e| reject(e.to_string()))?;
    // chrono encodes a leap second as nanoseconds >= 1e9
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(reject("leap second is out of range".to_string()));
    }
    Ok(parsed)
}

/// Normalize to the canonical second-resolution layout.
///
/// # Examples
///
/// ```rust
/// use trueno_trials::timestamp::normalize;
///
/// assert_eq!(
///     normalize("2021-01-01T00:00:00.987654321Z").unwrap(),
///     "2021-01-01T00:00:00"
/// );
/// assert!(normalize("yesterday").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::TimestampParse`] if `timestamp` is not RFC 3339.
pub fn normalize(timestamp: &str) -> Result<String> {
    normalize_with(timestamp, DEFAULT_TIME_FORMAT)
}

/// Normalize using a custom chrono strftime layout.
///
/// # Errors
///
/// Returns [`Error::TimestampParse`] if `timestamp` is not RFC 3339, or
/// [`Error::InvalidInput`] if `format` contains an unknown specifier.
pub fn normalize_with(timestamp: &str, format: &str) -> Result<String> {
    let parsed = parse_rfc3339(timestamp)?;
    let mut out = String::with_capacity(format.len() + 8);
    write!(out, "{}", parsed.format(format))
        .map_err(|_| Error::InvalidInput(format!("invalid time format '{format}'")))?;
    Ok(out)
}

/// Check that a strftime layout only contains known specifiers and renders
/// nothing finer than a second.
///
/// Normalized timestamps are the same-second dedup key, so fractional
/// specifiers (`%f`, `%.f`, `%.3f`, `%3f`, `%+`, ...) are refused.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for empty, malformed or sub-second layouts.
pub fn validate_format(format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(Error::InvalidInput("time format must not be empty".to_string()));
    }
    for item in StrftimeItems::new(format) {
        if matches!(item, Item::Error) {
            return Err(Error::InvalidInput(format!("invalid time format '{format}'")));
        }
        if is_sub_second(&item) {
            return Err(Error::InvalidInput(format!(
                "time format '{format}' renders fractional seconds"
            )));
        }
    }
    Ok(())
}

fn is_sub_second(item: &Item<'_>) -> bool {
    matches!(
        item,
        Item::Numeric(Numeric::Nanosecond, _)
            | Item::Fixed(
                Fixed::Nanosecond
                    | Fixed::Nanosecond3
                    | Fixed::Nanosecond6
                    | Fixed::Nanosecond9
                    | Fixed::RFC3339
                    | Fixed::Internal(_)
            )
    )
}
