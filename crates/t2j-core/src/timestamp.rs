//! Timestamp parsing and rendering.
//!
//! Export files and the Jira API spell the same instant in different ways.
//! Everything is normalised to `DateTime<Utc>` on the way in so that
//! duplicate detection can compare instants instead of strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Error returned when a timestamp string matches none of the accepted forms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognised timestamp: {value:?}")]
pub struct TimestampError {
    value: String,
}

/// Offset-carrying forms that RFC 3339 parsing rejects, notably the
/// colon-less zone Jira emits (`2023-01-01T09:00:00.000+0000`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Forms with no zone at all; these are taken to mean UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a timestamp in any of the accepted textual forms.
///
/// Tried in order: RFC 3339, offset forms without a colon in the zone, and
/// naive date-times (`T` or space separated, optional fractional seconds)
/// which are interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc());
        }
    }

    Err(TimestampError {
        value: value.to_string(),
    })
}

/// Renders an instant the way the Jira v2 worklog API requires it,
/// e.g. `2023-01-01T09:00:00.000+0000`.
pub fn to_jira_format(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}
