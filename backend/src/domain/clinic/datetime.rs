//! Lenient date-time parsing for request bodies and query strings.
//!
//! Accepted forms: `2024-05-01`, `2024-05-01T09:30`, `2024-05-01 09:30:00`,
//! fractional seconds, and RFC 3339 with an offset (converted to UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, de};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp without zone, or `None` if no accepted form matches.
///
/// # Examples
/// ```
/// use clinica_backend::domain::parse_datetime;
///
/// let at = parse_datetime("2024-05-01").expect("date only");
/// assert_eq!(at.to_string(), "2024-05-01 00:00:00");
/// ```
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `serde(deserialize_with)` adapter for optional lenient timestamps.
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_datetime(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date-time '{text}'"))),
    }
}
