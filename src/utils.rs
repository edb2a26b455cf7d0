use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Renders timestamps as `2020-07-09T20:11:00.000Z`.
pub fn serialize_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = date.to_rfc3339_opts(SecondsFormat::Millis, true);
    serializer.serialize_str(&s)
}

/// Parses a fixed RFC 3339 timestamp, falling back to the epoch.
pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|date| date.with_timezone(&Utc))
        .unwrap_or_default()
}
