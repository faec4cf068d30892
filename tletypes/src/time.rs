use chrono::{DateTime, SecondsFormat, Utc};

pub type UtcTimestamp = DateTime<Utc>;

/// ISO-8601 UTC with millisecond precision, e.g. `2025-10-05T11:57:08.972Z`
pub fn iso8601(t: &UtcTimestamp) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
