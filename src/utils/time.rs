use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};

/// Accepted timestamp layouts, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
    /// `2006-01-02T15:04:05.999999999Z07:00`
    Rfc3339Nano,
    /// `2006-01-02T15:04:05`, optionally followed by a fraction
    Naive,
    /// `2006-01-02 15:04:05`, optionally followed by a fraction
    NaiveSpace,
    /// `2006-01-02T15:04:05.000Z`
    Millis,
    /// `2006-01-02T15:04:05.000000Z`
    Micros,
}

impl TimestampFormat {
    pub const ALL: [TimestampFormat; 6] = [
        TimestampFormat::Rfc3339,
        TimestampFormat::Rfc3339Nano,
        TimestampFormat::Naive,
        TimestampFormat::NaiveSpace,
        TimestampFormat::Millis,
        TimestampFormat::Micros,
    ];

    /// Parses `input` strictly in this layout. Offset-less layouts are read as UTC.
    pub fn parse(self, input: &str) -> Option<DateTime<Utc>> {
        match self {
            TimestampFormat::Rfc3339 => parse_with_offset(input, false),
            TimestampFormat::Rfc3339Nano => parse_with_offset(input, true),
            TimestampFormat::Naive => parse_naive(input, "%Y-%m-%dT%H:%M:%S%.f"),
            TimestampFormat::NaiveSpace => parse_naive(input, "%Y-%m-%d %H:%M:%S%.f"),
            TimestampFormat::Millis => parse_naive(input, "%Y-%m-%dT%H:%M:%S.%3fZ"),
            TimestampFormat::Micros => parse_naive(input, "%Y-%m-%dT%H:%M:%S.%6fZ"),
        }
    }
}

fn parse_with_offset(input: &str, allow_fraction: bool) -> Option<DateTime<Utc>> {
    // chrono's RFC 3339 reader also takes a space or lowercase `t` as separator,
    // and a lowercase `z` designator
    let bytes = input.as_bytes();
    if bytes.get(10) != Some(&b'T') || bytes.last() == Some(&b'z') {
        return None;
    }
    if !allow_fraction && bytes.get(19) == Some(&b'.') {
        return None;
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive(input: &str, layout: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input, layout)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Tries every accepted layout in order and returns the first match.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    TimestampFormat::ALL
        .iter()
        .find_map(|format| format.parse(input))
}

/// Renders a timestamp in the canonical output layout, e.g. `2026-01-16T09:00:00Z`.
///
/// Every stored timestamp goes through here, so the text columns sort in
/// chronological order.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Drops sub-second precision, which the canonical layout cannot carry.
pub fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}
