//! Rendering of record timestamps for the `time` attribute.
//!
//! Timestamps are written as ISO 8601 with millisecond precision and an
//! explicit offset, e.g. `2024-03-15T10:30:00.000-07:00`. Within a single
//! fixed-offset zone these strings sort the same way as the instants do.

use crate::error::ConfigError;
use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, TimeDelta};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Zone used when rendering timestamps. Only affects the text, never the
/// instant being written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZoneSetting {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl TimeZoneSetting {
    /// Formats epoch milliseconds, or `None` if the instant or its local
    /// wall-clock time in this zone is out of range.
    pub fn format_millis(&self, millis: i64) -> Option<String> {
        let utc = DateTime::from_timestamp_millis(millis)?;
        let offset: FixedOffset = match self {
            TimeZoneSetting::Local => utc.with_timezone(&chrono::Local).offset().fix(),
            TimeZoneSetting::Utc => chrono::Utc.fix(),
            TimeZoneSetting::Fixed(offset) => *offset,
            TimeZoneSetting::Named(tz) => utc.with_timezone(tz).offset().fix(),
        };
        // chrono panics when rendering a local time past its range.
        utc.naive_utc()
            .checked_add_signed(TimeDelta::seconds(offset.local_minus_utc().into()))?;
        Some(
            utc.with_timezone(&offset)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl FromStr for TimeZoneSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || ConfigError::InvalidTimeZone {
            value: s.to_string(),
        };

        if value.eq_ignore_ascii_case("local") {
            return Ok(TimeZoneSetting::Local);
        }
        if value.eq_ignore_ascii_case("utc") || value == "Z" {
            return Ok(TimeZoneSetting::Utc);
        }
        if value.starts_with('+') || value.starts_with('-') {
            return parse_offset(value)
                .map(TimeZoneSetting::Fixed)
                .ok_or_else(invalid);
        }
        value
            .parse::<Tz>()
            .map(TimeZoneSetting::Named)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeZoneSetting {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeZoneSetting> for String {
    fn from(tz: TimeZoneSetting) -> Self {
        tz.to_string()
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSetting::Local => write!(f, "local"),
            TimeZoneSetting::Utc => write!(f, "UTC"),
            TimeZoneSetting::Fixed(offset) => write!(f, "{offset}"),
            TimeZoneSetting::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
