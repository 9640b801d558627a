//! Timestamp formatting for the preamble
//!
//! Supports a short wall-clock format (the default, suited to interactive
//! terminals), ISO 8601, RFC 3339, Unix timestamps, and custom strftime formats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Rendered in place of the timestamp when a record carries no time
pub const NO_TIME: &str = "(no time)";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_attr_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Clock;
/// let text = format.format(&Utc::now());
/// // Output: "10:30:45.123"
/// assert_eq!(text.len(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Time of day with milliseconds: `10:30:45.123`
    #[default]
    Clock,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use rust_attr_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%Y-%m-%d %H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// A custom format with invalid strftime items renders as the raw format
    /// string; use [`TimestampFormat::try_format`] to detect that case.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self.try_format(datetime) {
            Ok(text) => text,
            Err(_) => match self {
                TimestampFormat::Custom(format_str) => format_str.clone(),
                _ => String::new(),
            },
        }
    }

    /// Format a `DateTime<Utc>`, failing on invalid custom strftime items
    pub fn try_format(&self, datetime: &DateTime<Utc>) -> Result<String, fmt::Error> {
        let mut out = String::new();
        match self {
            TimestampFormat::Clock => write!(out, "{}", datetime.format("%H:%M:%S%.3f"))?,
            TimestampFormat::Iso8601 => write!(out, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ"))?,
            TimestampFormat::Iso8601Micros => {
                write!(out, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?
            }
            TimestampFormat::Rfc3339 => out.push_str(&datetime.to_rfc3339()),
            TimestampFormat::Unix => write!(out, "{}", datetime.timestamp())?,
            TimestampFormat::UnixMillis => write!(out, "{}", datetime.timestamp_millis())?,
            TimestampFormat::Custom(format_str) => write!(out, "{}", datetime.format(format_str))?,
        }
        Ok(out)
    }

    /// Format an optional time, falling back to [`NO_TIME`]
    pub fn try_format_opt(&self, datetime: Option<&DateTime<Utc>>) -> Result<String, fmt::Error> {
        match datetime {
            Some(datetime) => self.try_format(datetime),
            None => Ok(NO_TIME.to_string()),
        }
    }
}
