use crate::error::{Error, ScheduleResult};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Date format used for schedule keys and range inputs
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reduce an `HH:MM` or `HH:MM:SS` string to `HH:MM`.
///
/// Absent or empty input gives an empty string. Input with fewer than two
/// colon-separated parts is returned unchanged.
pub fn format_time_to_hhmm(time_str: Option<&str>) -> String {
    let time_str = match time_str {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };

    let mut parts = time_str.split(':');
    match (parts.next(), parts.next()) {
        (Some(hours), Some(minutes)) => format!("{}:{}", hours, minutes),
        _ => time_str.to_string(),
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Only the zero-padded form is accepted. Surrounding whitespace, unpadded
/// fields and other separators are rejected.
pub fn parse_iso_date(date_str: &str) -> ScheduleResult<NaiveDate> {
    let invalid = || Error::InvalidDate {
        input: date_str.to_string(),
    };

    // chrono's %m and %d accept a single digit
    let well_formed = date_str.len() == 10
        && date_str.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(date_str, ISO_DATE_FORMAT).map_err(|_| invalid())
}

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Today's calendar date in the given timezone
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Serde adapter storing a `NaiveDate` as `YYYY-MM-DD`
pub mod iso_date {
    use super::{format_iso_date, parse_iso_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_iso_date(&s).map_err(serde::de::Error::custom)
    }
}
