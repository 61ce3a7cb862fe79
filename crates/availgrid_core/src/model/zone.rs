//! Display zone used to interpret UTC slot timestamps.
//!
//! Day labels, prompt times, period-of-day filters and readable output all
//! read wall-clock values through one `DisplayZone`, so a grid is classified
//! consistently from ingestion to confirmation.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const LOCAL_ZONE_NAME: &str = "local";
const TIME_FORMAT: &str = "%-I:%M %p";
const WEEKDAY_FORMAT: &str = "%A";
const FULL_DATE_FORMAT: &str = "%B %-d, %Y";
const SHORT_DATE_FORMAT: &str = "%A, %B %-d";

/// Zone in which wall-clock values are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// Host process local time.
    #[default]
    Local,
    /// Explicit IANA zone.
    Named(Tz),
}

/// Unknown zone name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneParseError {
    pub value: String,
}

impl Display for ZoneParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown time zone `{}`; expected `local` or an IANA name like `America/New_York`",
            self.value
        )
    }
}

impl Error for ZoneParseError {}

impl FromStr for DisplayZone {
    type Err = ZoneParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(LOCAL_ZONE_NAME) {
            return Ok(Self::Local);
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ZoneParseError {
                value: trimmed.to_string(),
            })
    }
}

impl Display for DisplayZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str(LOCAL_ZONE_NAME),
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl DisplayZone {
    /// Wall-clock date and time of `timestamp`, or `None` when out of range.
    pub fn wall_clock(&self, timestamp: i64) -> Option<NaiveDateTime> {
        let utc: DateTime<Utc> = DateTime::from_timestamp(timestamp, 0)?;
        Some(match self {
            Self::Local => utc.with_timezone(&Local).naive_local(),
            Self::Named(tz) => utc.with_timezone(tz).naive_local(),
        })
    }

    /// Wall-clock hour in `0..24`.
    pub fn hour(&self, timestamp: i64) -> Option<u32> {
        self.wall_clock(timestamp).map(|dt| dt.hour())
    }

    /// Calendar date the timestamp falls on.
    pub fn calendar_date(&self, timestamp: i64) -> Option<NaiveDate> {
        self.wall_clock(timestamp).map(|dt| dt.date())
    }

    /// `9:15 AM` style time. Falls back to the raw number when out of range.
    pub fn time_label(&self, timestamp: i64) -> String {
        self.format_or_raw(timestamp, TIME_FORMAT)
    }

    /// `Monday` style weekday name.
    pub fn weekday_name(&self, timestamp: i64) -> String {
        self.format_or_raw(timestamp, WEEKDAY_FORMAT)
    }

    /// `January 6, 2025` style date label.
    pub fn full_date_label(&self, timestamp: i64) -> String {
        self.format_or_raw(timestamp, FULL_DATE_FORMAT)
    }

    /// `Monday, January 6` style heading used for confirmation output.
    pub fn short_date_label(date: NaiveDate) -> String {
        date.format(SHORT_DATE_FORMAT).to_string()
    }

    fn format_or_raw(&self, timestamp: i64, pattern: &str) -> String {
        match self.wall_clock(timestamp) {
            Some(dt) => dt.format(pattern).to_string(),
            None => timestamp.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayZone;

    // 2025-01-06T07:00:00Z, a Monday.
    const MONDAY_7AM_UTC: i64 = 1_736_146_800;

    #[test]
    fn parses_local_and_iana_names() {
        assert_eq!("local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!(" LOCAL ".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!("".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        let zone = "America/New_York".parse::<DisplayZone>().unwrap();
        assert_eq!(zone.to_string(), "America/New_York");
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = "Mars/Olympus".parse::<DisplayZone>().unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn named_zone_formats_wall_clock_values() {
        let utc = DisplayZone::Named(chrono_tz::UTC);
        assert_eq!(utc.hour(MONDAY_7AM_UTC), Some(7));
        assert_eq!(utc.time_label(MONDAY_7AM_UTC), "7:00 AM");
        assert_eq!(utc.weekday_name(MONDAY_7AM_UTC), "Monday");
        assert_eq!(utc.full_date_label(MONDAY_7AM_UTC), "January 6, 2025");

        let new_york = DisplayZone::Named(chrono_tz::America::New_York);
        assert_eq!(new_york.hour(MONDAY_7AM_UTC), Some(2));
        assert_eq!(new_york.time_label(MONDAY_7AM_UTC), "2:00 AM");
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw_value() {
        let utc = DisplayZone::Named(chrono_tz::UTC);
        assert_eq!(utc.hour(i64::MAX), None);
        assert_eq!(utc.time_label(i64::MAX), i64::MAX.to_string());
    }
}
