//! Schedule time handling for GTFS data.
//!
//! GTFS gives stop times as "HH:MM:SS" strings measured from midnight of the
//! service day. Hours may exceed 23 for trips that run past midnight, so
//! "25:30:00" is half past one on the following morning. This module keeps
//! those values as plain offsets from midnight and compares them against the
//! current time of day to find how long until a departure.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in one service day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day from a static schedule.
///
/// Stored as whole seconds since midnight of the service day. Values past
/// 24:00:00 are legal and sort after every same-day time.
///
/// # Examples
///
/// ```
/// use bus_server::domain::ScheduleTime;
///
/// let late = ScheduleTime::parse("25:30:00").unwrap();
/// let early = ScheduleTime::parse("01:30:00").unwrap();
/// assert_eq!(late.minutes(), early.minutes() + 1440.0);
/// assert_eq!(late.to_string(), "25:30");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime {
    seconds: u32,
}

impl ScheduleTime {
    /// Midnight at the start of the service day.
    pub const MIDNIGHT: Self = Self { seconds: 0 };

    /// Build a time from components. Minutes and seconds must be below 60.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if minutes > 59 || seconds > 59 {
            return None;
        }
        let total = hours
            .checked_mul(3600)?
            .checked_add(minutes * 60 + seconds)?;
        Some(Self { seconds: total })
    }

    /// Parse a time in "HH:MM:SS" or "HH:MM" format.
    ///
    /// Hours may have one or more digits and may exceed 23.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse("08:05:00").is_ok());
    /// assert!(ScheduleTime::parse("8:05:00").is_ok());
    /// assert!(ScheduleTime::parse("26:10").is_ok());
    ///
    /// assert!(ScheduleTime::parse("").is_err());
    /// assert!(ScheduleTime::parse("10:60:00").is_err());
    /// assert!(ScheduleTime::parse("ten past").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new("empty time"));
        }

        let mut parts = s.split(':');
        let hours = parse_component(parts.next()).ok_or_else(|| TimeError::new("invalid hour"))?;
        let minutes =
            parse_component(parts.next()).ok_or_else(|| TimeError::new("invalid minute"))?;
        let seconds = match parts.next() {
            Some(part) => {
                parse_component(Some(part)).ok_or_else(|| TimeError::new("invalid second"))?
            }
            None => 0,
        };
        if parts.next().is_some() {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hours, minutes, seconds).ok_or_else(|| TimeError::new("hour out of range"))
    }

    /// Seconds since midnight of the service day.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Fractional minutes since midnight of the service day.
    pub fn minutes(&self) -> f64 {
        f64::from(self.seconds) / 60.0
    }

    /// Minutes from `now_minutes` until this time next occurs.
    ///
    /// A time already passed today is taken to recur tomorrow, so the
    /// result is never negative for a `now_minutes` within the day.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_server::domain::ScheduleTime;
    ///
    /// let ten = ScheduleTime::parse("10:00:00").unwrap();
    /// assert_eq!(ten.minutes_until(500.0), 100.0);
    /// assert_eq!(ten.minutes_until(660.0), 1380.0);
    /// ```
    pub fn minutes_until(&self, now_minutes: f64) -> f64 {
        let mut scheduled = self.minutes();
        if scheduled < now_minutes {
            scheduled += MINUTES_PER_DAY;
        }
        scheduled - now_minutes
    }

    fn hours_part(&self) -> u32 {
        self.seconds / 3600
    }

    fn minutes_part(&self) -> u32 {
        (self.seconds / 60) % 60
    }

    fn seconds_part(&self) -> u32 {
        self.seconds % 60
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScheduleTime({:02}:{:02}:{:02})",
            self.hours_part(),
            self.minutes_part(),
            self.seconds_part()
        )
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours_part(), self.minutes_part())
    }
}

/// Fractional minutes since midnight for a wall-clock time.
pub fn minutes_since_midnight(time: NaiveTime) -> f64 {
    f64::from(time.hour()) * 60.0 + f64::from(time.minute()) + f64::from(time.second()) / 60.0
}

/// Parse one all-digit component of a time string.
fn parse_component(part: Option<&str>) -> Option<u32> {
    let part = part?;
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
