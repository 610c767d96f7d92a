//! Wall-clock time handling for scheduled legs.
//!
//! Timetables give departures as "HH:MM" times of day. This module provides
//! a validated time-of-day type plus the arithmetic that places such a time
//! on a monotonic minute axis, handling services boarded on a later day when
//! a connection is missed.
//!
//! Inside the search everything is an absolute minute (`i64`, counted from
//! midnight of day 0); conversion to time-of-day happens only at display
//! boundaries.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

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

/// A time of day with minute precision, in `00:00..=23:59`.
///
/// Scheduled legs repeat daily, so their endpoints are pure times of day.
/// The absolute day a leg is actually boarded on is decided during the
/// search (see [`TimeOfDay::next_departure_after`]).
///
/// # Examples
///
/// ```
/// use intercity::domain::TimeOfDay;
///
/// let dep = TimeOfDay::parse_hhmm("08:30").unwrap();
/// assert_eq!(dep.to_string(), "08:30");
/// assert_eq!(dep.minutes_from_midnight(), 510);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };

    /// Create a time of day from hour and minute components.
    pub fn new(hour: u16, minute: u16) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use intercity::domain::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse_hhmm("00:00").is_ok());
    /// assert!(TimeOfDay::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(TimeOfDay::parse_hhmm("1430").is_err());
    /// assert!(TimeOfDay::parse_hhmm("24:00").is_err());
    /// assert!(TimeOfDay::parse_hhmm("12:60").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::new(hour, minute)
    }

    /// The time of day at an absolute minute on the monotonic axis.
    ///
    /// Absolute minutes wrap every [`MINUTES_PER_DAY`]; negative inputs are
    /// folded into day 0 as well.
    pub fn from_absolute(minute: i64) -> Self {
        Self {
            minutes: minute.rem_euclid(MINUTES_PER_DAY) as u16,
        }
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u16 {
        self.minutes / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u16 {
        self.minutes % 60
    }

    /// Minutes since midnight (0-1439).
    pub fn minutes_from_midnight(&self) -> u16 {
        self.minutes
    }

    /// Minutes from this time of day to `arrival`, treating `arrival` as the
    /// next occurrence of that wall-clock time.
    ///
    /// An arrival earlier in the day than the departure is an overnight leg
    /// and wraps into the next day; equal endpoints give zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use intercity::domain::TimeOfDay;
    ///
    /// let dep = TimeOfDay::parse_hhmm("23:30").unwrap();
    /// let arr = TimeOfDay::parse_hhmm("01:00").unwrap();
    /// assert_eq!(dep.duration_until(arr), 90);
    /// assert_eq!(dep.duration_until(dep), 0);
    /// ```
    pub fn duration_until(&self, arrival: TimeOfDay) -> i64 {
        (i64::from(arrival.minutes) - i64::from(self.minutes)).rem_euclid(MINUTES_PER_DAY)
    }

    /// The earliest absolute minute at which a leg departing daily at this
    /// time of day can be boarded, given the current arrival minute and the
    /// leg's minimum connection time.
    ///
    /// The boarding instant is the smallest `t` with
    /// `t mod 1440 == self` and `t >= arrival_minute + min_wait`: today's
    /// instance if it is still catchable, otherwise tomorrow's.
    pub fn next_departure_after(&self, arrival_minute: i64, min_wait: i64) -> i64 {
        let earliest_boarding = arrival_minute + min_wait;
        let day = arrival_minute.div_euclid(MINUTES_PER_DAY);
        let today = day * MINUTES_PER_DAY + i64::from(self.minutes);

        if today >= earliest_boarding {
            today
        } else {
            today + MINUTES_PER_DAY
        }
    }

    /// Converts to a `chrono::NaiveTime`.
    pub fn to_naive_time(&self) -> NaiveTime {
        // Safe: minutes < 1440 by construction
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .expect("time of day is valid by construction")
    }

    /// Builds from a `chrono::NaiveTime`, discarding seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u16.
fn parse_two_digits(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some((d1 * 10 + d2) as u16)
}
