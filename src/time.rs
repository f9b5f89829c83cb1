use crate::interval::IntervalError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

pub const MINUTES_PER_HOUR: u16 = 60;
pub const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Minutes since midnight, 0..=1440.
///
/// 1440 is permitted so an interval may end at the following midnight;
/// it is never a bookable instant itself.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(transparent)]
pub struct MinutesOfDay(pub(crate) u16);

impl MinutesOfDay {
    /// Construct from raw minutes past midnight.
    ///
    /// # Examples
    /// ```
    /// use termin::time::MinutesOfDay;
    ///
    /// assert_eq!(MinutesOfDay::new(600).unwrap().get(), 600);
    /// assert!(MinutesOfDay::new(1441).is_err());
    /// ```
    pub fn new(minutes: u16) -> Result<MinutesOfDay, IntervalError> {
        if minutes > MINUTES_PER_DAY {
            Err(IntervalError::InvalidMinutes(minutes))
        } else {
            Ok(MinutesOfDay(minutes))
        }
    }

    /// Parses an `HH:MM` time string, the format submitted by the
    /// interval configuration form.
    ///
    /// # Examples
    /// ```
    /// use termin::time::MinutesOfDay;
    ///
    /// assert_eq!(MinutesOfDay::parse("08:00").unwrap().get(), 480);
    /// assert_eq!(MinutesOfDay::parse("18:30").unwrap().get(), 1110);
    /// assert!(MinutesOfDay::parse("8 o'clock").is_err());
    /// assert!(MinutesOfDay::parse("12:75").is_err());
    /// ```
    pub fn parse(time: &str) -> Result<MinutesOfDay, IntervalError> {
        let invalid = || IntervalError::InvalidTime(time.to_string());

        let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

        if hours > 24 || minutes > 59 {
            return Err(invalid());
        }

        MinutesOfDay::new(hours * MINUTES_PER_HOUR + minutes)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn hour_aligned(self) -> bool {
        self.0 % MINUTES_PER_HOUR == 0
    }

    /// Converts to the whole hour this value sits on.
    ///
    /// Configured intervals are required to be hour-aligned; a value
    /// partway through an hour is an error here rather than silently
    /// truncated.
    ///
    /// # Examples
    /// ```
    /// use termin::time::{HourOfDay, MinutesOfDay};
    ///
    /// let ten = MinutesOfDay::new(600).unwrap();
    /// assert_eq!(ten.to_hour().unwrap(), HourOfDay::new(10).unwrap());
    ///
    /// let half_past = MinutesOfDay::new(630).unwrap();
    /// assert!(half_past.to_hour().is_err());
    /// ```
    pub fn to_hour(self) -> Result<HourOfDay, IntervalError> {
        if !self.hour_aligned() {
            return Err(IntervalError::NotHourAligned(self.0));
        }

        HourOfDay::new((self.0 / MINUTES_PER_HOUR) as u8)
    }
}

impl fmt::Display for MinutesOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.0 / MINUTES_PER_HOUR,
            self.0 % MINUTES_PER_HOUR
        )
    }
}

/// A whole hour of the day, 0..=23. The granularity of every bookable slot.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(transparent)]
pub struct HourOfDay(pub(crate) u8);

impl HourOfDay {
    /// # Examples
    /// ```
    /// use termin::time::HourOfDay;
    ///
    /// assert!(HourOfDay::new(23).is_ok());
    /// assert!(HourOfDay::new(24).is_err());
    /// ```
    pub fn new(hour: u8) -> Result<HourOfDay, IntervalError> {
        if hour > 23 {
            Err(IntervalError::InvalidHour(hour))
        } else {
            Ok(HourOfDay(hour))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl PartialEq<u8> for HourOfDay {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Day of the week, numbered 0 (Sunday) through 6 (Saturday) on the wire.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum WeekDay {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl WeekDay {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl From<WeekDay> for u8 {
    fn from(week_day: WeekDay) -> u8 {
        week_day as u8
    }
}

impl TryFrom<u8> for WeekDay {
    type Error = IntervalError;

    fn try_from(value: u8) -> Result<WeekDay, IntervalError> {
        match value {
            0 => Ok(WeekDay::Sunday),
            1 => Ok(WeekDay::Monday),
            2 => Ok(WeekDay::Tuesday),
            3 => Ok(WeekDay::Wednesday),
            4 => Ok(WeekDay::Thursday),
            5 => Ok(WeekDay::Friday),
            6 => Ok(WeekDay::Saturday),
            _ => Err(IntervalError::InvalidWeekDay(value)),
        }
    }
}

impl From<NaiveDate> for WeekDay {
    /// The weekday a calendar date falls on.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use termin::time::WeekDay;
    ///
    /// let date = NaiveDate::from_ymd_opt(2022, 9, 22).unwrap();
    /// assert_eq!(WeekDay::from(date), WeekDay::Thursday);
    /// ```
    fn from(date: NaiveDate) -> WeekDay {
        match date.weekday().num_days_from_sunday() {
            0 => WeekDay::Sunday,
            1 => WeekDay::Monday,
            2 => WeekDay::Tuesday,
            3 => WeekDay::Wednesday,
            4 => WeekDay::Thursday,
            5 => WeekDay::Friday,
            _ => WeekDay::Saturday,
        }
    }
}
