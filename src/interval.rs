use crate::time::{HourOfDay, MinutesOfDay, WeekDay, MINUTES_PER_HOUR};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Error, Debug, Clone, Eq, PartialEq)]
pub enum IntervalError {
    #[error("time of day must be within a single day, got {0} minutes past midnight")]
    InvalidMinutes(u16),
    #[error("hour of day must be 0 through 23, got {0}")]
    InvalidHour(u8),
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
    #[error("week day must be 0 (Sunday) through 6 (Saturday), got {0}")]
    InvalidWeekDay(u8),
    #[error("{0} minutes past midnight is not on an hour boundary")]
    NotHourAligned(u16),
    #[error("an interval must span at least one bookable hour")]
    TooShort,
    #[error("more than one interval configured for week day {}", .0.number())]
    DuplicateWeekDay(WeekDay),
    #[error("at least one week day must be enabled")]
    EmptySchedule,
}

/// A user's configured working hours for one day of the week.
///
/// Bounds are hour-aligned and span at least one hour; both rules are
/// enforced when the interval is configured, so the resolver never
/// re-validates them.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct WeeklyInterval {
    #[serde(rename = "weekDay")]
    pub week_day: WeekDay,
    #[serde(rename = "startTimeInMinutes")]
    pub start: MinutesOfDay,
    #[serde(rename = "endTimeInMinutes")]
    pub end: MinutesOfDay,
}

impl WeeklyInterval {
    /// Constructs a validated interval.
    ///
    /// # Examples
    /// ```
    /// use termin::interval::{IntervalError, WeeklyInterval};
    /// use termin::time::{MinutesOfDay, WeekDay};
    ///
    /// let interval = WeeklyInterval::new(
    ///     WeekDay::Monday,
    ///     MinutesOfDay::new(600).unwrap(),
    ///     MinutesOfDay::new(900).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(interval.start.get(), 600);
    ///
    /// // a zero-length interval cannot hold a one-hour slot
    /// assert_eq!(
    ///     WeeklyInterval::new(
    ///         WeekDay::Monday,
    ///         MinutesOfDay::new(600).unwrap(),
    ///         MinutesOfDay::new(600).unwrap(),
    ///     ),
    ///     Err(IntervalError::TooShort),
    /// );
    /// ```
    pub fn new(
        week_day: WeekDay,
        start: MinutesOfDay,
        end: MinutesOfDay,
    ) -> Result<WeeklyInterval, IntervalError> {
        let interval = WeeklyInterval {
            week_day,
            start,
            end,
        };
        interval.validate()?;

        Ok(interval)
    }

    /// Convenience constructor from the `HH:MM` strings the
    /// configuration form submits.
    ///
    /// # Examples
    /// ```
    /// use termin::interval::WeeklyInterval;
    /// use termin::time::WeekDay;
    ///
    /// let interval = WeeklyInterval::parse(WeekDay::Tuesday, "08:00", "18:00").unwrap();
    /// assert_eq!(interval.start.get(), 480);
    /// assert_eq!(interval.end.get(), 1080);
    /// ```
    pub fn parse(week_day: WeekDay, start: &str, end: &str) -> Result<WeeklyInterval, IntervalError> {
        WeeklyInterval::new(week_day, MinutesOfDay::parse(start)?, MinutesOfDay::parse(end)?)
    }

    pub fn validate(&self) -> Result<(), IntervalError> {
        if !self.start.hour_aligned() {
            return Err(IntervalError::NotHourAligned(self.start.get()));
        }

        if !self.end.hour_aligned() {
            return Err(IntervalError::NotHourAligned(self.end.get()));
        }

        if self.end.get() < self.start.get() + MINUTES_PER_HOUR {
            return Err(IntervalError::TooShort);
        }

        Ok(())
    }

    /// Every whole hour this interval offers, in ascending order.
    ///
    /// The range is half-open: the end hour itself is never offered. An
    /// interval from 10:00 to 15:00 offers hours 10 through 14, and a
    /// visitor booking hour 14 occupies 14:00-15:00.
    ///
    /// # Examples
    /// ```
    /// use termin::interval::WeeklyInterval;
    /// use termin::time::WeekDay;
    ///
    /// let interval = WeeklyInterval::parse(WeekDay::Monday, "10:00", "15:00").unwrap();
    /// assert_eq!(interval.possible_hours(), [10, 11, 12, 13, 14]);
    ///
    /// // minimum valid configuration: exactly one slot
    /// let interval = WeeklyInterval::parse(WeekDay::Monday, "08:00", "09:00").unwrap();
    /// assert_eq!(interval.possible_hours(), [8]);
    /// ```
    pub fn possible_hours(&self) -> Vec<HourOfDay> {
        (self.start.get() / MINUTES_PER_HOUR..self.end.get() / MINUTES_PER_HOUR)
            .map(|hour| HourOfDay(hour as u8))
            .collect()
    }

    /// The interval's bounds placed on a concrete date, as the inclusive
    /// `[start, end]` timestamp range existing bookings are fetched over.
    pub fn window_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = date.and_time(NaiveTime::MIN);

        (
            midnight + Duration::minutes(i64::from(self.start.get())),
            midnight + Duration::minutes(i64::from(self.end.get())),
        )
    }
}

/// A user's full weekly configuration: at most one interval per weekday.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WeeklySchedule {
    intervals: [Option<WeeklyInterval>; 7],
}

impl WeeklySchedule {
    pub fn new() -> WeeklySchedule {
        WeeklySchedule::default()
    }

    /// Builds a schedule from a batch of configured intervals, the shape
    /// the configuration form submits. The batch must enable at least
    /// one weekday and may not carry two intervals for the same day.
    pub fn from_intervals<I>(intervals: I) -> Result<WeeklySchedule, IntervalError>
    where
        I: IntoIterator<Item = WeeklyInterval>,
    {
        let mut schedule = WeeklySchedule::new();

        for interval in intervals {
            interval.validate()?;

            if schedule.set(interval).is_some() {
                return Err(IntervalError::DuplicateWeekDay(interval.week_day));
            }
        }

        if schedule.is_empty() {
            return Err(IntervalError::EmptySchedule);
        }

        Ok(schedule)
    }

    /// Replaces the interval for the given weekday, returning the
    /// previous one if the day was already configured.
    pub fn set(&mut self, interval: WeeklyInterval) -> Option<WeeklyInterval> {
        self.intervals[interval.week_day.number() as usize].replace(interval)
    }

    pub fn get(&self, week_day: WeekDay) -> Option<&WeeklyInterval> {
        self.intervals[week_day.number() as usize].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeeklyInterval> {
        self.intervals.iter().filter_map(Option::as_ref)
    }
}
