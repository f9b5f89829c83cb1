use crate::booking::Booking;
use crate::interval::{WeeklyInterval, WeeklySchedule};
use crate::store::{BookingStore, IntervalStore, UserDirectory};
use crate::time::{HourOfDay, WeekDay};
use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Error, Debug, Clone, Eq, PartialEq)]
pub enum AvailabilityError {
    #[error("date not provided")]
    MissingDate,
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("user {0:?} does not exist")]
    UserNotFound(String),
}

/// One availability lookup: which hours of `date` can be booked with
/// `username`?
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct AvailabilityQuery {
    pub username: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl AvailabilityQuery {
    pub fn new(username: &str, date: &str) -> AvailabilityQuery {
        AvailabilityQuery {
            username: username.to_string(),
            date: Some(date.to_string()),
        }
    }

    /// The calendar date this query targets, as `YYYY-MM-DD`. A trailing
    /// time-of-day component is ignored, never trusted.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use termin::availability::{AvailabilityError, AvailabilityQuery};
    ///
    /// let date = NaiveDate::from_ymd_opt(2022, 9, 22).unwrap();
    ///
    /// let query = AvailabilityQuery::new("ada", "2022-09-22");
    /// assert_eq!(query.reference_date().unwrap(), date);
    ///
    /// let query = AvailabilityQuery::new("ada", "2022-09-22T10:00");
    /// assert_eq!(query.reference_date().unwrap(), date);
    ///
    /// let query = AvailabilityQuery::new("ada", "yesterday");
    /// assert_eq!(
    ///     query.reference_date(),
    ///     Err(AvailabilityError::InvalidDate("yesterday".to_string())),
    /// );
    /// ```
    pub fn reference_date(&self) -> Result<NaiveDate, AvailabilityError> {
        let date = match self.date.as_deref() {
            Some(date) if !date.is_empty() => date,
            _ => return Err(AvailabilityError::MissingDate),
        };

        let day = date.split('T').next().unwrap_or(date);

        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|_| AvailabilityError::InvalidDate(date.to_string()))
    }
}

/// The bookable hours of a single calendar date.
///
/// `available_times` is always a subset of `possible_times`; both are in
/// ascending order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct DayAvailability {
    #[serde(rename = "possibleTimes")]
    pub possible_times: Vec<HourOfDay>,
    #[serde(rename = "availableTimes")]
    pub available_times: Vec<HourOfDay>,
}

impl DayAvailability {
    /// Both lists empty: a past date or an unconfigured weekday.
    pub fn empty() -> DayAvailability {
        DayAvailability::default()
    }
}

/// The last representable instant of `date`. A date is past only once
/// even this moment is behind `now`.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    match date.and_hms_milli_opt(23, 59, 59, 999) {
        Some(end) => end,
        None => date.and_time(chrono::NaiveTime::MIN),
    }
}

fn filter_available(interval: &WeeklyInterval, bookings: &[Booking]) -> DayAvailability {
    let possible_times = interval.possible_hours();

    let available_times = possible_times
        .iter()
        .copied()
        .filter(|hour| !bookings.iter().any(|booking| booking.hour() == *hour))
        .collect_vec();

    DayAvailability {
        possible_times,
        available_times,
    }
}

/// Computes the bookable slots of `reference_date` from a schedule and
/// the bookings already fetched for that date's working window.
///
/// `now` is passed explicitly so the past-date rule is deterministic.
/// Filtering is whole-day only: a date whose end has passed yields
/// nothing, while an elapsed hour earlier today is still offered.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use termin::availability::resolve_for_date;
/// use termin::interval::{WeeklyInterval, WeeklySchedule};
/// use termin::time::WeekDay;
///
/// let mut schedule = WeeklySchedule::new();
/// schedule.set(WeeklyInterval::parse(WeekDay::Thursday, "10:00", "15:00").unwrap());
///
/// // 2022-09-22 is a Thursday
/// let date = NaiveDate::from_ymd_opt(2022, 9, 22).unwrap();
/// let now = NaiveDate::from_ymd_opt(2022, 9, 21)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
///
/// let day = resolve_for_date(&schedule, &[], date, now);
/// assert_eq!(day.possible_times, [10, 11, 12, 13, 14]);
/// assert_eq!(day.available_times, [10, 11, 12, 13, 14]);
///
/// // the Wednesday before is not configured
/// let wednesday = NaiveDate::from_ymd_opt(2022, 9, 21).unwrap();
/// assert_eq!(resolve_for_date(&schedule, &[], wednesday, now), Default::default());
/// ```
pub fn resolve_for_date(
    schedule: &WeeklySchedule,
    bookings: &[Booking],
    reference_date: NaiveDate,
    now: NaiveDateTime,
) -> DayAvailability {
    if end_of_day(reference_date) < now {
        trace!("{} is entirely in the past", reference_date);
        return DayAvailability::empty();
    }

    match schedule.get(WeekDay::from(reference_date)) {
        Some(interval) => filter_available(interval, bookings),
        None => {
            trace!("no interval configured for {:?}", WeekDay::from(reference_date));
            DayAvailability::empty()
        }
    }
}

/// Store-backed availability resolver.
///
/// Read-only and side-effect-free: repeated calls with the same inputs
/// and no intervening booking writes return identical results, so
/// callers may retry freely.
pub struct Resolver<S> {
    store: S,
}

impl<S> Resolver<S>
where
    S: UserDirectory + IntervalStore + BookingStore,
{
    pub fn new(store: S) -> Resolver<S> {
        Resolver { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Resolves one availability query against the backing stores.
    ///
    /// An unknown user is an error; a past date or an unconfigured
    /// weekday is an empty result, not an error.
    pub fn resolve(
        &self,
        query: &AvailabilityQuery,
        now: NaiveDateTime,
    ) -> Result<DayAvailability, AvailabilityError> {
        let reference_date = query.reference_date()?;

        let user = self
            .store
            .find_user(&query.username)
            .ok_or_else(|| AvailabilityError::UserNotFound(query.username.clone()))?;

        // Whole-day short-circuit: skip the interval and booking lookups
        if end_of_day(reference_date) < now {
            return Ok(DayAvailability::empty());
        }

        let interval = match self
            .store
            .find_weekly_interval(user, WeekDay::from(reference_date))
        {
            Some(interval) => interval,
            None => return Ok(DayAvailability::empty()),
        };

        let (window_start, window_end) = interval.window_on(reference_date);
        let bookings = self.store.bookings_between(user, window_start, window_end);

        debug!(
            "{} bookings for {:?} within [{}, {}]",
            bookings.len(),
            query.username,
            window_start,
            window_end,
        );

        Ok(filter_available(&interval, &bookings))
    }
}
