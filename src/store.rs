use crate::booking::{Booking, BookingError};
use crate::interval::{WeeklyInterval, WeeklySchedule};
use crate::time::WeekDay;
use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque handle a `UserDirectory` hands out for a known username.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UserId(pub u64);

pub trait UserDirectory {
    fn find_user(&self, username: &str) -> Option<UserId>;
}

pub trait IntervalStore {
    fn find_weekly_interval(&self, user: UserId, week_day: WeekDay) -> Option<WeeklyInterval>;
}

pub trait BookingStore {
    /// Bookings with a timestamp inside `[from, to]`, bounds inclusive.
    fn bookings_between(&self, user: UserId, from: NaiveDateTime, to: NaiveDateTime)
        -> Vec<Booking>;

    /// Confirms a booking. This is where the no-double-booking invariant
    /// actually lives: the availability resolver only filters at read
    /// time, so the store must reject a second booking landing on the
    /// same (user, date, hour) slot. Implementations backed by a real
    /// database want a uniqueness constraint here, not a read-then-write.
    fn create_booking(
        &mut self,
        user: UserId,
        booking: Booking,
        now: NaiveDateTime,
    ) -> Result<(), BookingError>;
}

/// In-memory backing store, used by the tests and by embedders that
/// have no persistence layer of their own.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: HashMap<String, UserId>,
    schedules: HashMap<UserId, WeeklySchedule>,
    bookings: HashMap<UserId, Vec<Booking>>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Registers a username, returning its id. Registering a name twice
    /// returns the existing id.
    pub fn add_user(&mut self, username: &str) -> UserId {
        if let Some(&existing) = self.users.get(username) {
            return existing;
        }

        let id = UserId(self.next_id);
        self.next_id += 1;
        self.users.insert(username.to_string(), id);

        id
    }

    pub fn set_schedule(&mut self, user: UserId, schedule: WeeklySchedule) {
        self.schedules.insert(user, schedule);
    }
}

impl UserDirectory for MemoryStore {
    fn find_user(&self, username: &str) -> Option<UserId> {
        self.users.get(username).copied()
    }
}

impl IntervalStore for MemoryStore {
    fn find_weekly_interval(&self, user: UserId, week_day: WeekDay) -> Option<WeeklyInterval> {
        self.schedules
            .get(&user)
            .and_then(|schedule| schedule.get(week_day))
            .copied()
    }
}

impl BookingStore for MemoryStore {
    fn bookings_between(
        &self,
        user: UserId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Vec<Booking> {
        self.bookings
            .get(&user)
            .map(|bookings| {
                bookings
                    .iter()
                    .filter(|booking| from <= booking.at && booking.at <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn create_booking(
        &mut self,
        user: UserId,
        booking: Booking,
        now: NaiveDateTime,
    ) -> Result<(), BookingError> {
        if booking.at < now {
            return Err(BookingError::InPast);
        }

        // The caller's UI only offers in-window slots, but the store
        // re-checks because the caller is untrusted.
        let week_day = WeekDay::from(booking.at.date());
        let in_window = self
            .find_weekly_interval(user, week_day)
            .map(|interval| {
                booking.on_the_hour() && interval.possible_hours().contains(&booking.hour())
            })
            .unwrap_or(false);

        if !in_window {
            return Err(BookingError::OutsideWindow);
        }

        let bookings = self.bookings.entry(user).or_default();

        if bookings
            .iter()
            .any(|existing| existing.at.date() == booking.at.date() && existing.hour() == booking.hour())
        {
            return Err(BookingError::SlotTaken);
        }

        debug!("confirmed booking at {} for user {:?}", booking.at, user);
        bookings.push(booking);

        Ok(())
    }
}
