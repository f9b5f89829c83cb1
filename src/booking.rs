use crate::time::HourOfDay;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Error, Debug, Clone, Eq, PartialEq)]
pub enum BookingError {
    #[error("that time was already booked")]
    SlotTaken,
    #[error("requested time is outside the configured availability window")]
    OutsideWindow,
    #[error("cannot book a time in the past")]
    InPast,
    #[error("name must be at least 3 characters")]
    NameTooShort,
    #[error("invalid email address {0:?}")]
    InvalidEmail(String),
}

/// The visitor filling the confirmation form.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    pub observations: Option<String>,
}

impl Attendee {
    /// Validates the confirmation-form fields.
    ///
    /// # Examples
    /// ```
    /// use termin::booking::{Attendee, BookingError};
    ///
    /// let attendee = Attendee::new("Ada Lovelace", "ada@example.com", None).unwrap();
    /// assert_eq!(attendee.name, "Ada Lovelace");
    ///
    /// assert_eq!(
    ///     Attendee::new("Al", "al@example.com", None),
    ///     Err(BookingError::NameTooShort),
    /// );
    /// assert!(Attendee::new("Ada Lovelace", "not-an-email", None).is_err());
    /// ```
    pub fn new(
        name: &str,
        email: &str,
        observations: Option<&str>,
    ) -> Result<Attendee, BookingError> {
        if name.trim().chars().count() < 3 {
            return Err(BookingError::NameTooShort);
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| BookingError::InvalidEmail(email.to_string()))?;

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(BookingError::InvalidEmail(email.to_string()));
        }

        Ok(Attendee {
            name: name.trim().to_string(),
            email: email.to_string(),
            observations: observations.map(str::to_string),
        })
    }
}

/// A confirmed appointment occupying one hour slot.
///
/// Only the timestamp's hour-of-day participates in availability; two
/// bookings within the same hour are indistinguishable to the resolver.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Booking {
    pub at: NaiveDateTime,
    pub attendee: Attendee,
}

impl Booking {
    pub fn new(at: NaiveDateTime, attendee: Attendee) -> Booking {
        Booking { at, attendee }
    }

    /// The hour slot this booking occupies.
    pub fn hour(&self) -> HourOfDay {
        HourOfDay(self.at.hour() as u8)
    }

    /// Whether the booking sits exactly on an hour boundary. Slots are
    /// whole hours; anything else never matches an offered slot.
    pub fn on_the_hour(&self) -> bool {
        self.at.minute() == 0 && self.at.second() == 0 && self.at.nanosecond() == 0
    }
}
