// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Time};

/// Represents the calendar date a ledger is scoped to.
///
/// All assignment state is partitioned by tour date; two dates never share
/// bookings or manifests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TourDate {
    /// The calendar date.
    date: Date,
}

impl TourDate {
    /// Creates a new `TourDate`.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self { date }
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }
}

impl FromStr for TourDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = format_description!("[year]-[month]-[day]");
        let date: Date = Date::parse(s, &format).map_err(|e| DomainError::DateParseError {
            date_string: s.to_string(),
            error: e.to_string(),
        })?;
        Ok(Self { date })
    }
}

impl std::fmt::Display for TourDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let format = format_description!("[year]-[month]-[day]");
        match self.date.format(&format) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "{}", self.date),
        }
    }
}

/// Represents a booking's stable identifier.
///
/// Identifiers are issued by the external booking source and are never
/// fabricated by this system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId {
    /// The identifier value (non-empty).
    value: String,
}

impl BookingId {
    /// Creates a new `BookingId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace-only.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidBookingId(String::from(
                "Booking id cannot be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a guide's stable identifier.
///
/// The empty string is not representable; "unassigned" is expressed as the
/// absence of a `GuideId`, never as a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuideId {
    /// The identifier value (non-empty).
    value: String,
}

impl GuideId {
    /// Creates a new `GuideId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace-only.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidGuideId(String::from(
                "Guide id cannot be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for GuideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a booking's party size.
///
/// Fixed once the booking enters a ledger; a party is never split across
/// guides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GuestCount {
    /// The number of guests (at least 1).
    value: u32,
}

impl GuestCount {
    /// Creates a new `GuestCount`.
    ///
    /// # Arguments
    ///
    /// * `value` - The number of guests
    ///
    /// # Errors
    ///
    /// Returns an error if the count is zero.
    pub const fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidGuestCount(value));
        }
        Ok(Self { value })
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }
}

/// Represents the maximum total guest count a single guide's manifest may
/// hold.
///
/// The observed fleet runs identical buses, so the system-wide default is a
/// single constant; the type is still passed per operation so that per-bus
/// seating can be introduced without touching the arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Capacity {
    /// The maximum passenger total (at least 1).
    value: u32,
}

impl Capacity {
    /// The standard bus seating used across the fleet.
    pub const DEFAULT: Self = Self { value: 19 };

    /// Creates a new `Capacity`.
    ///
    /// # Arguments
    ///
    /// * `value` - The maximum passenger total
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero.
    pub const fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidCapacity(value));
        }
        Ok(Self { value })
    }

    /// Returns the maximum passenger total.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Checks whether `additional` guests fit on top of `current_total`.
    ///
    /// This is the single capacity arithmetic used by every placement path,
    /// interactive and bulk alike, so the read-only pre-check can never
    /// drift from the mutating check.
    #[must_use]
    pub const fn allows(&self, current_total: u32, additional: u32) -> bool {
        (current_total as u64) + (additional as u64) <= self.value as u64
    }

    /// Returns the seats remaining above `current_total`.
    #[must_use]
    pub const fn remaining(&self, current_total: u32) -> u32 {
        self.value.saturating_sub(current_total)
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Represents a single customer reservation for a pickup.
///
/// Bookings are created externally (by the booking source) before entering a
/// ledger. Once there, only the arrival/no-show flags and the owning guide
/// may change; the core never deletes a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The stable identifier issued by the booking source.
    pub id: BookingId,
    /// The booking source's confirmation code.
    pub confirmation_code: String,
    /// The customer's full name.
    pub customer_name: String,
    /// The customer's phone number (free-form, may be empty).
    pub phone: String,
    /// The customer's email address (free-form, may be empty).
    pub email: String,
    /// The pickup place name.
    pub pickup_place: String,
    /// The scheduled pickup time.
    pub pickup_time: Time,
    /// The party size.
    pub guest_count: GuestCount,
    /// Whether the party has arrived at the pickup.
    pub arrived: bool,
    /// Whether the party has been marked a no-show.
    pub no_show: bool,
}

impl Booking {
    /// Creates a new `Booking` with both status flags cleared.
    ///
    /// # Arguments
    ///
    /// * `id` - The stable identifier
    /// * `confirmation_code` - The booking source's confirmation code
    /// * `customer_name` - The customer's full name
    /// * `phone` - The customer's phone number
    /// * `email` - The customer's email address
    /// * `pickup_place` - The pickup place name
    /// * `pickup_time` - The scheduled pickup time
    /// * `guest_count` - The party size
    ///
    /// # Errors
    ///
    /// Returns an error if the customer name or pickup place is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        confirmation_code: String,
        customer_name: String,
        phone: String,
        email: String,
        pickup_place: String,
        pickup_time: Time,
        guest_count: GuestCount,
    ) -> Result<Self, DomainError> {
        let booking: Self = Self {
            id,
            confirmation_code,
            customer_name,
            phone,
            email,
            pickup_place,
            pickup_time,
            guest_count,
            arrived: false,
            no_show: false,
        };
        crate::validation::validate_booking_fields(&booking)?;
        Ok(booking)
    }
}

/// Represents a guide on the day's roster.
///
/// The core owns nothing about a guide beyond identity; the roster itself is
/// supplied by an external source per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    /// The guide's identifier.
    pub id: GuideId,
    /// The guide's display name.
    pub name: String,
}

impl Guide {
    /// Creates a new `Guide`.
    ///
    /// # Arguments
    ///
    /// * `id` - The guide's identifier
    /// * `name` - The guide's display name
    ///
    /// # Errors
    ///
    /// Returns an error if the display name is empty.
    pub fn new(id: GuideId, name: String) -> Result<Self, DomainError> {
        let guide: Self = Self { id, name };
        crate::validation::validate_guide_fields(&guide)?;
        Ok(guide)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_date_round_trips_through_display() {
        let date: TourDate = "2026-08-23".parse().unwrap();
        assert_eq!(date.to_string(), "2026-08-23");
    }

    #[test]
    fn test_tour_date_rejects_garbage() {
        let result: Result<TourDate, DomainError> = "yesterday".parse();
        assert!(matches!(result, Err(DomainError::DateParseError { .. })));
    }

    #[test]
    fn test_booking_id_rejects_empty() {
        assert!(BookingId::new("").is_err());
        assert!(BookingId::new("   ").is_err());
    }

    #[test]
    fn test_booking_id_trims_whitespace() {
        let id: BookingId = BookingId::new("  BK-100 ").unwrap();
        assert_eq!(id.value(), "BK-100");
    }

    #[test]
    fn test_guest_count_rejects_zero() {
        assert_eq!(
            GuestCount::new(0),
            Err(DomainError::InvalidGuestCount(0))
        );
        assert_eq!(GuestCount::new(1).unwrap().value(), 1);
    }

    #[test]
    fn test_capacity_default_is_nineteen() {
        assert_eq!(Capacity::DEFAULT.value(), 19);
        assert_eq!(Capacity::default(), Capacity::DEFAULT);
    }

    #[test]
    fn test_capacity_allows_boundary() {
        let capacity: Capacity = Capacity::DEFAULT;
        assert!(capacity.allows(17, 2));
        assert!(!capacity.allows(17, 3));
        assert!(capacity.allows(0, 19));
        assert!(!capacity.allows(0, 20));
    }

    #[test]
    fn test_capacity_allows_does_not_overflow() {
        let capacity: Capacity = Capacity::DEFAULT;
        assert!(!capacity.allows(u32::MAX, u32::MAX));
    }

    #[test]
    fn test_capacity_remaining_saturates() {
        let capacity: Capacity = Capacity::DEFAULT;
        assert_eq!(capacity.remaining(17), 2);
        assert_eq!(capacity.remaining(25), 0);
    }

    #[test]
    fn test_booking_new_starts_with_flags_cleared() {
        let booking: Booking = Booking::new(
            BookingId::new("BK-1").unwrap(),
            String::from("CONF-1"),
            String::from("Jane Doe"),
            String::from("+354 555 0100"),
            String::from("jane@example.com"),
            String::from("Harbor Hotel"),
            Time::from_hms(8, 30, 0).unwrap(),
            GuestCount::new(2).unwrap(),
        )
        .unwrap();
        assert!(!booking.arrived);
        assert!(!booking.no_show);
    }

    #[test]
    fn test_booking_new_rejects_empty_customer_name() {
        let result: Result<Booking, DomainError> = Booking::new(
            BookingId::new("BK-1").unwrap(),
            String::from("CONF-1"),
            String::new(),
            String::new(),
            String::new(),
            String::from("Harbor Hotel"),
            Time::from_hms(8, 30, 0).unwrap(),
            GuestCount::new(2).unwrap(),
        );
        assert!(matches!(result, Err(DomainError::InvalidCustomerName(_))));
    }
}
