// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{BookingId, GuideId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Booking identifier is empty or invalid.
    InvalidBookingId(String),
    /// Guide identifier is empty or invalid.
    InvalidGuideId(String),
    /// Guest count must be at least 1.
    InvalidGuestCount(u32),
    /// Capacity must be at least 1.
    InvalidCapacity(u32),
    /// Customer name is empty or invalid.
    InvalidCustomerName(String),
    /// Pickup place is empty or invalid.
    InvalidPickupPlace(String),
    /// Guide display name is empty or invalid.
    InvalidGuideName(String),
    /// Failed to parse a tour date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A booking with this identifier is already present in the ledger.
    DuplicateBooking(BookingId),
    /// A booking appears in more than one manifest.
    DuplicateAssignment(BookingId),
    /// A guide appears more than once in the roster.
    DuplicateGuide(GuideId),
    /// The referenced booking does not exist in the ledger.
    BookingNotFound(BookingId),
    /// The referenced guide is not on the roster.
    GuideNotFound(GuideId),
    /// The placement would push the guide's manifest over capacity.
    CapacityExceeded {
        /// The destination guide.
        guide_id: GuideId,
        /// The guest count of the booking being placed.
        guest_count: u32,
        /// The seats remaining on the destination manifest.
        remaining: u32,
    },
    /// The booking's guest count alone exceeds the configured capacity.
    ///
    /// No guide can ever hold this booking; it is surfaced distinctly so
    /// callers do not retry against other guides.
    OversizedBooking {
        /// The offending booking.
        booking_id: BookingId,
        /// The guest count of the booking.
        guest_count: u32,
        /// The configured capacity.
        capacity: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBookingId(msg) => write!(f, "Invalid booking id: {msg}"),
            Self::InvalidGuideId(msg) => write!(f, "Invalid guide id: {msg}"),
            Self::InvalidGuestCount(count) => {
                write!(f, "Invalid guest count: {count} (must be at least 1)")
            }
            Self::InvalidCapacity(value) => {
                write!(f, "Invalid capacity: {value} (must be at least 1)")
            }
            Self::InvalidCustomerName(msg) => write!(f, "Invalid customer name: {msg}"),
            Self::InvalidPickupPlace(msg) => write!(f, "Invalid pickup place: {msg}"),
            Self::InvalidGuideName(msg) => write!(f, "Invalid guide name: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DuplicateBooking(id) => write!(f, "Duplicate booking: {id}"),
            Self::DuplicateAssignment(id) => {
                write!(f, "Booking {id} is assigned to more than one guide")
            }
            Self::DuplicateGuide(id) => write!(f, "Duplicate guide on roster: {id}"),
            Self::BookingNotFound(id) => write!(f, "Booking not found: {id}"),
            Self::GuideNotFound(id) => write!(f, "Guide not found: {id}"),
            Self::CapacityExceeded {
                guide_id,
                guest_count,
                remaining,
            } => {
                write!(
                    f,
                    "Capacity exceeded for guide {guide_id}: booking has {guest_count} guests, {remaining} seats remain"
                )
            }
            Self::OversizedBooking {
                booking_id,
                guest_count,
                capacity,
            } => {
                write!(
                    f,
                    "Booking {booking_id} has {guest_count} guests, which exceeds the bus capacity of {capacity}; no guide can hold it"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
