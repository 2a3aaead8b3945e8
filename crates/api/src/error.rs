// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tour_dispatch::CoreError;
use tour_dispatch_domain::DomainError;
use tour_dispatch_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Capacity rejections and oversized bookings keep their numbers
/// so operator-facing surfaces can show the offending guest count and the
/// seats that remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The placement would push the guide's manifest over capacity.
    CapacityExceeded {
        /// The destination guide.
        guide_id: String,
        /// The guest count of the booking being placed.
        guest_count: u32,
        /// The seats remaining on the destination manifest.
        remaining: u32,
    },
    /// The booking's guest count alone exceeds the bus capacity.
    ///
    /// Surfaced distinctly from `CapacityExceeded` so callers do not retry
    /// against other guides; no guide can ever hold this booking.
    OversizedBooking {
        /// The offending booking.
        booking_id: String,
        /// The guest count of the booking.
        guest_count: u32,
        /// The configured bus capacity.
        capacity: u32,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The document store rejected a load or save.
    PersistenceFailure {
        /// A description of the persistence failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
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
                    "Booking {booking_id} has {guest_count} guests, which exceeds the bus capacity of {capacity}"
                )
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::PersistenceFailure { message } => {
                write!(f, "Persistence failure: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into its API-contract equivalent.
#[must_use]
pub fn translate_domain_error(error: DomainError) -> ApiError {
    match error {
        DomainError::CapacityExceeded {
            guide_id,
            guest_count,
            remaining,
        } => ApiError::CapacityExceeded {
            guide_id: guide_id.value().to_string(),
            guest_count,
            remaining,
        },
        DomainError::OversizedBooking {
            booking_id,
            guest_count,
            capacity,
        } => ApiError::OversizedBooking {
            booking_id: booking_id.value().to_string(),
            guest_count,
            capacity,
        },
        DomainError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("No booking with id '{id}' exists for this date"),
        },
        DomainError::GuideNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Guide"),
            message: format!("Guide '{id}' is not on the day's roster"),
        },
        DomainError::DuplicateBooking(id) => ApiError::InvalidInput {
            field: String::from("booking_id"),
            message: format!("A booking with id '{id}' already exists for this date"),
        },
        DomainError::DuplicateGuide(id) => ApiError::InvalidInput {
            field: String::from("roster"),
            message: format!("Guide '{id}' appears more than once on the roster"),
        },
        DomainError::InvalidBookingId(msg) => ApiError::InvalidInput {
            field: String::from("booking_id"),
            message: msg,
        },
        DomainError::InvalidGuideId(msg) => ApiError::InvalidInput {
            field: String::from("guide_id"),
            message: msg,
        },
        DomainError::InvalidGuestCount(count) => ApiError::InvalidInput {
            field: String::from("guest_count"),
            message: format!("Guest count must be at least 1, got {count}"),
        },
        DomainError::InvalidCapacity(value) => ApiError::InvalidInput {
            field: String::from("capacity"),
            message: format!("Capacity must be at least 1, got {value}"),
        },
        DomainError::InvalidCustomerName(msg) => ApiError::InvalidInput {
            field: String::from("customer_name"),
            message: msg,
        },
        DomainError::InvalidPickupPlace(msg) => ApiError::InvalidInput {
            field: String::from("pickup_place"),
            message: msg,
        },
        DomainError::InvalidGuideName(msg) => ApiError::InvalidInput {
            field: String::from("guide_name"),
            message: msg,
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DuplicateAssignment(id) => ApiError::Internal {
            message: format!("Booking '{id}' is assigned to more than one guide"),
        },
    }
}

/// Translates a core error into its API-contract equivalent.
#[must_use]
pub fn translate_core_error(error: CoreError) -> ApiError {
    match error {
        CoreError::DomainViolation(domain_error) => translate_domain_error(domain_error),
    }
}

/// Translates a persistence error into its API-contract equivalent.
#[must_use]
pub fn translate_persistence_error(error: PersistenceError) -> ApiError {
    ApiError::PersistenceFailure {
        message: error.to_string(),
    }
}
