// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Booking, Guide, GuideId};
use std::collections::HashSet;

/// Validates that a booking's required fields are present.
///
/// Identifier and guest count constraints are enforced at construction by
/// their newtypes; this checks the free-form fields the booking source must
/// always supply.
///
/// # Arguments
///
/// * `booking` - The booking to validate
///
/// # Errors
///
/// Returns an error if:
/// - The customer name is empty
/// - The pickup place is empty
pub fn validate_booking_fields(booking: &Booking) -> Result<(), DomainError> {
    if booking.customer_name.trim().is_empty() {
        return Err(DomainError::InvalidCustomerName(String::from(
            "Customer name cannot be empty",
        )));
    }

    if booking.pickup_place.trim().is_empty() {
        return Err(DomainError::InvalidPickupPlace(String::from(
            "Pickup place cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that a guide's required fields are present.
///
/// # Arguments
///
/// * `guide` - The guide to validate
///
/// # Errors
///
/// Returns an error if the display name is empty.
pub fn validate_guide_fields(guide: &Guide) -> Result<(), DomainError> {
    if guide.name.trim().is_empty() {
        return Err(DomainError::InvalidGuideName(String::from(
            "Guide name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that a day's roster contains no duplicate guide ids.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `roster` - The guides supplied for a date
///
/// # Errors
///
/// Returns an error if:
/// - Any guide's fields are invalid
/// - Any guide id appears more than once
pub fn validate_roster(roster: &[Guide]) -> Result<(), DomainError> {
    let mut seen: HashSet<&GuideId> = HashSet::new();
    for guide in roster {
        validate_guide_fields(guide)?;
        if !seen.insert(&guide.id) {
            return Err(DomainError::DuplicateGuide(guide.id.clone()));
        }
    }
    Ok(())
}
