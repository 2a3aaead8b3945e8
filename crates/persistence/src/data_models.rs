// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serializable document models for ledger persistence.
//!
//! These structs are the JSON shape of a stored ledger document. They are
//! kept separate from the domain types so the persisted format can only
//! change deliberately.

use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use time::Time;
use time::macros::format_description;
use tour_dispatch::AssignmentLedger;
use tour_dispatch_domain::{Booking, BookingId, GuestCount, GuideId, TourDate};

/// Serializable representation of a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingData {
    pub id: String,
    pub confirmation_code: String,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub pickup_place: String,
    pub pickup_time: String,
    pub guest_count: u32,
    pub arrived: bool,
    pub no_show: bool,
}

/// Serializable representation of one booking→guide assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentData {
    pub booking_id: String,
    pub guide_id: String,
}

/// Serializable representation of a full day's ledger.
///
/// Assignments are stored in assignment order so manifests reload in the
/// same pickup order they were built in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub date: String,
    pub bookings: Vec<BookingData>,
    pub assignments: Vec<AssignmentData>,
}

impl LedgerDocument {
    /// Builds the document form of a ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if a pickup time cannot be formatted.
    pub fn from_ledger(ledger: &AssignmentLedger) -> Result<Self, PersistenceError> {
        let time_format = format_description!("[hour]:[minute]:[second]");
        let mut bookings: Vec<BookingData> = Vec::with_capacity(ledger.booking_count());
        for booking in ledger.bookings() {
            let pickup_time: String = booking
                .pickup_time
                .format(&time_format)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
            bookings.push(BookingData {
                id: booking.id.value().to_string(),
                confirmation_code: booking.confirmation_code.clone(),
                customer_name: booking.customer_name.clone(),
                phone: booking.phone.clone(),
                email: booking.email.clone(),
                pickup_place: booking.pickup_place.clone(),
                pickup_time,
                guest_count: booking.guest_count.value(),
                arrived: booking.arrived,
                no_show: booking.no_show,
            });
        }
        let assignments: Vec<AssignmentData> = ledger
            .assignments()
            .iter()
            .map(|(booking_id, guide_id)| AssignmentData {
                booking_id: booking_id.value().to_string(),
                guide_id: guide_id.value().to_string(),
            })
            .collect();
        Ok(Self {
            date: ledger.date().to_string(),
            bookings,
            assignments,
        })
    }

    /// Reconstructs the ledger this document describes.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored field fails domain validation or the
    /// assignments violate the ledger's invariants.
    pub fn into_ledger(self) -> Result<AssignmentLedger, PersistenceError> {
        let time_format = format_description!("[hour]:[minute]:[second]");
        let date: TourDate = self
            .date
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;

        let mut bookings: Vec<Booking> = Vec::with_capacity(self.bookings.len());
        for data in self.bookings {
            let pickup_time: Time = Time::parse(&data.pickup_time, &time_format)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
            let mut booking: Booking = Booking::new(
                BookingId::new(&data.id)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
                data.confirmation_code,
                data.customer_name,
                data.phone,
                data.email,
                data.pickup_place,
                pickup_time,
                GuestCount::new(data.guest_count)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            )
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
            booking.arrived = data.arrived;
            booking.no_show = data.no_show;
            bookings.push(booking);
        }

        let mut assignments: Vec<(BookingId, GuideId)> =
            Vec::with_capacity(self.assignments.len());
        for data in self.assignments {
            assignments.push((
                BookingId::new(&data.booking_id)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
                GuideId::new(&data.guide_id)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            ));
        }

        AssignmentLedger::restore(date, bookings, assignments)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
    }
}
