// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::ledger::AssignmentLedger;
use tour_dispatch_domain::{Booking, BookingId, Capacity, Guide, TourDate, validate_roster};

/// Why a booking could not be placed during bulk distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandedReason {
    /// The booking's guest count alone exceeds the capacity; no guide on any
    /// roster could ever hold it.
    Oversized,
    /// Every guide on the roster is too full; the roster's aggregate
    /// capacity is insufficient for the day.
    RosterFull,
}

impl std::fmt::Display for StrandedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oversized => write!(f, "oversized"),
            Self::RosterFull => write!(f, "roster_full"),
        }
    }
}

/// A booking the distribution engine could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandedBooking {
    /// The booking that was left unassigned.
    pub booking_id: BookingId,
    /// Its guest count, for operator feedback.
    pub guest_count: u32,
    /// Why it could not be placed.
    pub reason: StrandedReason,
}

/// The result of bulk auto-distribution.
///
/// Partial success is legitimate: the ledger carries every booking that was
/// placed, and `stranded` names every booking that was not. An operator
/// resolves stranded bookings manually (typically after adding guides).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// The freshly built ledger.
    pub ledger: AssignmentLedger,
    /// The bookings that could not be placed, in placement order.
    pub stranded: Vec<StrandedBooking>,
}

impl Distribution {
    /// Returns whether every booking was placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stranded.is_empty()
    }
}

/// Builds a day's assignment ledger from scratch.
///
/// Greedy first-fit with largest-first ordering: bookings are sorted
/// descending by guest count (stable, so ties keep their input order) and
/// each is placed on the first guide, in roster order, whose manifest still
/// fits it. First-fit-descending keeps the number of buses used near
/// optimal, which is what the operation cares about.
///
/// The function is deterministic and idempotent: the same bookings and
/// roster in the same order always produce the same ledger.
///
/// # Arguments
///
/// * `date` - The date the ledger is scoped to
/// * `bookings` - The day's bookings from the booking source
/// * `roster` - The day's guide roster, in roster order
/// * `capacity` - The bus capacity
///
/// # Errors
///
/// Returns an error only for malformed input (invalid booking fields,
/// duplicate booking ids, duplicate guides). An exhausted or empty roster is
/// not an error; the leftover bookings are reported as stranded instead.
pub fn distribute(
    date: TourDate,
    bookings: Vec<Booking>,
    roster: &[Guide],
    capacity: Capacity,
) -> Result<Distribution, CoreError> {
    validate_roster(roster)?;

    let mut ledger: AssignmentLedger = AssignmentLedger::new(date);
    for booking in &bookings {
        ledger.insert_booking(booking.clone())?;
    }

    // Largest-first, stable: comparing b to a sorts descending while ties
    // keep the booking source's original order.
    let mut order: Vec<usize> = (0..bookings.len()).collect();
    order.sort_by(|&a, &b| {
        bookings[b]
            .guest_count
            .value()
            .cmp(&bookings[a].guest_count.value())
    });

    let mut totals: Vec<u32> = vec![0; roster.len()];
    let mut stranded: Vec<StrandedBooking> = Vec::new();

    for index in order {
        let booking: &Booking = &bookings[index];
        let guest_count: u32 = booking.guest_count.value();

        if guest_count > capacity.value() {
            // Never retried against other guides; no roster can hold it.
            stranded.push(StrandedBooking {
                booking_id: booking.id.clone(),
                guest_count,
                reason: StrandedReason::Oversized,
            });
            continue;
        }

        let slot: Option<usize> =
            (0..roster.len()).find(|&g| capacity.allows(totals[g], guest_count));
        match slot {
            Some(g) => {
                totals[g] += guest_count;
                ledger.attach(booking.id.clone(), roster[g].id.clone());
            }
            None => stranded.push(StrandedBooking {
                booking_id: booking.id.clone(),
                guest_count,
                reason: StrandedReason::RosterFull,
            }),
        }
    }

    Ok(Distribution { ledger, stranded })
}
