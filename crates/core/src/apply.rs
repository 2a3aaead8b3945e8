// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::ledger::{AssignmentLedger, LedgerChange, TransitionResult};
use tour_dispatch_domain::{BookingId, Capacity, DomainError, Guide, GuideId};

/// Applies an incremental command to a ledger, producing a new ledger.
///
/// The input ledger is never mutated: on success the caller receives a new
/// ledger plus a description of the change, and on failure the old ledger is
/// still the only ledger. This is what makes "a rejected operation leaves
/// visible state identical" hold by construction.
///
/// A booking's assignment moves through exactly one state machine:
/// `Unassigned → Assigned(g) → Assigned(g') | Unassigned`. Arrival and
/// no-show flags are orthogonal and survive any reassignment.
///
/// # Arguments
///
/// * `ledger` - The current ledger (immutable)
/// * `roster` - The day's guide roster from the roster source
/// * `capacity` - The bus capacity to validate placements against
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - A referenced booking or guide does not exist
/// - The placement would exceed the destination manifest's capacity
/// - The booking's guest count alone exceeds capacity (oversized)
/// - An added booking is malformed or duplicated
pub fn apply(
    ledger: &AssignmentLedger,
    roster: &[Guide],
    capacity: Capacity,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::AddBooking { booking } => {
            let booking_id: BookingId = booking.id.clone();
            let mut new_ledger: AssignmentLedger = ledger.clone();
            new_ledger.insert_booking(booking)?;
            Ok(TransitionResult {
                new_ledger,
                change: LedgerChange::BookingAdded { booking_id },
            })
        }
        Command::AssignBooking {
            booking_id,
            guide_id: Some(guide_id),
        } => place_booking(ledger, roster, capacity, booking_id, guide_id),
        Command::AssignBooking {
            booking_id,
            guide_id: None,
        } => unassign_booking(ledger, booking_id),
        Command::MoveBooking { booking_id, from, to } => {
            if ledger.booking(&booking_id).is_none() {
                return Err(DomainError::BookingNotFound(booking_id).into());
            }
            // Defensive idempotence check: a move whose source manifest no
            // longer holds the booking is a no-op success, not an error.
            if ledger.assigned_guide(&booking_id) != Some(&from) {
                return Ok(TransitionResult {
                    new_ledger: ledger.clone(),
                    change: LedgerChange::Unchanged { booking_id },
                });
            }
            place_booking(ledger, roster, capacity, booking_id, to)
        }
        Command::MarkArrived {
            booking_id,
            arrived,
        } => {
            let mut new_ledger: AssignmentLedger = ledger.clone();
            new_ledger.set_arrived(&booking_id, arrived)?;
            Ok(TransitionResult {
                new_ledger,
                change: LedgerChange::ArrivalUpdated {
                    booking_id,
                    arrived,
                },
            })
        }
        Command::MarkNoShow {
            booking_id,
            no_show,
        } => {
            let mut new_ledger: AssignmentLedger = ledger.clone();
            new_ledger.set_no_show(&booking_id, no_show)?;
            Ok(TransitionResult {
                new_ledger,
                change: LedgerChange::NoShowUpdated {
                    booking_id,
                    no_show,
                },
            })
        }
    }
}

/// Places a booking on a guide's manifest, detaching it from wherever it
/// currently sits.
///
/// All validation happens before anything is removed, so a failed placement
/// leaves the booking at its original guide — never in limbo.
fn place_booking(
    ledger: &AssignmentLedger,
    roster: &[Guide],
    capacity: Capacity,
    booking_id: BookingId,
    guide_id: GuideId,
) -> Result<TransitionResult, CoreError> {
    let Some(booking) = ledger.booking(&booking_id) else {
        return Err(DomainError::BookingNotFound(booking_id).into());
    };
    if !roster.iter().any(|guide| guide.id == guide_id) {
        return Err(DomainError::GuideNotFound(guide_id).into());
    }

    let guest_count: u32 = booking.guest_count.value();
    if guest_count > capacity.value() {
        return Err(DomainError::OversizedBooking {
            booking_id,
            guest_count,
            capacity: capacity.value(),
        }
        .into());
    }

    let previous: Option<GuideId> = ledger.assigned_guide(&booking_id).cloned();
    if previous.as_ref() == Some(&guide_id) {
        // Re-assigning to the same guide: the manifest minus this booking
        // plus this booking is the manifest, so the ledger stays untouched
        // (manifest order included).
        return Ok(TransitionResult {
            new_ledger: ledger.clone(),
            change: LedgerChange::Unchanged { booking_id },
        });
    }

    // The booking is not on the destination manifest here, so the current
    // total already excludes its own guest count.
    let current_total: u32 = ledger.total_passengers(&guide_id);
    if !capacity.allows(current_total, guest_count) {
        return Err(DomainError::CapacityExceeded {
            guide_id,
            guest_count,
            remaining: capacity.remaining(current_total),
        }
        .into());
    }

    let mut new_ledger: AssignmentLedger = ledger.clone();
    new_ledger.detach(&booking_id);
    new_ledger.attach(booking_id.clone(), guide_id.clone());
    Ok(TransitionResult {
        new_ledger,
        change: LedgerChange::BookingAssigned {
            booking_id,
            previous,
            guide_id,
        },
    })
}

/// Returns a booking to the unassigned pool.
///
/// Unassigning a booking that is not assigned anywhere is a no-op success.
fn unassign_booking(
    ledger: &AssignmentLedger,
    booking_id: BookingId,
) -> Result<TransitionResult, CoreError> {
    if ledger.booking(&booking_id).is_none() {
        return Err(DomainError::BookingNotFound(booking_id).into());
    }
    let mut new_ledger: AssignmentLedger = ledger.clone();
    let previous: Option<GuideId> = new_ledger.detach(&booking_id);
    Ok(TransitionResult {
        new_ledger,
        change: LedgerChange::BookingUnassigned {
            booking_id,
            previous,
        },
    })
}
