// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tour_dispatch_domain::{Booking, BookingId, GuideId};

/// Represents an incremental mutation of a day's assignment ledger.
///
/// Commands are applied by [`crate::apply`], which either produces a new
/// ledger or rejects the command without side effects. Bulk distribution is
/// deliberately not a command; it replaces the whole ledger and lives in
/// [`crate::distribute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Adds a booking to the day's pool, unassigned.
    AddBooking {
        /// The booking to add.
        booking: Booking,
    },
    /// Assigns a booking to a guide, or unassigns it.
    ///
    /// `guide_id: None` is the unassign operation: the booking is removed
    /// from whichever manifest holds it and returned to the unassigned pool.
    /// Unassigning an already-unassigned booking is a no-op success.
    AssignBooking {
        /// The booking to (un)assign.
        booking_id: BookingId,
        /// The destination guide, or `None` to unassign.
        guide_id: Option<GuideId>,
    },
    /// Moves a booking from one guide's manifest to another's.
    ///
    /// If the booking is not currently on `from`'s manifest the move is a
    /// no-op success, so retried moves are idempotent.
    MoveBooking {
        /// The booking to move.
        booking_id: BookingId,
        /// The guide the booking is expected to be assigned to.
        from: GuideId,
        /// The destination guide.
        to: GuideId,
    },
    /// Sets a booking's arrival flag.
    MarkArrived {
        /// The booking to update.
        booking_id: BookingId,
        /// The new arrival flag value.
        arrived: bool,
    },
    /// Sets a booking's no-show flag.
    MarkNoShow {
        /// The booking to update.
        booking_id: BookingId,
        /// The new no-show flag value.
        no_show: bool,
    },
}
