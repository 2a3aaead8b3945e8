// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use tour_dispatch_domain::{
    Booking, BookingId, Capacity, DomainError, GuideId, GuideManifest, TourDate,
    validate_booking_fields,
};

/// The full assignment state for one calendar date.
///
/// The ledger holds the day's booking pool plus an insertion-ordered
/// booking→guide assignment list. Everything else — manifests, passenger
/// totals, the unassigned pool — is derived from those two on every read, so
/// no stored counter can drift from the bookings it summarizes.
///
/// Invariants:
/// - a booking id appears in at most one manifest;
/// - a rejected mutation leaves the ledger bit-for-bit unchanged (mutations
///   happen through [`crate::apply`], which clones, validates, then commits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentLedger {
    /// The date this ledger is scoped to.
    date: TourDate,
    /// The day's booking pool, keyed by booking id.
    bookings: BTreeMap<BookingId, Booking>,
    /// Booking→guide assignments in the order they were made.
    assignments: Vec<(BookingId, GuideId)>,
}

impl AssignmentLedger {
    /// Creates an empty ledger for a date.
    #[must_use]
    pub const fn new(date: TourDate) -> Self {
        Self {
            date,
            bookings: BTreeMap::new(),
            assignments: Vec::new(),
        }
    }

    /// Creates a ledger seeded with a day's bookings, all unassigned.
    ///
    /// # Arguments
    ///
    /// * `date` - The date the ledger is scoped to
    /// * `bookings` - The day's bookings from the booking source
    ///
    /// # Errors
    ///
    /// Returns an error if any booking's fields are invalid or a booking id
    /// appears twice.
    pub fn with_bookings(date: TourDate, bookings: Vec<Booking>) -> Result<Self, DomainError> {
        let mut ledger: Self = Self::new(date);
        for booking in bookings {
            ledger.insert_booking(booking)?;
        }
        Ok(ledger)
    }

    /// Rebuilds a ledger from persisted parts.
    ///
    /// Used by the persistence layer when loading a date's document.
    ///
    /// # Arguments
    ///
    /// * `date` - The date the ledger is scoped to
    /// * `bookings` - The day's booking pool
    /// * `assignments` - Booking→guide pairs in assignment order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any booking's fields are invalid or duplicated
    /// - An assignment references a booking that is not in the pool
    /// - A booking is assigned to more than one guide
    pub fn restore(
        date: TourDate,
        bookings: Vec<Booking>,
        assignments: Vec<(BookingId, GuideId)>,
    ) -> Result<Self, DomainError> {
        let mut ledger: Self = Self::with_bookings(date, bookings)?;
        for (booking_id, guide_id) in assignments {
            if !ledger.bookings.contains_key(&booking_id) {
                return Err(DomainError::BookingNotFound(booking_id));
            }
            if ledger.assigned_guide(&booking_id).is_some() {
                return Err(DomainError::DuplicateAssignment(booking_id));
            }
            ledger.attach(booking_id, guide_id);
        }
        Ok(ledger)
    }

    /// Returns the date this ledger is scoped to.
    #[must_use]
    pub const fn date(&self) -> TourDate {
        self.date
    }

    /// Looks up a booking by id.
    #[must_use]
    pub fn booking(&self, booking_id: &BookingId) -> Option<&Booking> {
        self.bookings.get(booking_id)
    }

    /// Returns the day's bookings in id order.
    #[must_use]
    pub fn bookings(&self) -> Vec<&Booking> {
        self.bookings.values().collect()
    }

    /// Returns the number of bookings in the day's pool.
    #[must_use]
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    /// Returns whether the ledger holds no bookings at all.
    ///
    /// An empty date has no persisted document; the persistence layer uses
    /// this to decide between writing and deleting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Returns the raw booking→guide assignment pairs in assignment order.
    #[must_use]
    pub fn assignments(&self) -> &[(BookingId, GuideId)] {
        &self.assignments
    }

    /// Returns the guide a booking is assigned to, if any.
    #[must_use]
    pub fn assigned_guide(&self, booking_id: &BookingId) -> Option<&GuideId> {
        self.assignments
            .iter()
            .find(|(id, _)| id == booking_id)
            .map(|(_, guide_id)| guide_id)
    }

    /// Returns the guides that currently hold at least one booking, in
    /// first-assignment order.
    #[must_use]
    pub fn guide_ids(&self) -> Vec<GuideId> {
        let mut guides: Vec<GuideId> = Vec::new();
        for (_, guide_id) in &self.assignments {
            if !guides.contains(guide_id) {
                guides.push(guide_id.clone());
            }
        }
        guides
    }

    /// Builds the manifest view for one guide.
    ///
    /// Returns `None` for a guide with no bookings — guides with empty
    /// manifests are not part of the ledger's state.
    #[must_use]
    pub fn manifest_for(&self, guide_id: &GuideId) -> Option<GuideManifest> {
        let bookings: Vec<Booking> = self
            .assignments
            .iter()
            .filter(|(_, g)| g == guide_id)
            .filter_map(|(booking_id, _)| self.bookings.get(booking_id).cloned())
            .collect();
        if bookings.is_empty() {
            None
        } else {
            Some(GuideManifest::from_bookings(guide_id.clone(), bookings))
        }
    }

    /// Builds the manifest views for all guides with bookings, in
    /// first-assignment order.
    #[must_use]
    pub fn manifests(&self) -> Vec<GuideManifest> {
        self.guide_ids()
            .into_iter()
            .filter_map(|guide_id| self.manifest_for(&guide_id))
            .collect()
    }

    /// Returns the derived passenger total for a guide.
    ///
    /// Zero for a guide with no bookings.
    #[must_use]
    pub fn total_passengers(&self, guide_id: &GuideId) -> u32 {
        self.assignments
            .iter()
            .filter(|(_, g)| g == guide_id)
            .filter_map(|(booking_id, _)| self.bookings.get(booking_id))
            .map(|booking| booking.guest_count.value())
            .sum()
    }

    /// Returns the bookings not assigned to any guide, in id order.
    #[must_use]
    pub fn unassigned(&self) -> Vec<&Booking> {
        self.bookings
            .values()
            .filter(|booking| self.assigned_guide(&booking.id).is_none())
            .collect()
    }

    /// Read-only capacity pre-check for interactive pickers.
    ///
    /// Uses the same arithmetic as the mutating path ([`Capacity::allows`]),
    /// so "looks allowed" and "is allowed" cannot drift apart.
    #[must_use]
    pub fn validate_passenger_count(
        &self,
        guide_id: &GuideId,
        additional_guests: u32,
        capacity: Capacity,
    ) -> bool {
        capacity.allows(self.total_passengers(guide_id), additional_guests)
    }

    /// Adds a booking to the day's pool, unassigned.
    pub(crate) fn insert_booking(&mut self, booking: Booking) -> Result<(), DomainError> {
        validate_booking_fields(&booking)?;
        if self.bookings.contains_key(&booking.id) {
            return Err(DomainError::DuplicateBooking(booking.id));
        }
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    /// Removes a booking from whichever manifest holds it.
    ///
    /// Returns the guide it was detached from, or `None` if it was already
    /// unassigned.
    pub(crate) fn detach(&mut self, booking_id: &BookingId) -> Option<GuideId> {
        let position: usize = self
            .assignments
            .iter()
            .position(|(id, _)| id == booking_id)?;
        let (_, guide_id) = self.assignments.remove(position);
        Some(guide_id)
    }

    /// Appends an assignment. The caller must have detached the booking
    /// first; the uniqueness invariant relies on it.
    pub(crate) fn attach(&mut self, booking_id: BookingId, guide_id: GuideId) {
        self.assignments.push((booking_id, guide_id));
    }

    /// Sets a booking's arrival flag.
    pub(crate) fn set_arrived(
        &mut self,
        booking_id: &BookingId,
        arrived: bool,
    ) -> Result<(), DomainError> {
        let booking: &mut Booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| DomainError::BookingNotFound(booking_id.clone()))?;
        booking.arrived = arrived;
        Ok(())
    }

    /// Sets a booking's no-show flag.
    pub(crate) fn set_no_show(
        &mut self,
        booking_id: &BookingId,
        no_show: bool,
    ) -> Result<(), DomainError> {
        let booking: &mut Booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| DomainError::BookingNotFound(booking_id.clone()))?;
        booking.no_show = no_show;
        Ok(())
    }
}

/// Describes what a successful transition changed.
///
/// Consumed by logging and by the server's live event stream; it is
/// informational, never authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    /// A booking entered the day's pool.
    BookingAdded {
        /// The new booking.
        booking_id: BookingId,
    },
    /// A booking was placed on a guide's manifest.
    BookingAssigned {
        /// The booking that moved.
        booking_id: BookingId,
        /// The guide it was detached from, if it was assigned before.
        previous: Option<GuideId>,
        /// The guide it now belongs to.
        guide_id: GuideId,
    },
    /// A booking was returned to the unassigned pool.
    BookingUnassigned {
        /// The booking that was unassigned.
        booking_id: BookingId,
        /// The guide it was detached from; `None` means it was already
        /// unassigned and the operation was a no-op.
        previous: Option<GuideId>,
    },
    /// A booking's arrival flag changed.
    ArrivalUpdated {
        /// The booking that was updated.
        booking_id: BookingId,
        /// The new arrival flag value.
        arrived: bool,
    },
    /// A booking's no-show flag changed.
    NoShowUpdated {
        /// The booking that was updated.
        booking_id: BookingId,
        /// The new no-show flag value.
        no_show: bool,
    },
    /// The command was a valid no-op; the ledger is unchanged.
    Unchanged {
        /// The booking the command referenced.
        booking_id: BookingId,
    },
}

/// The result of a successful ledger transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new ledger after the transition.
    pub new_ledger: AssignmentLedger,
    /// What the transition changed.
    pub change: LedgerChange,
}
