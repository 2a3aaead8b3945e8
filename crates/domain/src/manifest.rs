// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Booking, BookingId, Capacity, GuideId};
use serde::{Deserialize, Serialize};

/// Represents the ordered list of bookings assigned to one guide for one
/// day.
///
/// The passenger total is always derived from the booking list — it is never
/// an independently stored counter that can drift from the bookings it
/// summarizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideManifest {
    /// The owning guide.
    guide_id: GuideId,
    /// The assigned bookings, in pickup order.
    bookings: Vec<Booking>,
}

impl GuideManifest {
    /// Creates a new empty manifest for a guide.
    #[must_use]
    pub const fn new(guide_id: GuideId) -> Self {
        Self {
            guide_id,
            bookings: Vec::new(),
        }
    }

    /// Creates a manifest from an already-ordered booking list.
    #[must_use]
    pub const fn from_bookings(guide_id: GuideId, bookings: Vec<Booking>) -> Self {
        Self { guide_id, bookings }
    }

    /// Returns the owning guide's identifier.
    #[must_use]
    pub const fn guide_id(&self) -> &GuideId {
        &self.guide_id
    }

    /// Returns the assigned bookings in pickup order.
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Returns the total passengers on this manifest.
    ///
    /// Derived by summing guest counts; this is the only passenger total the
    /// system ever computes for a manifest.
    #[must_use]
    pub fn total_passengers(&self) -> u32 {
        self.bookings
            .iter()
            .map(|booking| booking.guest_count.value())
            .sum()
    }

    /// Returns the seats remaining under the given capacity.
    #[must_use]
    pub fn remaining_capacity(&self, capacity: Capacity) -> u32 {
        capacity.remaining(self.total_passengers())
    }

    /// Checks whether a booking can be added without exceeding capacity.
    ///
    /// Pure and side-effect free; every placement, interactive or bulk, runs
    /// through this check (or the identical `Capacity::allows` arithmetic)
    /// before mutating anything.
    #[must_use]
    pub fn can_add(&self, booking: &Booking, capacity: Capacity) -> bool {
        capacity.allows(self.total_passengers(), booking.guest_count.value())
    }

    /// Checks whether a booking id is present on this manifest.
    #[must_use]
    pub fn contains(&self, booking_id: &BookingId) -> bool {
        self.bookings.iter().any(|booking| &booking.id == booking_id)
    }

    /// Returns the number of bookings on this manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Returns whether this manifest has no bookings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Appends a booking to the end of the manifest.
    ///
    /// Capacity and uniqueness are the ledger's responsibility; the manifest
    /// itself is an ordered container.
    pub fn push(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::GuestCount;
    use time::Time;

    fn booking(id: &str, guests: u32) -> Booking {
        Booking::new(
            BookingId::new(id).unwrap(),
            format!("CONF-{id}"),
            String::from("Test Customer"),
            String::new(),
            String::new(),
            String::from("Harbor Hotel"),
            Time::from_hms(9, 0, 0).unwrap(),
            GuestCount::new(guests).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_total_passengers_is_sum_of_guest_counts() {
        let mut manifest: GuideManifest =
            GuideManifest::new(GuideId::new("guide-1").unwrap());
        manifest.push(booking("BK-1", 8));
        manifest.push(booking("BK-2", 7));
        assert_eq!(manifest.total_passengers(), 15);
    }

    #[test]
    fn test_empty_manifest_totals_zero() {
        let manifest: GuideManifest = GuideManifest::new(GuideId::new("guide-1").unwrap());
        assert_eq!(manifest.total_passengers(), 0);
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_can_add_at_exact_capacity() {
        let mut manifest: GuideManifest =
            GuideManifest::new(GuideId::new("guide-1").unwrap());
        manifest.push(booking("BK-1", 17));
        assert!(manifest.can_add(&booking("BK-2", 2), Capacity::DEFAULT));
        assert!(!manifest.can_add(&booking("BK-3", 3), Capacity::DEFAULT));
    }

    #[test]
    fn test_remaining_capacity() {
        let mut manifest: GuideManifest =
            GuideManifest::new(GuideId::new("guide-1").unwrap());
        manifest.push(booking("BK-1", 17));
        assert_eq!(manifest.remaining_capacity(Capacity::DEFAULT), 2);
    }

    #[test]
    fn test_contains_finds_booking_by_id() {
        let mut manifest: GuideManifest =
            GuideManifest::new(GuideId::new("guide-1").unwrap());
        manifest.push(booking("BK-1", 2));
        assert!(manifest.contains(&BookingId::new("BK-1").unwrap()));
        assert!(!manifest.contains(&BookingId::new("BK-2").unwrap()));
    }

    #[test]
    fn test_manifest_preserves_insertion_order() {
        let mut manifest: GuideManifest =
            GuideManifest::new(GuideId::new("guide-1").unwrap());
        manifest.push(booking("BK-2", 2));
        manifest.push(booking("BK-1", 3));
        let ids: Vec<&str> = manifest
            .bookings()
            .iter()
            .map(|b| b.id.value())
            .collect();
        assert_eq!(ids, vec!["BK-2", "BK-1"]);
    }
}
