// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for bulk auto-distribution.

use crate::tests::helpers::{
    booking_id, create_test_booking, create_test_roster, guide_id, test_date,
};
use crate::{CoreError, Distribution, StrandedReason, distribute};
use tour_dispatch_domain::{Booking, Capacity, DomainError, Guide};

fn bookings(parties: &[(&str, u32)]) -> Vec<Booking> {
    parties
        .iter()
        .map(|(id, guests)| create_test_booking(id, *guests))
        .collect()
}

#[test]
fn test_distribute_places_everything_when_capacity_suffices() {
    let roster: Vec<Guide> = create_test_roster(2);
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-1", 8), ("BK-2", 7), ("BK-3", 6), ("BK-4", 5)]),
        &roster,
        Capacity::DEFAULT,
    )
    .unwrap();

    assert!(result.is_complete());
    assert_eq!(result.ledger.unassigned().len(), 0);
    // Largest-first on roster order: 8+7 fill guide-1 to 15, the 6 no
    // longer fits there (21 > 19) and opens guide-2, the 5 still fits
    // nowhere on guide-1 (20 > 19) and joins guide-2.
    assert_eq!(result.ledger.total_passengers(&guide_id("guide-1")), 15);
    assert_eq!(result.ledger.total_passengers(&guide_id("guide-2")), 11);
}

#[test]
fn test_distribute_strands_overflow_on_single_guide() {
    // Scenario B: [8, 7, 6, 5] with one 19-seat guide. 8 and 7 fit; 6 and 5
    // have nowhere to go and are both reported.
    let roster: Vec<Guide> = create_test_roster(1);
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-1", 8), ("BK-2", 7), ("BK-3", 6), ("BK-4", 5)]),
        &roster,
        Capacity::DEFAULT,
    )
    .unwrap();

    assert_eq!(result.ledger.total_passengers(&guide_id("guide-1")), 15);
    assert_eq!(result.stranded.len(), 2);
    assert_eq!(result.stranded[0].booking_id, booking_id("BK-3"));
    assert_eq!(result.stranded[0].reason, StrandedReason::RosterFull);
    assert_eq!(result.stranded[1].booking_id, booking_id("BK-4"));
    assert_eq!(result.ledger.unassigned().len(), 2);
}

#[test]
fn test_distribute_reports_oversized_bookings_distinctly() {
    // Scenario C: a 25-guest party can never board a 19-seat bus, no matter
    // how many guides are rostered.
    let roster: Vec<Guide> = create_test_roster(5);
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-1", 25), ("BK-2", 3)]),
        &roster,
        Capacity::DEFAULT,
    )
    .unwrap();

    assert_eq!(result.stranded.len(), 1);
    assert_eq!(result.stranded[0].booking_id, booking_id("BK-1"));
    assert_eq!(result.stranded[0].guest_count, 25);
    assert_eq!(result.stranded[0].reason, StrandedReason::Oversized);
    assert_eq!(
        result.ledger.assigned_guide(&booking_id("BK-2")),
        Some(&guide_id("guide-1"))
    );
}

#[test]
fn test_distribute_is_idempotent_for_unchanged_input() {
    let roster: Vec<Guide> = create_test_roster(3);
    let input: Vec<Booking> = bookings(&[
        ("BK-1", 6),
        ("BK-2", 6),
        ("BK-3", 9),
        ("BK-4", 2),
        ("BK-5", 11),
    ]);

    let first: Distribution =
        distribute(test_date(), input.clone(), &roster, Capacity::DEFAULT).unwrap();
    let second: Distribution =
        distribute(test_date(), input, &roster, Capacity::DEFAULT).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_distribute_ties_keep_input_order() {
    // Two 6-guest bookings: the one that arrived first from the booking
    // source is placed first.
    let roster: Vec<Guide> = create_test_roster(1);
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-9", 6), ("BK-1", 6)]),
        &roster,
        Capacity::DEFAULT,
    )
    .unwrap();

    let manifest = result.ledger.manifest_for(&guide_id("guide-1")).unwrap();
    let ids: Vec<&str> = manifest.bookings().iter().map(|b| b.id.value()).collect();
    assert_eq!(ids, vec!["BK-9", "BK-1"]);
}

#[test]
fn test_distribute_uses_fewest_guides_needed() {
    // 4 + 4 + 4 = 12 fits one bus; guide-2 stays empty and is omitted from
    // the ledger entirely.
    let roster: Vec<Guide> = create_test_roster(2);
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-1", 4), ("BK-2", 4), ("BK-3", 4)]),
        &roster,
        Capacity::DEFAULT,
    )
    .unwrap();

    assert_eq!(result.ledger.guide_ids(), vec![guide_id("guide-1")]);
    assert!(result.ledger.manifest_for(&guide_id("guide-2")).is_none());
}

#[test]
fn test_distribute_with_empty_roster_strands_everything() {
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-1", 2), ("BK-2", 3)]),
        &[],
        Capacity::DEFAULT,
    )
    .unwrap();

    assert_eq!(result.stranded.len(), 2);
    assert!(
        result
            .stranded
            .iter()
            .all(|s| s.reason == StrandedReason::RosterFull)
    );
    assert_eq!(result.ledger.unassigned().len(), 2);
}

#[test]
fn test_distribute_with_empty_booking_list_yields_empty_ledger() {
    let roster: Vec<Guide> = create_test_roster(2);
    let result: Distribution =
        distribute(test_date(), Vec::new(), &roster, Capacity::DEFAULT).unwrap();

    assert!(result.is_complete());
    assert!(result.ledger.is_empty());
}

#[test]
fn test_distribute_rejects_duplicate_booking_ids() {
    let roster: Vec<Guide> = create_test_roster(1);
    let result: Result<Distribution, CoreError> = distribute(
        test_date(),
        bookings(&[("BK-1", 2), ("BK-1", 3)]),
        &roster,
        Capacity::DEFAULT,
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateBooking(booking_id("BK-1")))
    );
}

#[test]
fn test_distribute_respects_custom_capacity() {
    let roster: Vec<Guide> = create_test_roster(2);
    let capacity: Capacity = Capacity::new(8).unwrap();
    let result: Distribution = distribute(
        test_date(),
        bookings(&[("BK-1", 5), ("BK-2", 5), ("BK-3", 3)]),
        &roster,
        capacity,
    )
    .unwrap();

    // 5 on guide-1, 5 on guide-2, then 3 first-fits back onto guide-1.
    assert_eq!(result.ledger.total_passengers(&guide_id("guide-1")), 8);
    assert_eq!(result.ledger.total_passengers(&guide_id("guide-2")), 5);
    assert!(result.is_complete());
}

#[test]
fn test_distribute_never_violates_capacity() {
    let roster: Vec<Guide> = create_test_roster(3);
    let result: Distribution = distribute(
        test_date(),
        bookings(&[
            ("BK-1", 10),
            ("BK-2", 9),
            ("BK-3", 8),
            ("BK-4", 7),
            ("BK-5", 6),
            ("BK-6", 5),
            ("BK-7", 4),
            ("BK-8", 3),
        ]),
        &roster,
        Capacity::DEFAULT,
    )
    .unwrap();

    for manifest in result.ledger.manifests() {
        assert!(manifest.total_passengers() <= 19);
    }
    // No booking double-assigned.
    let assigned: usize = result.ledger.manifests().iter().map(|m| m.len()).sum();
    assert_eq!(
        assigned + result.ledger.unassigned().len(),
        result.ledger.booking_count()
    );
}
