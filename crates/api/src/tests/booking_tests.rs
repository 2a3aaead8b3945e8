// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the incremental booking handlers: add, assign, move, and the
//! arrival flags. Every handler runs against a real in-memory document
//! store, so these tests also cover the reload→apply→save unit.

use tour_dispatch::LedgerChange;
use tour_dispatch_persistence::SqlitePersistence;

use crate::error::ApiError;
use crate::handlers::{
    add_booking, assign_booking, get_manifest_board, mark_arrived, mark_no_show, move_booking,
};
use crate::request_response::{
    AddBookingRequest, AssignBookingRequest, ManifestBoardResponse, MarkArrivedRequest,
    MarkNoShowRequest, MoveBookingRequest,
};
use crate::tests::helpers::{TEST_DATE, add, assign, booking_input, roster, test_persistence};

fn board(persistence: &mut SqlitePersistence) -> ManifestBoardResponse {
    get_manifest_board(persistence, TEST_DATE, None).unwrap()
}

#[test]
fn test_added_booking_lands_in_the_unassigned_pool() {
    let mut persistence: SqlitePersistence = test_persistence();
    let result = add_booking(
        &mut persistence,
        AddBookingRequest {
            date: String::from(TEST_DATE),
            booking: booking_input("BK-1", 4),
        },
    )
    .unwrap();

    assert!(matches!(result.change, LedgerChange::BookingAdded { .. }));
    let board: ManifestBoardResponse = board(&mut persistence);
    assert_eq!(board.total_bookings, 1);
    assert_eq!(board.unassigned.len(), 1);
    assert_eq!(board.unassigned[0].id, "BK-1");
    assert!(board.manifests.is_empty());
}

#[test]
fn test_duplicate_booking_id_is_rejected() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);

    let error: ApiError = add_booking(
        &mut persistence,
        AddBookingRequest {
            date: String::from(TEST_DATE),
            booking: booking_input("BK-1", 2),
        },
    )
    .unwrap_err();

    assert!(
        matches!(error, ApiError::InvalidInput { ref field, .. } if field == "booking_id"),
        "unexpected error: {error:?}"
    );
    assert_eq!(board(&mut persistence).total_bookings, 1);
}

#[test]
fn test_assignment_appears_on_the_guide_manifest() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);
    assign(&mut persistence, "BK-1", "guide-1");

    let board: ManifestBoardResponse = board(&mut persistence);
    assert_eq!(board.manifests.len(), 1);
    assert_eq!(board.manifests[0].guide_id, "guide-1");
    assert_eq!(board.manifests[0].total_passengers, 4);
    assert_eq!(board.manifests[0].remaining_capacity, 15);
    assert!(board.unassigned.is_empty());
}

#[test]
fn test_assignment_over_capacity_is_rejected_and_nothing_is_stored() {
    // A 19-seat bus holding 17 + 2 guests is exactly full; one more guest
    // must be rejected with the numbers the operator needs.
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-A", 17);
    add(&mut persistence, "BK-B", 2);
    add(&mut persistence, "BK-C", 1);
    assign(&mut persistence, "BK-A", "guide-1");
    assign(&mut persistence, "BK-B", "guide-1");

    let error: ApiError = assign_booking(
        &mut persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-C"),
            guide_id: Some(String::from("guide-1")),
            roster: roster(3),
            capacity: None,
        },
    )
    .unwrap_err();

    assert_eq!(
        error,
        ApiError::CapacityExceeded {
            guide_id: String::from("guide-1"),
            guest_count: 1,
            remaining: 0,
        }
    );
    // The stored ledger is untouched by the rejection.
    let board: ManifestBoardResponse = board(&mut persistence);
    assert_eq!(board.manifests[0].total_passengers, 19);
    assert_eq!(board.unassigned.len(), 1);
    assert_eq!(board.unassigned[0].id, "BK-C");
}

#[test]
fn test_oversized_booking_is_reported_distinctly() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-BIG", 25);

    let error: ApiError = assign_booking(
        &mut persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-BIG"),
            guide_id: Some(String::from("guide-1")),
            roster: roster(3),
            capacity: None,
        },
    )
    .unwrap_err();

    assert_eq!(
        error,
        ApiError::OversizedBooking {
            booking_id: String::from("BK-BIG"),
            guest_count: 25,
            capacity: 19,
        }
    );
}

#[test]
fn test_empty_guide_id_unassigns_the_booking() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);
    assign(&mut persistence, "BK-1", "guide-1");

    let result = assign_booking(
        &mut persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-1"),
            guide_id: Some(String::new()),
            roster: Vec::new(),
            capacity: None,
        },
    )
    .unwrap();

    assert!(matches!(
        result.change,
        LedgerChange::BookingUnassigned { previous: Some(_), .. }
    ));
    assert!(result.response.guide_id.is_none());
    let board: ManifestBoardResponse = board(&mut persistence);
    assert!(board.manifests.is_empty());
    assert_eq!(board.unassigned.len(), 1);
}

#[test]
fn test_unassigning_an_unassigned_booking_is_a_no_op_success() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);

    let result = assign_booking(
        &mut persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-1"),
            guide_id: None,
            roster: Vec::new(),
            capacity: None,
        },
    )
    .unwrap();

    assert!(matches!(
        result.change,
        LedgerChange::BookingUnassigned { previous: None, .. }
    ));
}

#[test]
fn test_assigning_an_unknown_booking_is_not_found() {
    let mut persistence: SqlitePersistence = test_persistence();

    let error: ApiError = assign_booking(
        &mut persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-MISSING"),
            guide_id: Some(String::from("guide-1")),
            roster: roster(1),
            capacity: None,
        },
    )
    .unwrap_err();

    assert!(
        matches!(
            error,
            ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Booking"
        ),
        "unexpected error: {error:?}"
    );
}

#[test]
fn test_assigning_to_a_guide_off_the_roster_is_not_found() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);

    let error: ApiError = assign_booking(
        &mut persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-1"),
            guide_id: Some(String::from("guide-99")),
            roster: roster(2),
            capacity: None,
        },
    )
    .unwrap_err();

    assert!(
        matches!(
            error,
            ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Guide"
        ),
        "unexpected error: {error:?}"
    );
}

#[test]
fn test_move_relocates_the_booking_between_manifests() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);
    add(&mut persistence, "BK-2", 6);
    assign(&mut persistence, "BK-1", "guide-1");
    assign(&mut persistence, "BK-2", "guide-1");

    move_booking(
        &mut persistence,
        MoveBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-2"),
            from_guide_id: String::from("guide-1"),
            to_guide_id: String::from("guide-2"),
            roster: roster(3),
            capacity: None,
        },
    )
    .unwrap();

    let board: ManifestBoardResponse = board(&mut persistence);
    assert_eq!(board.manifests.len(), 2);
    assert_eq!(board.manifests[0].guide_id, "guide-1");
    assert_eq!(board.manifests[0].total_passengers, 4);
    assert_eq!(board.manifests[1].guide_id, "guide-2");
    assert_eq!(board.manifests[1].total_passengers, 6);
}

#[test]
fn test_retried_move_is_an_idempotent_no_op() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);
    assign(&mut persistence, "BK-1", "guide-2");

    // The booking is no longer on guide-1, so this (retried) move changes
    // nothing and still succeeds.
    let result = move_booking(
        &mut persistence,
        MoveBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-1"),
            from_guide_id: String::from("guide-1"),
            to_guide_id: String::from("guide-3"),
            roster: roster(3),
            capacity: None,
        },
    )
    .unwrap();

    assert!(matches!(result.change, LedgerChange::Unchanged { .. }));
    let board: ManifestBoardResponse = board(&mut persistence);
    assert_eq!(board.manifests[0].guide_id, "guide-2");
}

#[test]
fn test_arrival_and_no_show_flags_persist() {
    let mut persistence: SqlitePersistence = test_persistence();
    add(&mut persistence, "BK-1", 4);
    add(&mut persistence, "BK-2", 2);

    mark_arrived(
        &mut persistence,
        MarkArrivedRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-1"),
            arrived: true,
        },
    )
    .unwrap();
    mark_no_show(
        &mut persistence,
        MarkNoShowRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from("BK-2"),
            no_show: true,
        },
    )
    .unwrap();

    let board: ManifestBoardResponse = board(&mut persistence);
    let bk1 = board.unassigned.iter().find(|b| b.id == "BK-1").unwrap();
    let bk2 = board.unassigned.iter().find(|b| b.id == "BK-2").unwrap();
    assert!(bk1.arrived);
    assert!(!bk1.no_show);
    assert!(bk2.no_show);
    assert!(!bk2.arrived);
}

#[test]
fn test_malformed_date_is_invalid_input() {
    let mut persistence: SqlitePersistence = test_persistence();

    let error: ApiError = add_booking(
        &mut persistence,
        AddBookingRequest {
            date: String::from("15-06-2026"),
            booking: booking_input("BK-1", 4),
        },
    )
    .unwrap_err();

    assert!(
        matches!(error, ApiError::InvalidInput { ref field, .. } if field == "date"),
        "unexpected error: {error:?}"
    );
}

#[test]
fn test_malformed_pickup_time_is_invalid_input() {
    let mut persistence: SqlitePersistence = test_persistence();
    let mut booking = booking_input("BK-1", 4);
    booking.pickup_time = String::from("half past eight");

    let error: ApiError = add_booking(
        &mut persistence,
        AddBookingRequest {
            date: String::from(TEST_DATE),
            booking,
        },
    )
    .unwrap_err();

    assert!(
        matches!(error, ApiError::InvalidInput { ref field, .. } if field == "pickup_time"),
        "unexpected error: {error:?}"
    );
}
