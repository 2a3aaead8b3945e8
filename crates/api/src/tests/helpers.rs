// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for API handler tests.

use tour_dispatch_persistence::SqlitePersistence;

use crate::handlers::{add_booking, assign_booking};
use crate::request_response::{
    AddBookingRequest, AssignBookingRequest, BookingInput, GuideInput,
};

pub const TEST_DATE: &str = "2026-06-15";

pub fn test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

pub fn booking_input(id: &str, guests: u32) -> BookingInput {
    BookingInput {
        id: String::from(id),
        confirmation_code: format!("CONF-{id}"),
        customer_name: String::from("Test Customer"),
        phone: String::from("+354 555 0100"),
        email: String::from("customer@example.com"),
        pickup_place: String::from("Harbor Hotel"),
        pickup_time: String::from("08:30"),
        guest_count: guests,
    }
}

/// Builds a roster of `count` guides named guide-1 through guide-count.
pub fn roster(count: usize) -> Vec<GuideInput> {
    (1..=count)
        .map(|n| GuideInput {
            id: format!("guide-{n}"),
            name: format!("Guide {n}"),
        })
        .collect()
}

/// Adds a booking to the test date's pool through the API boundary.
pub fn add(persistence: &mut SqlitePersistence, id: &str, guests: u32) {
    add_booking(
        persistence,
        AddBookingRequest {
            date: String::from(TEST_DATE),
            booking: booking_input(id, guests),
        },
    )
    .unwrap();
}

/// Assigns a booking to a guide through the API boundary.
pub fn assign(persistence: &mut SqlitePersistence, booking_id: &str, guide_id: &str) {
    assign_booking(
        persistence,
        AssignBookingRequest {
            date: String::from(TEST_DATE),
            booking_id: String::from(booking_id),
            guide_id: Some(String::from(guide_id)),
            roster: roster(3),
            capacity: None,
        },
    )
    .unwrap();
}
