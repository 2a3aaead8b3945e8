// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::AssignmentLedger;
use time::Time;
use tour_dispatch_domain::{Booking, BookingId, Guide, GuideId, GuestCount, TourDate};

pub fn test_date() -> TourDate {
    "2026-06-15".parse().unwrap()
}

pub fn booking_id(id: &str) -> BookingId {
    BookingId::new(id).unwrap()
}

pub fn guide_id(id: &str) -> GuideId {
    GuideId::new(id).unwrap()
}

pub fn create_test_booking(id: &str, guests: u32) -> Booking {
    Booking::new(
        BookingId::new(id).unwrap(),
        format!("CONF-{id}"),
        String::from("Test Customer"),
        String::from("+354 555 0100"),
        String::from("customer@example.com"),
        String::from("Harbor Hotel"),
        Time::from_hms(8, 30, 0).unwrap(),
        GuestCount::new(guests).unwrap(),
    )
    .unwrap()
}

pub fn create_test_roster(guide_count: usize) -> Vec<Guide> {
    (1..=guide_count)
        .map(|n| {
            Guide::new(GuideId::new(&format!("guide-{n}")).unwrap(), format!("Guide {n}"))
                .unwrap()
        })
        .collect()
}

pub fn create_test_ledger(bookings: &[(&str, u32)]) -> AssignmentLedger {
    AssignmentLedger::with_bookings(
        test_date(),
        bookings
            .iter()
            .map(|(id, guests)| create_test_booking(id, *guests))
            .collect(),
    )
    .unwrap()
}
