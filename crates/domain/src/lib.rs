// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod manifest;
mod types;
mod validation;

pub use error::DomainError;
pub use manifest::GuideManifest;
pub use types::{Booking, BookingId, Capacity, Guide, GuideId, GuestCount, TourDate};
pub use validation::{validate_booking_fields, validate_guide_fields, validate_roster};
