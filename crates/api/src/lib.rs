// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Tour Dispatch system.
//!
//! Handlers parse wire-shaped requests into domain types, run exactly one
//! core operation per call as a reload→apply→save unit against the document
//! store, and translate domain/core/persistence errors into the API error
//! contract.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    ApiResult, add_booking, assign_booking, auto_distribute, get_manifest_board, mark_arrived,
    mark_no_show, move_booking, validate_passenger_count,
};
pub use request_response::{
    AddBookingRequest, AddBookingResponse, AssignBookingRequest, AssignBookingResponse,
    BookingInfo, BookingInput, DistributeRequest, DistributeResponse, GuideInput,
    ManifestBoardResponse, ManifestInfo, MarkArrivedRequest, MarkArrivedResponse,
    MarkNoShowRequest, MarkNoShowResponse, MoveBookingRequest, MoveBookingResponse, StrandedInfo,
    ValidateCapacityRequest, ValidateCapacityResponse,
};
