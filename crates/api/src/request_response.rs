// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Everything at this boundary is strings and plain numbers; the handlers
//! parse into domain types and translate failures into [`crate::ApiError`].
//! Dates are `YYYY-MM-DD`, pickup times are `HH:MM` or `HH:MM:SS`.

use serde::{Deserialize, Serialize};

/// One booking as submitted by the booking source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInput {
    /// The booking identifier.
    pub id: String,
    /// The confirmation code shown to the customer.
    pub confirmation_code: String,
    /// The customer's name.
    pub customer_name: String,
    /// The customer's phone number (may be empty).
    #[serde(default)]
    pub phone: String,
    /// The customer's email address (may be empty).
    #[serde(default)]
    pub email: String,
    /// The pickup place.
    pub pickup_place: String,
    /// The pickup time (`HH:MM` or `HH:MM:SS`).
    pub pickup_time: String,
    /// The number of guests on the booking.
    pub guest_count: u32,
}

/// One guide on the day's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideInput {
    /// The guide identifier.
    pub id: String,
    /// The guide's display name.
    pub name: String,
}

/// API request to add a booking to a day's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBookingRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The booking to add.
    pub booking: BookingInput,
}

/// API response for a successful booking addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBookingResponse {
    /// The tour date.
    pub date: String,
    /// The added booking's id.
    pub booking_id: String,
    /// A success message.
    pub message: String,
}

/// API request to assign a booking to a guide, or unassign it.
///
/// An absent or empty `guide_id` unassigns the booking. The day's roster
/// travels with the request because guides are managed outside this system;
/// the roster may be empty when unassigning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignBookingRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The booking to (un)assign.
    pub booking_id: String,
    /// The destination guide; absent or empty unassigns.
    #[serde(default)]
    pub guide_id: Option<String>,
    /// The day's guide roster.
    #[serde(default)]
    pub roster: Vec<GuideInput>,
    /// The bus capacity; defaults to the standard 19-seat bus.
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// API response for a successful (un)assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignBookingResponse {
    /// The tour date.
    pub date: String,
    /// The booking that was (un)assigned.
    pub booking_id: String,
    /// The guide the booking now belongs to; `None` means unassigned.
    pub guide_id: Option<String>,
    /// A success message.
    pub message: String,
}

/// API request to move a booking between two guides' manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBookingRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The booking to move.
    pub booking_id: String,
    /// The guide the booking is expected to be assigned to.
    pub from_guide_id: String,
    /// The destination guide.
    pub to_guide_id: String,
    /// The day's guide roster.
    pub roster: Vec<GuideInput>,
    /// The bus capacity; defaults to the standard 19-seat bus.
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// API response for a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBookingResponse {
    /// The tour date.
    pub date: String,
    /// The booking that moved.
    pub booking_id: String,
    /// The guide the booking was expected on.
    pub from_guide_id: String,
    /// The destination guide.
    pub to_guide_id: String,
    /// A success message.
    pub message: String,
}

/// API request to set a booking's arrival flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkArrivedRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The booking to update.
    pub booking_id: String,
    /// The new arrival flag value.
    pub arrived: bool,
}

/// API response for a successful arrival update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkArrivedResponse {
    /// The tour date.
    pub date: String,
    /// The booking that was updated.
    pub booking_id: String,
    /// The new arrival flag value.
    pub arrived: bool,
    /// A success message.
    pub message: String,
}

/// API request to set a booking's no-show flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkNoShowRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The booking to update.
    pub booking_id: String,
    /// The new no-show flag value.
    pub no_show: bool,
}

/// API response for a successful no-show update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkNoShowResponse {
    /// The tour date.
    pub date: String,
    /// The booking that was updated.
    pub booking_id: String,
    /// The new no-show flag value.
    pub no_show: bool,
    /// A success message.
    pub message: String,
}

/// API request to auto-distribute a day's bookings across a roster.
///
/// Replaces the day's ledger wholesale with a freshly computed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The day's bookings from the booking source.
    pub bookings: Vec<BookingInput>,
    /// The day's guide roster, in roster order.
    pub roster: Vec<GuideInput>,
    /// The bus capacity; defaults to the standard 19-seat bus.
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// One booking the distribution engine could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandedInfo {
    /// The booking that was left unassigned.
    pub booking_id: String,
    /// Its guest count, for operator feedback.
    pub guest_count: u32,
    /// Why it could not be placed (`oversized` or `roster_full`).
    pub reason: String,
}

/// API response for a completed distribution.
///
/// A distribution with stranded bookings is still a success; the stranded
/// list is the operator's worklist, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeResponse {
    /// The tour date.
    pub date: String,
    /// The resulting manifests, in roster order of first use.
    pub manifests: Vec<ManifestInfo>,
    /// The bookings that could not be placed.
    pub stranded: Vec<StrandedInfo>,
    /// How many bookings were placed on a manifest.
    pub assigned_count: usize,
    /// A summary message.
    pub message: String,
}

/// API request for a read-only capacity pre-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateCapacityRequest {
    /// The tour date (`YYYY-MM-DD`).
    pub date: String,
    /// The guide to check.
    pub guide_id: String,
    /// The guest count being considered for placement.
    pub additional_guests: u32,
    /// The bus capacity; defaults to the standard 19-seat bus.
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// API response for a capacity pre-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateCapacityResponse {
    /// The guide that was checked.
    pub guide_id: String,
    /// Whether the placement would fit.
    pub allowed: bool,
    /// The guide's current passenger total.
    pub current_total: u32,
    /// The seats remaining on the guide's manifest.
    pub remaining: u32,
    /// The capacity the check ran against.
    pub capacity: u32,
}

/// One booking as rendered on a manifest or in the unassigned pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// The booking identifier.
    pub id: String,
    /// The confirmation code.
    pub confirmation_code: String,
    /// The customer's name.
    pub customer_name: String,
    /// The customer's phone number.
    pub phone: String,
    /// The customer's email address.
    pub email: String,
    /// The pickup place.
    pub pickup_place: String,
    /// The pickup time (`HH:MM:SS`).
    pub pickup_time: String,
    /// The number of guests on the booking.
    pub guest_count: u32,
    /// Whether the party has arrived at the pickup point.
    pub arrived: bool,
    /// Whether the party was marked a no-show.
    pub no_show: bool,
}

/// One guide's manifest as rendered for the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    /// The guide this manifest belongs to.
    pub guide_id: String,
    /// The manifest's bookings, in assignment order.
    pub bookings: Vec<BookingInfo>,
    /// The derived passenger total.
    pub total_passengers: u32,
    /// The seats remaining on the bus.
    pub remaining_capacity: u32,
}

/// API response carrying a full day's manifest board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestBoardResponse {
    /// The tour date.
    pub date: String,
    /// The manifests for every guide with bookings.
    pub manifests: Vec<ManifestInfo>,
    /// The bookings not assigned to any guide.
    pub unassigned: Vec<BookingInfo>,
    /// The total number of bookings in the day's pool.
    pub total_bookings: usize,
}
