// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler is one reload→apply→save unit: it reloads
//! the date's ledger from the document store, applies exactly one change,
//! and saves the result wholesale. The store has no transactions, so the
//! tight unit is what keeps the race window small; concurrent writers are
//! last-writer-wins.

use time::Time;
use time::macros::format_description;
use tracing::info;

use tour_dispatch::{
    AssignmentLedger, Command, Distribution, LedgerChange, TransitionResult, apply, distribute,
};
use tour_dispatch_domain::{
    Booking, BookingId, Capacity, Guide, GuestCount, GuideId, GuideManifest, TourDate,
};
use tour_dispatch_persistence::SqlitePersistence;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AddBookingRequest, AddBookingResponse, AssignBookingRequest, AssignBookingResponse,
    BookingInfo, BookingInput, DistributeRequest, DistributeResponse, GuideInput,
    ManifestBoardResponse, ManifestInfo, MarkArrivedRequest, MarkArrivedResponse,
    MarkNoShowRequest, MarkNoShowResponse, MoveBookingRequest, MoveBookingResponse, StrandedInfo,
    ValidateCapacityRequest, ValidateCapacityResponse,
};

/// The result of a state-changing API operation.
///
/// Carries the response together with what the transition changed, so the
/// server layer can feed its live event stream without re-deriving the
/// change from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// What the underlying ledger transition changed.
    pub change: LedgerChange,
}

fn parse_date(value: &str) -> Result<TourDate, ApiError> {
    value
        .parse::<TourDate>()
        .map_err(translate_domain_error)
}

fn parse_booking_id(value: &str) -> Result<BookingId, ApiError> {
    BookingId::new(value).map_err(translate_domain_error)
}

fn parse_guide_id(value: &str) -> Result<GuideId, ApiError> {
    GuideId::new(value).map_err(translate_domain_error)
}

/// Resolves the wire form of an assignment destination.
///
/// An absent or empty guide id means "unassign"; anything else must be a
/// valid guide id.
fn parse_destination(guide_id: Option<&str>) -> Result<Option<GuideId>, ApiError> {
    match guide_id {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => Ok(Some(parse_guide_id(value)?)),
    }
}

fn parse_roster(roster: &[GuideInput]) -> Result<Vec<Guide>, ApiError> {
    let mut guides: Vec<Guide> = Vec::with_capacity(roster.len());
    for input in roster {
        let id: GuideId = parse_guide_id(&input.id)?;
        guides.push(Guide::new(id, input.name.clone()).map_err(translate_domain_error)?);
    }
    Ok(guides)
}

fn resolve_capacity(capacity: Option<u32>) -> Result<Capacity, ApiError> {
    capacity.map_or(Ok(Capacity::DEFAULT), |value| {
        Capacity::new(value).map_err(translate_domain_error)
    })
}

/// Parses a pickup time in `HH:MM:SS` or `HH:MM` form.
fn parse_pickup_time(value: &str) -> Result<Time, ApiError> {
    let full = format_description!("[hour]:[minute]:[second]");
    let short = format_description!("[hour]:[minute]");
    Time::parse(value, &full)
        .or_else(|_| Time::parse(value, &short))
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("pickup_time"),
            message: format!("Failed to parse pickup time '{value}': {e}"),
        })
}

fn format_pickup_time(time: Time) -> Result<String, ApiError> {
    let full = format_description!("[hour]:[minute]:[second]");
    time.format(&full).map_err(|e| ApiError::Internal {
        message: format!("Failed to format pickup time: {e}"),
    })
}

fn parse_booking(input: BookingInput) -> Result<Booking, ApiError> {
    let id: BookingId = parse_booking_id(&input.id)?;
    let pickup_time: Time = parse_pickup_time(&input.pickup_time)?;
    let guest_count: GuestCount =
        GuestCount::new(input.guest_count).map_err(translate_domain_error)?;
    Booking::new(
        id,
        input.confirmation_code,
        input.customer_name,
        input.phone,
        input.email,
        input.pickup_place,
        pickup_time,
        guest_count,
    )
    .map_err(translate_domain_error)
}

/// Reloads the stored ledger for a date, or starts an empty one.
///
/// An absent document is a legitimate state: a date with no bookings has no
/// stored ledger.
fn load_or_empty(
    persistence: &mut SqlitePersistence,
    date: TourDate,
) -> Result<AssignmentLedger, ApiError> {
    let stored: Option<AssignmentLedger> = persistence
        .load_ledger(date)
        .map_err(translate_persistence_error)?;
    Ok(stored.unwrap_or_else(|| AssignmentLedger::new(date)))
}

fn booking_info(booking: &Booking) -> Result<BookingInfo, ApiError> {
    Ok(BookingInfo {
        id: booking.id.value().to_string(),
        confirmation_code: booking.confirmation_code.clone(),
        customer_name: booking.customer_name.clone(),
        phone: booking.phone.clone(),
        email: booking.email.clone(),
        pickup_place: booking.pickup_place.clone(),
        pickup_time: format_pickup_time(booking.pickup_time)?,
        guest_count: booking.guest_count.value(),
        arrived: booking.arrived,
        no_show: booking.no_show,
    })
}

fn manifest_info(manifest: &GuideManifest, capacity: Capacity) -> Result<ManifestInfo, ApiError> {
    let mut bookings: Vec<BookingInfo> = Vec::with_capacity(manifest.len());
    for booking in manifest.bookings() {
        bookings.push(booking_info(booking)?);
    }
    Ok(ManifestInfo {
        guide_id: manifest.guide_id().value().to_string(),
        bookings,
        total_passengers: manifest.total_passengers(),
        remaining_capacity: manifest.remaining_capacity(capacity),
    })
}

fn manifest_board(
    ledger: &AssignmentLedger,
    capacity: Capacity,
) -> Result<ManifestBoardResponse, ApiError> {
    let mut manifests: Vec<ManifestInfo> = Vec::new();
    for manifest in ledger.manifests() {
        manifests.push(manifest_info(&manifest, capacity)?);
    }
    let mut unassigned: Vec<BookingInfo> = Vec::new();
    for booking in ledger.unassigned() {
        unassigned.push(booking_info(booking)?);
    }
    Ok(ManifestBoardResponse {
        date: ledger.date().to_string(),
        manifests,
        unassigned,
        total_bookings: ledger.booking_count(),
    })
}

/// Adds a booking to a day's pool, unassigned.
///
/// # Arguments
///
/// * `persistence` - The document store
/// * `request` - The API request
///
/// # Errors
///
/// Returns an error if the booking's fields are invalid, a booking with the
/// same id already exists for the date, or the store rejects the write.
pub fn add_booking(
    persistence: &mut SqlitePersistence,
    request: AddBookingRequest,
) -> Result<ApiResult<AddBookingResponse>, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let booking: Booking = parse_booking(request.booking)?;
    let booking_id: String = booking.id.value().to_string();

    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    let result: TransitionResult = apply(
        &ledger,
        &[],
        Capacity::DEFAULT,
        Command::AddBooking { booking },
    )
    .map_err(translate_core_error)?;
    persistence
        .save_ledger(&result.new_ledger)
        .map_err(translate_persistence_error)?;

    info!(date = %date, booking_id = %booking_id, "Added booking");
    Ok(ApiResult {
        response: AddBookingResponse {
            date: date.to_string(),
            booking_id: booking_id.clone(),
            message: format!("Booking '{booking_id}' added to {date}"),
        },
        change: result.change,
    })
}

/// Assigns a booking to a guide, or unassigns it.
///
/// An absent or empty `guide_id` in the request unassigns the booking.
/// Unassigning an already-unassigned booking succeeds without changing
/// anything.
///
/// # Arguments
///
/// * `persistence` - The document store
/// * `request` - The API request
///
/// # Errors
///
/// Returns an error if the booking or guide cannot be found, the placement
/// would exceed capacity, or the store rejects the write.
pub fn assign_booking(
    persistence: &mut SqlitePersistence,
    request: AssignBookingRequest,
) -> Result<ApiResult<AssignBookingResponse>, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let booking_id: BookingId = parse_booking_id(&request.booking_id)?;
    let destination: Option<GuideId> = parse_destination(request.guide_id.as_deref())?;
    let roster: Vec<Guide> = parse_roster(&request.roster)?;
    let capacity: Capacity = resolve_capacity(request.capacity)?;

    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    let result: TransitionResult = apply(
        &ledger,
        &roster,
        capacity,
        Command::AssignBooking {
            booking_id: booking_id.clone(),
            guide_id: destination.clone(),
        },
    )
    .map_err(translate_core_error)?;
    persistence
        .save_ledger(&result.new_ledger)
        .map_err(translate_persistence_error)?;

    let guide_display: Option<String> = destination.map(|g| g.value().to_string());
    let message: String = match &guide_display {
        Some(guide) => format!("Booking '{booking_id}' assigned to guide '{guide}'"),
        None => format!("Booking '{booking_id}' returned to the unassigned pool"),
    };
    info!(date = %date, booking_id = %booking_id, guide_id = ?guide_display, "Assigned booking");
    Ok(ApiResult {
        response: AssignBookingResponse {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            guide_id: guide_display,
            message,
        },
        change: result.change,
    })
}

/// Moves a booking from one guide's manifest to another's.
///
/// A move whose booking is no longer on the source manifest is a no-op
/// success, so retried moves are idempotent.
///
/// # Arguments
///
/// * `persistence` - The document store
/// * `request` - The API request
///
/// # Errors
///
/// Returns an error if the booking or either guide cannot be found, the
/// destination lacks room, or the store rejects the write.
pub fn move_booking(
    persistence: &mut SqlitePersistence,
    request: MoveBookingRequest,
) -> Result<ApiResult<MoveBookingResponse>, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let booking_id: BookingId = parse_booking_id(&request.booking_id)?;
    let from: GuideId = parse_guide_id(&request.from_guide_id)?;
    let to: GuideId = parse_guide_id(&request.to_guide_id)?;
    let roster: Vec<Guide> = parse_roster(&request.roster)?;
    let capacity: Capacity = resolve_capacity(request.capacity)?;

    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    let result: TransitionResult = apply(
        &ledger,
        &roster,
        capacity,
        Command::MoveBooking {
            booking_id: booking_id.clone(),
            from: from.clone(),
            to: to.clone(),
        },
    )
    .map_err(translate_core_error)?;
    persistence
        .save_ledger(&result.new_ledger)
        .map_err(translate_persistence_error)?;

    info!(date = %date, booking_id = %booking_id, from = %from, to = %to, "Moved booking");
    Ok(ApiResult {
        response: MoveBookingResponse {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            from_guide_id: from.value().to_string(),
            to_guide_id: to.value().to_string(),
            message: format!("Booking '{booking_id}' moved from '{from}' to '{to}'"),
        },
        change: result.change,
    })
}

/// Sets a booking's arrival flag.
///
/// # Errors
///
/// Returns an error if the booking cannot be found or the store rejects the
/// write.
pub fn mark_arrived(
    persistence: &mut SqlitePersistence,
    request: MarkArrivedRequest,
) -> Result<ApiResult<MarkArrivedResponse>, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let booking_id: BookingId = parse_booking_id(&request.booking_id)?;

    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    let result: TransitionResult = apply(
        &ledger,
        &[],
        Capacity::DEFAULT,
        Command::MarkArrived {
            booking_id: booking_id.clone(),
            arrived: request.arrived,
        },
    )
    .map_err(translate_core_error)?;
    persistence
        .save_ledger(&result.new_ledger)
        .map_err(translate_persistence_error)?;

    info!(date = %date, booking_id = %booking_id, arrived = request.arrived, "Updated arrival flag");
    Ok(ApiResult {
        response: MarkArrivedResponse {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            arrived: request.arrived,
            message: format!("Booking '{booking_id}' arrival set to {}", request.arrived),
        },
        change: result.change,
    })
}

/// Sets a booking's no-show flag.
///
/// # Errors
///
/// Returns an error if the booking cannot be found or the store rejects the
/// write.
pub fn mark_no_show(
    persistence: &mut SqlitePersistence,
    request: MarkNoShowRequest,
) -> Result<ApiResult<MarkNoShowResponse>, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let booking_id: BookingId = parse_booking_id(&request.booking_id)?;

    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    let result: TransitionResult = apply(
        &ledger,
        &[],
        Capacity::DEFAULT,
        Command::MarkNoShow {
            booking_id: booking_id.clone(),
            no_show: request.no_show,
        },
    )
    .map_err(translate_core_error)?;
    persistence
        .save_ledger(&result.new_ledger)
        .map_err(translate_persistence_error)?;

    info!(date = %date, booking_id = %booking_id, no_show = request.no_show, "Updated no-show flag");
    Ok(ApiResult {
        response: MarkNoShowResponse {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            no_show: request.no_show,
            message: format!("Booking '{booking_id}' no-show set to {}", request.no_show),
        },
        change: result.change,
    })
}

/// Auto-distributes a day's bookings across a roster and replaces the
/// day's stored ledger with the result.
///
/// Stranded bookings do not fail the operation; they come back in the
/// response for the operator to resolve.
///
/// # Arguments
///
/// * `persistence` - The document store
/// * `request` - The API request
///
/// # Errors
///
/// Returns an error if any booking or guide is malformed, a booking id or
/// guide is duplicated, or the store rejects the write.
pub fn auto_distribute(
    persistence: &mut SqlitePersistence,
    request: DistributeRequest,
) -> Result<DistributeResponse, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let capacity: Capacity = resolve_capacity(request.capacity)?;
    let roster: Vec<Guide> = parse_roster(&request.roster)?;
    let mut bookings: Vec<Booking> = Vec::with_capacity(request.bookings.len());
    for input in request.bookings {
        bookings.push(parse_booking(input)?);
    }
    let booking_count: usize = bookings.len();

    let distribution: Distribution =
        distribute(date, bookings, &roster, capacity).map_err(translate_core_error)?;
    persistence
        .save_ledger(&distribution.ledger)
        .map_err(translate_persistence_error)?;

    let stranded: Vec<StrandedInfo> = distribution
        .stranded
        .iter()
        .map(|s| StrandedInfo {
            booking_id: s.booking_id.value().to_string(),
            guest_count: s.guest_count,
            reason: s.reason.to_string(),
        })
        .collect();
    let assigned_count: usize = booking_count - stranded.len();

    let mut manifests: Vec<ManifestInfo> = Vec::new();
    for manifest in distribution.ledger.manifests() {
        manifests.push(manifest_info(&manifest, capacity)?);
    }

    let guides_used: usize = manifests.len();
    info!(
        date = %date,
        assigned = assigned_count,
        stranded = stranded.len(),
        guides = guides_used,
        "Distributed bookings"
    );
    Ok(DistributeResponse {
        date: date.to_string(),
        manifests,
        stranded,
        assigned_count,
        message: format!(
            "Distributed {assigned_count} of {booking_count} bookings across {guides_used} guides"
        ),
    })
}

/// Read-only capacity pre-check for interactive pickers.
///
/// Runs the same arithmetic as the mutating path, so the answer here and
/// the outcome of a subsequent assignment cannot disagree on the same
/// ledger state.
///
/// # Errors
///
/// Returns an error if the date or guide id is malformed, or the store
/// rejects the load.
pub fn validate_passenger_count(
    persistence: &mut SqlitePersistence,
    request: ValidateCapacityRequest,
) -> Result<ValidateCapacityResponse, ApiError> {
    let date: TourDate = parse_date(&request.date)?;
    let guide_id: GuideId = parse_guide_id(&request.guide_id)?;
    let capacity: Capacity = resolve_capacity(request.capacity)?;

    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    let current_total: u32 = ledger.total_passengers(&guide_id);
    let allowed: bool =
        ledger.validate_passenger_count(&guide_id, request.additional_guests, capacity);

    Ok(ValidateCapacityResponse {
        guide_id: guide_id.value().to_string(),
        allowed,
        current_total,
        remaining: capacity.remaining(current_total),
        capacity: capacity.value(),
    })
}

/// Returns a full day's manifest board: every guide's manifest plus the
/// unassigned pool.
///
/// # Arguments
///
/// * `persistence` - The document store
/// * `date` - The tour date (`YYYY-MM-DD`)
/// * `capacity` - The bus capacity; defaults to the standard 19-seat bus
///
/// # Errors
///
/// Returns an error if the date is malformed or the store rejects the load.
pub fn get_manifest_board(
    persistence: &mut SqlitePersistence,
    date: &str,
    capacity: Option<u32>,
) -> Result<ManifestBoardResponse, ApiError> {
    let date: TourDate = parse_date(date)?;
    let capacity: Capacity = resolve_capacity(capacity)?;
    let ledger: AssignmentLedger = load_or_empty(persistence, date)?;
    manifest_board(&ledger, capacity)
}
