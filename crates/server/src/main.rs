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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use tour_dispatch::LedgerChange;
use tour_dispatch_api::{
    AddBookingRequest, AddBookingResponse, ApiError, AssignBookingRequest, AssignBookingResponse,
    DistributeRequest, DistributeResponse, ManifestBoardResponse, MarkArrivedRequest,
    MarkArrivedResponse, MarkNoShowRequest, MarkNoShowResponse, MoveBookingRequest,
    MoveBookingResponse, ValidateCapacityRequest, ValidateCapacityResponse, add_booking,
    assign_booking, auto_distribute, get_manifest_board, mark_arrived, mark_no_show, move_booking,
    validate_passenger_count,
};
use tour_dispatch_persistence::SqlitePersistence;

mod live;

use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Tour Dispatch Server - HTTP server for the Tour Dispatch system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the live event broadcaster.
#[derive(Clone)]
struct AppState {
    /// The document store holding each date's ledger.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// The live event broadcaster for connected operator boards.
    live: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service status indicator.
    status: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::CapacityExceeded { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::OversizedBooking { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::PersistenceFailure { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Derives the live event for a ledger change, if the change is worth
/// announcing. No-ops produce no event.
fn change_to_event(date: &str, change: &LedgerChange) -> Option<LiveEvent> {
    match change {
        LedgerChange::BookingAdded { booking_id } => Some(LiveEvent::BookingAdded {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
        }),
        LedgerChange::BookingAssigned {
            booking_id,
            previous: None,
            guide_id,
        } => Some(LiveEvent::BookingAssigned {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            guide_id: guide_id.value().to_string(),
        }),
        LedgerChange::BookingAssigned {
            booking_id,
            previous: Some(previous),
            guide_id,
        } => Some(LiveEvent::BookingMoved {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            from_guide_id: previous.value().to_string(),
            to_guide_id: guide_id.value().to_string(),
        }),
        LedgerChange::BookingUnassigned {
            booking_id,
            previous: Some(_),
        } => Some(LiveEvent::BookingUnassigned {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
        }),
        LedgerChange::ArrivalUpdated {
            booking_id,
            arrived,
        } => Some(LiveEvent::ArrivalChanged {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            arrived: *arrived,
        }),
        LedgerChange::NoShowUpdated {
            booking_id,
            no_show,
        } => Some(LiveEvent::NoShowChanged {
            date: date.to_string(),
            booking_id: booking_id.value().to_string(),
            no_show: *no_show,
        }),
        LedgerChange::BookingUnassigned { previous: None, .. }
        | LedgerChange::Unchanged { .. } => None,
    }
}

/// Query parameters for the manifest board endpoint.
#[derive(Debug, Deserialize)]
struct BoardQuery {
    /// Optional bus capacity override for remaining-seat figures.
    capacity: Option<u32>,
}

/// Handler for GET `/api/v1/manifests/{date}`.
///
/// Returns the full manifest board for a date: every guide's manifest plus
/// the unassigned pool.
async fn handle_get_manifest_board(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<ManifestBoardResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ManifestBoardResponse =
        get_manifest_board(&mut persistence, &date, query.capacity)?;
    Ok(Json(response))
}

/// Handler for POST `/api/v1/bookings`.
///
/// Adds a booking to a day's pool, unassigned.
async fn handle_add_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddBookingRequest>,
) -> Result<Json<AddBookingResponse>, HttpError> {
    info!(date = %req.date, booking_id = %req.booking.id, "Handling add_booking request");
    let date: String = req.date.clone();

    let mut persistence = app_state.persistence.lock().await;
    let result = add_booking(&mut persistence, req)?;
    drop(persistence);

    if let Some(event) = change_to_event(&date, &result.change) {
        app_state.live.broadcast(&event);
    }
    Ok(Json(result.response))
}

/// Handler for POST `/api/v1/assignments`.
///
/// Assigns a booking to a guide, or unassigns it when the request carries
/// no (or an empty) guide id.
async fn handle_assign_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignBookingRequest>,
) -> Result<Json<AssignBookingResponse>, HttpError> {
    info!(
        date = %req.date,
        booking_id = %req.booking_id,
        guide_id = ?req.guide_id,
        "Handling assign_booking request"
    );
    let date: String = req.date.clone();

    let mut persistence = app_state.persistence.lock().await;
    let result = assign_booking(&mut persistence, req)?;
    drop(persistence);

    if let Some(event) = change_to_event(&date, &result.change) {
        app_state.live.broadcast(&event);
    }
    Ok(Json(result.response))
}

/// Handler for POST `/api/v1/moves`.
///
/// Moves a booking from one guide's manifest to another's.
async fn handle_move_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MoveBookingRequest>,
) -> Result<Json<MoveBookingResponse>, HttpError> {
    info!(
        date = %req.date,
        booking_id = %req.booking_id,
        from = %req.from_guide_id,
        to = %req.to_guide_id,
        "Handling move_booking request"
    );
    let date: String = req.date.clone();

    let mut persistence = app_state.persistence.lock().await;
    let result = move_booking(&mut persistence, req)?;
    drop(persistence);

    if let Some(event) = change_to_event(&date, &result.change) {
        app_state.live.broadcast(&event);
    }
    Ok(Json(result.response))
}

/// Handler for POST `/api/v1/arrivals`.
///
/// Sets a booking's arrival flag.
async fn handle_mark_arrived(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MarkArrivedRequest>,
) -> Result<Json<MarkArrivedResponse>, HttpError> {
    let date: String = req.date.clone();

    let mut persistence = app_state.persistence.lock().await;
    let result = mark_arrived(&mut persistence, req)?;
    drop(persistence);

    if let Some(event) = change_to_event(&date, &result.change) {
        app_state.live.broadcast(&event);
    }
    Ok(Json(result.response))
}

/// Handler for POST `/api/v1/no-shows`.
///
/// Sets a booking's no-show flag.
async fn handle_mark_no_show(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MarkNoShowRequest>,
) -> Result<Json<MarkNoShowResponse>, HttpError> {
    let date: String = req.date.clone();

    let mut persistence = app_state.persistence.lock().await;
    let result = mark_no_show(&mut persistence, req)?;
    drop(persistence);

    if let Some(event) = change_to_event(&date, &result.change) {
        app_state.live.broadcast(&event);
    }
    Ok(Json(result.response))
}

/// Handler for POST `/api/v1/distributions`.
///
/// Auto-distributes a day's bookings across the roster and replaces the
/// day's ledger with the result.
async fn handle_distribute(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DistributeRequest>,
) -> Result<Json<DistributeResponse>, HttpError> {
    info!(
        date = %req.date,
        bookings = req.bookings.len(),
        guides = req.roster.len(),
        "Handling distribute request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DistributeResponse = auto_distribute(&mut persistence, req)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::DayDistributed {
        date: response.date.clone(),
        assigned: response.assigned_count,
        stranded: response.stranded.len(),
    });
    Ok(Json(response))
}

/// Handler for GET `/api/v1/capacity-check`.
///
/// Read-only pre-check: would `additional_guests` fit on a guide's bus?
async fn handle_capacity_check(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ValidateCapacityRequest>,
) -> Result<Json<ValidateCapacityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ValidateCapacityResponse = validate_passenger_count(&mut persistence, query)?;
    Ok(Json(response))
}

/// Handler for GET `/health`.
///
/// Touches the persistence lock so a wedged store shows up here first.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    let _guard = app_state.persistence.lock().await;
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/v1/manifests/{date}", get(handle_get_manifest_board))
        .route("/api/v1/bookings", post(handle_add_booking))
        .route("/api/v1/assignments", post(handle_assign_booking))
        .route("/api/v1/moves", post(handle_move_booking))
        .route("/api/v1/arrivals", post(handle_mark_arrived))
        .route("/api/v1/no-shows", post(handle_mark_no_show))
        .route("/api/v1/distributions", post(handle_distribute))
        .route("/api/v1/capacity-check", get(handle_capacity_check))
        .route("/api/v1/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tour Dispatch Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_database(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
