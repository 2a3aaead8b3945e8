// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live manifest streaming support for the operator board.
//!
//! This module provides read-only, non-authoritative change notifications
//! via WebSocket connections. Events say what changed on a day's ledger, not
//! what the ledger now contains.
//!
//! # Architecture
//!
//! - Events are broadcast to all connected clients
//! - Events are informational only and never authoritative
//! - No commands are executed over WebSocket connections
//! - Clients must still query the manifest board via HTTP for authoritative
//!   data

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live ledger event types.
///
/// These events are derived from successful ledger transitions; they are
/// purely informational and carry ids, never full bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A booking entered a day's pool.
    BookingAdded {
        /// The tour date.
        date: String,
        /// The new booking.
        booking_id: String,
    },
    /// A booking was placed on a guide's manifest.
    BookingAssigned {
        /// The tour date.
        date: String,
        /// The booking that moved.
        booking_id: String,
        /// The guide it now belongs to.
        guide_id: String,
    },
    /// A booking was returned to the unassigned pool.
    BookingUnassigned {
        /// The tour date.
        date: String,
        /// The booking that was unassigned.
        booking_id: String,
    },
    /// A booking moved from one guide's manifest to another's.
    BookingMoved {
        /// The tour date.
        date: String,
        /// The booking that moved.
        booking_id: String,
        /// The guide it was detached from.
        from_guide_id: String,
        /// The guide it now belongs to.
        to_guide_id: String,
    },
    /// A booking's arrival flag changed.
    ArrivalChanged {
        /// The tour date.
        date: String,
        /// The booking that was updated.
        booking_id: String,
        /// The new arrival flag value.
        arrived: bool,
    },
    /// A booking's no-show flag changed.
    NoShowChanged {
        /// The tour date.
        date: String,
        /// The booking that was updated.
        booking_id: String,
        /// The new no-show flag value.
        no_show: bool,
    },
    /// A day's ledger was rebuilt by auto-distribution.
    DayDistributed {
        /// The tour date.
        date: String,
        /// How many bookings were placed.
        assigned: usize,
        /// How many bookings were left stranded.
        stranded: usize,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Broadcaster for live ledger events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive change notifications.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    /// This is non-blocking and will not wait for clients to receive the
    /// event.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `broadcaster` - The live event broadcaster from application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Handles an individual WebSocket connection.
///
/// Sends a connection confirmation, then streams all live events until
/// the client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    // Send connection confirmation
    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    // Task for sending events to the client
    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    // We don't process commands over WebSocket
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
