// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Tour Dispatch system.
//!
//! This crate stores one JSON ledger document per tour date in `SQLite`,
//! standing in for the managed document store the deployed system fronts.
//! The store's consistency model is preserved deliberately:
//!
//! - every write replaces the whole date document in a single call
//!   (atomic-per-document, no multi-document transactions);
//! - there is no compare-and-swap, so concurrent writers are
//!   last-writer-wins — callers shrink the race window by reloading
//!   immediately before mutating, they do not eliminate it;
//! - a failed save leaves the previously stored document intact.
//!
//! ## Testing
//!
//! Tests run against in-memory `SQLite` databases with unique names, so
//! they are fast, deterministic, and need no external infrastructure.

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

mod data_models;
mod diesel_schema;
mod error;
mod sqlite;

#[cfg(test)]
mod tests;

use diesel::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use tour_dispatch::AssignmentLedger;
use tour_dispatch_domain::TourDate;

pub use data_models::{AssignmentData, BookingData, LedgerDocument};
pub use error::PersistenceError;

use crate::diesel_schema::ledger_documents;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Diesel row struct for ledger document rows.
#[derive(Queryable, Insertable)]
#[diesel(table_name = ledger_documents)]
struct LedgerDocumentRow {
    date: String,
    document: String,
    updated_at: String,
}

/// `SQLite`-backed document store for assignment ledgers.
pub struct SqlitePersistence {
    /// The active database connection.
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a persistence layer backed by a unique in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if connection or migration fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let database_url: String =
            format!("file:tour_dispatch_mem_{id}?mode=memory&cache=shared");
        Self::establish(&database_url)
    }

    /// Creates a persistence layer backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The `SQLite` database file path
    ///
    /// # Errors
    ///
    /// Returns an error if connection or migration fails.
    pub fn new_with_database(path: &str) -> Result<Self, PersistenceError> {
        Self::establish(path)
    }

    fn establish(database_url: &str) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = sqlite::initialize_database(database_url)?;
        Ok(Self { conn })
    }

    /// Loads the ledger stored for a date.
    ///
    /// Returns `Ok(None)` when no document exists for the date — an empty
    /// date has no stored ledger and that is not an error.
    ///
    /// # Arguments
    ///
    /// * `date` - The tour date to load
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored document cannot be
    /// reconstructed into a valid ledger.
    pub fn load_ledger(
        &mut self,
        date: TourDate,
    ) -> Result<Option<AssignmentLedger>, PersistenceError> {
        let row: Option<LedgerDocumentRow> = ledger_documents::table
            .filter(ledger_documents::date.eq(date.to_string()))
            .get_result::<LedgerDocumentRow>(&mut self.conn)
            .optional()
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let document: LedgerDocument = serde_json::from_str(&row.document)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Some(document.into_ledger()?))
    }

    /// Saves a ledger, replacing the whole document for its date.
    ///
    /// An empty ledger deletes the date's document instead of storing an
    /// empty one.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The ledger to persist
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails; the previously
    /// stored document is untouched in that case.
    pub fn save_ledger(&mut self, ledger: &AssignmentLedger) -> Result<(), PersistenceError> {
        let date_key: String = ledger.date().to_string();

        if ledger.is_empty() {
            diesel::delete(
                ledger_documents::table.filter(ledger_documents::date.eq(&date_key)),
            )
            .execute(&mut self.conn)?;
            debug!(date = %date_key, "Deleted empty ledger document");
            return Ok(());
        }

        let document: LedgerDocument = LedgerDocument::from_ledger(ledger)?;
        let json: String = serde_json::to_string(&document)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let updated_at: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        let row: LedgerDocumentRow = LedgerDocumentRow {
            date: date_key.clone(),
            document: json,
            updated_at,
        };

        diesel::replace_into(ledger_documents::table)
            .values(&row)
            .execute(&mut self.conn)?;
        debug!(
            date = %date_key,
            bookings = ledger.booking_count(),
            "Saved ledger document"
        );
        Ok(())
    }
}
