//! Writing matrix entries into the SQLite cost store.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use rusqlite::{Connection, Error as SqliteError, Transaction, params};
use thiserror::Error;

use crate::{LocationId, TransportMode, TravelCostRecord};

use super::CREATE_TRAVEL_COSTS_TABLE;

/// Errors raised when persisting matrix entries to SQLite.
#[derive(Debug, Error)]
pub enum PersistTravelCostsError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin travel cost persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the `travel_costs` table failed.
    #[error("failed to create travel_costs table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A record carried a negative or non-finite time or cost, or a
    /// walking entry carried a fare.
    #[error("{mode} entry between {from} and {to} has invalid time {time} or cost {cost}")]
    InvalidRecord {
        /// One end of the pair.
        from: LocationId,
        /// The other end of the pair.
        to: LocationId,
        /// Mode of the rejected entry.
        mode: TransportMode,
        /// Rejected time.
        time: f64,
        /// Rejected cost.
        cost: f64,
    },
    /// Preparing the insert statement failed.
    #[error("failed to prepare travel cost insert statement")]
    PrepareInsert {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a row failed.
    #[error("failed to persist {mode} entry between {from} and {to}")]
    PersistRow {
        /// One end of the pair.
        from: LocationId,
        /// The other end of the pair.
        to: LocationId,
        /// Mode of the entry being persisted.
        mode: TransportMode,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit travel cost persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist matrix entries to a SQLite database on disk.
///
/// The function is idempotent: rows are replaced when the same pair and mode
/// already exist, whichever orientation the record names. Parent directories
/// are created automatically and the `travel_costs` table is initialised if
/// missing. Nothing is written unless every record is valid.
///
/// Returns the number of records written.
pub fn persist_travel_costs(
    path: &Utf8Path,
    records: &[TravelCostRecord],
) -> Result<usize, PersistTravelCostsError> {
    records.iter().try_for_each(validate_record)?;
    ensure_parent_dir(path)?;
    let mut connection = Connection::open(path.as_std_path()).map_err(|source| {
        PersistTravelCostsError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistTravelCostsError::BeginTransaction { source })?;

    create_schema(&transaction)?;
    persist_rows(&transaction, records)?;

    transaction
        .commit()
        .map_err(|source| PersistTravelCostsError::Commit { source })?;
    log::info!("persisted {} travel cost entries to {path}", records.len());
    Ok(records.len())
}

fn validate_record(record: &TravelCostRecord) -> Result<(), PersistTravelCostsError> {
    let usable = |value: f64| value.is_finite() && value >= 0.0;
    // Walking is priced at zero when legs are built.
    let free_walk = record.mode != TransportMode::Walk || record.cost <= 0.0;
    if usable(record.time) && usable(record.cost) && free_walk {
        Ok(())
    } else {
        Err(PersistTravelCostsError::InvalidRecord {
            from: record.from.clone(),
            to: record.to.clone(),
            mode: record.mode,
            time: record.time,
            cost: record.cost,
        })
    }
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), PersistTravelCostsError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base, relative) = if parent.is_absolute() {
        ("/", parent.strip_prefix("/").unwrap_or(parent))
    } else {
        (".", parent)
    };
    let create = |source| PersistTravelCostsError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
    };

    fs_utf8::Dir::open_ambient_dir(base, ambient_authority())
        .and_then(|dir| dir.create_dir_all(relative))
        .map_err(create)
}

fn create_schema(transaction: &Transaction<'_>) -> Result<(), PersistTravelCostsError> {
    transaction
        .execute(CREATE_TRAVEL_COSTS_TABLE, [])
        .map(|_| ())
        .map_err(|source| PersistTravelCostsError::CreateSchema { source })
}

fn persist_rows(
    transaction: &Transaction<'_>,
    records: &[TravelCostRecord],
) -> Result<(), PersistTravelCostsError> {
    if records.is_empty() {
        return Ok(());
    }

    // Drop any reversed duplicate first so the pair is stored once.
    let mut remove_reversed = transaction
        .prepare("DELETE FROM travel_costs WHERE place_a = ?1 AND place_b = ?2 AND mode = ?3")
        .map_err(|source| PersistTravelCostsError::PrepareInsert { source })?;
    let mut insert = transaction
        .prepare(
            "INSERT OR REPLACE INTO travel_costs (place_a, place_b, mode, time, cost)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|source| PersistTravelCostsError::PrepareInsert { source })?;

    for record in records {
        let (place_a, place_b) = record.canonical_pair();
        let row_error = |source| PersistTravelCostsError::PersistRow {
            from: record.from.clone(),
            to: record.to.clone(),
            mode: record.mode,
            source,
        };
        remove_reversed
            .execute(params![place_b.as_str(), place_a.as_str(), record.mode.as_str()])
            .map_err(row_error)?;
        insert
            .execute(params![
                place_a.as_str(),
                place_b.as_str(),
                record.mode.as_str(),
                record.time,
                record.cost
            ])
            .map_err(row_error)?;
    }

    Ok(())
}
