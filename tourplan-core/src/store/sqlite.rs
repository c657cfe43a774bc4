//! SQLite-backed cost source.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use thiserror::Error;

use crate::{CostLookupError, CostOracle, CostSource, LocationId, TransportMode, TravelCost};

use super::TRAVEL_COSTS_TABLE;

const LOOKUP_SQL: &str = "SELECT time, cost FROM travel_costs
    WHERE mode = ?3
      AND ((place_a = ?1 AND place_b = ?2) OR (place_a = ?2 AND place_b = ?1))
    LIMIT 1";

/// Error raised when opening a persisted cost matrix.
#[derive(Debug, Error)]
pub enum SqliteCostStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database has no `travel_costs` table.
    #[error("SQLite database at {path} has no travel_costs table")]
    MissingTable {
        /// Location of the SQLite database on disk.
        path: PathBuf,
    },
    /// Probing the schema failed.
    #[error("failed to query {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// Read-only cost matrix stored in SQLite.
///
/// The connection is shared behind a mutex; each [`SqliteCostSession`] holds
/// the lock and a read transaction until it is dropped.
pub struct SqliteCostSource {
    path: PathBuf,
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteCostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCostSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCostSource {
    /// Open the database at `path` read-only and check its schema.
    pub fn open<P>(path: P) -> Result<Self, SqliteCostStoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCostStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;

        let has_table = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
                [TRAVEL_COSTS_TABLE],
                |_| Ok(true),
            )
            .optional()
            .map_err(|source| SqliteCostStoreError::Query {
                operation: "probe travel_costs table",
                source,
            })?
            .unwrap_or(false);
        if !has_table {
            return Err(SqliteCostStoreError::MissingTable {
                path: path.to_path_buf(),
            });
        }

        log::debug!("opened cost matrix at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            connection: Mutex::new(connection),
        })
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CostSource for SqliteCostSource {
    type Session<'a> = SqliteCostSession<'a>;

    fn open_session(&self) -> Result<Self::Session<'_>, CostLookupError> {
        // Sessions never write, so a poisoned lock still guards a clean connection.
        let connection = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        connection
            .execute_batch("BEGIN DEFERRED")
            .map_err(|source| backend("begin read transaction", source))?;
        Ok(SqliteCostSession { connection })
    }
}

/// A locked connection with an open read transaction.
///
/// Dropping the session ends the transaction and releases the lock.
pub struct SqliteCostSession<'a> {
    connection: MutexGuard<'a, Connection>,
}

impl fmt::Debug for SqliteCostSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCostSession").finish_non_exhaustive()
    }
}

impl CostOracle for SqliteCostSession<'_> {
    fn cost_of(
        &self,
        from: &LocationId,
        to: &LocationId,
        mode: TransportMode,
    ) -> Result<TravelCost, CostLookupError> {
        let mut statement = self
            .connection
            .prepare_cached(LOOKUP_SQL)
            .map_err(|source| backend("prepare cost lookup", source))?;
        statement
            .query_row(params![from.as_str(), to.as_str(), mode.as_str()], |row| {
                Ok(TravelCost::new(row.get(0)?, row.get(1)?))
            })
            .optional()
            .map_err(|source| backend("look up travel cost", source))?
            .ok_or_else(|| CostLookupError::no_data(from, to, mode))
    }
}

impl Drop for SqliteCostSession<'_> {
    fn drop(&mut self) {
        if self.connection.is_autocommit() {
            return;
        }
        if let Err(err) = self.connection.execute_batch("ROLLBACK") {
            log::warn!("failed to end cost matrix read transaction: {err}");
        }
    }
}

fn backend(operation: &'static str, source: rusqlite::Error) -> CostLookupError {
    CostLookupError::Backend {
        operation,
        source: Box::new(source),
    }
}
