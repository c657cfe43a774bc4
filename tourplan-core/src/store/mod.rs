//! Persisted cost matrix backed by SQLite.
//!
//! All modes share one `travel_costs` table keyed by an unordered place pair
//! and a mode name. Writers store each pair once with the lexically smaller
//! name in `place_a`; readers accept either orientation so hand-edited
//! databases keep working.

#[cfg(feature = "store-sqlite")]
mod persist;
#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use persist::{PersistTravelCostsError, persist_travel_costs};
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCostSession, SqliteCostSource, SqliteCostStoreError};

/// Name of the table holding matrix entries.
pub const TRAVEL_COSTS_TABLE: &str = "travel_costs";

#[cfg(feature = "store-sqlite")]
const CREATE_TRAVEL_COSTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS travel_costs (
    place_a TEXT NOT NULL,
    place_b TEXT NOT NULL,
    mode    TEXT NOT NULL CHECK (mode IN ('fast', 'bus', 'walk')),
    time    REAL NOT NULL,
    cost    REAL NOT NULL,
    PRIMARY KEY (place_a, place_b, mode)
)";
