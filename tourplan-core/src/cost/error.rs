use thiserror::Error;

use crate::{LocationId, TransportMode};

/// Errors from [`crate::cost::CostOracle::cost_of`] and
/// [`crate::cost::CostSource::open_session`].
#[derive(Debug, Error)]
pub enum CostLookupError {
    /// The matrix holds no entry for the pair in this mode.
    ///
    /// Absent data does not appear on retry, so callers should treat this as
    /// fatal for the current plan.
    #[error("no {mode} travel data between {from} and {to}")]
    NoData {
        /// Departure location as requested.
        from: LocationId,
        /// Arrival location as requested.
        to: LocationId,
        /// Mode that was requested.
        mode: TransportMode,
    },
    /// The backing store failed to answer.
    #[error("cost store failed to {operation}: {source}")]
    Backend {
        /// Description of the failed operation.
        operation: &'static str,
        /// Underlying store error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CostLookupError {
    /// Build a [`CostLookupError::NoData`] for the given lookup.
    #[must_use]
    pub fn no_data(from: &LocationId, to: &LocationId, mode: TransportMode) -> Self {
        Self::NoData {
            from: from.clone(),
            to: to.clone(),
            mode,
        }
    }

    /// Whether this error reports missing matrix data.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}
