//! In-memory cost matrix.
//!
//! Useful for tests and for callers that already hold a precomputed matrix.
//! Entries live in a `HashMap` keyed by the canonical (sorted) pair and mode.

use std::collections::HashMap;

use crate::{
    CostLookupError, CostOracle, CostSource, LocationId, TransportMode, TravelCost,
    TravelCostRecord,
};

type PairKey = (LocationId, LocationId, TransportMode);

/// Undirected cost matrix held in memory.
///
/// # Examples
///
/// ```
/// use tourplan_core::{CostOracle, LocationId, MemoryCostMatrix, TransportMode};
///
/// let matrix = MemoryCostMatrix::new().with_entry("hotel", "zoo", TransportMode::Fast, 12.0, 9.5);
/// let reverse = matrix
///     .cost_of(&LocationId::from("zoo"), &LocationId::from("hotel"), TransportMode::Fast)
///     .expect("pairs are undirected");
/// assert_eq!(reverse.time, 12.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCostMatrix {
    entries: HashMap<PairKey, TravelCost>,
}

impl MemoryCostMatrix {
    /// Create an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry and return the matrix, for builder-style setup.
    #[must_use]
    pub fn with_entry(
        mut self,
        a: impl Into<LocationId>,
        b: impl Into<LocationId>,
        mode: TransportMode,
        time: f64,
        cost: f64,
    ) -> Self {
        self.insert(a, b, mode, TravelCost::new(time, cost));
        self
    }

    /// Insert or replace the entry for an unordered pair.
    pub fn insert(
        &mut self,
        a: impl Into<LocationId>,
        b: impl Into<LocationId>,
        mode: TransportMode,
        cost: TravelCost,
    ) {
        self.entries.insert(key(a.into(), b.into(), mode), cost);
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the matrix holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn key(a: LocationId, b: LocationId, mode: TransportMode) -> PairKey {
    if a <= b { (a, b, mode) } else { (b, a, mode) }
}

impl CostOracle for MemoryCostMatrix {
    fn cost_of(
        &self,
        from: &LocationId,
        to: &LocationId,
        mode: TransportMode,
    ) -> Result<TravelCost, CostLookupError> {
        self.entries
            .get(&key(from.clone(), to.clone(), mode))
            .copied()
            .ok_or_else(|| CostLookupError::no_data(from, to, mode))
    }
}

impl CostSource for MemoryCostMatrix {
    type Session<'a> = &'a Self;

    fn open_session(&self) -> Result<Self::Session<'_>, CostLookupError> {
        Ok(self)
    }
}

impl FromIterator<TravelCostRecord> for MemoryCostMatrix {
    fn from_iter<I: IntoIterator<Item = TravelCostRecord>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for record in iter {
            let cost = record.travel_cost();
            matrix.insert(record.from, record.to, record.mode, cost);
        }
        matrix
    }
}
