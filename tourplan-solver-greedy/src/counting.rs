//! Oracle wrapper that counts lookups for solve diagnostics.

use std::cell::Cell;

use tourplan_core::{CostLookupError, CostOracle, LocationId, TransportMode, TravelCost};

/// Forwards every lookup to `inner` and counts it, hits and misses alike.
#[derive(Debug)]
pub(crate) struct CountingOracle<O> {
    inner: O,
    queries: Cell<u64>,
}

impl<O> CountingOracle<O> {
    pub(crate) const fn new(inner: O) -> Self {
        Self {
            inner,
            queries: Cell::new(0),
        }
    }

    pub(crate) fn queries(&self) -> u64 {
        self.queries.get()
    }
}

impl<O: CostOracle> CostOracle for CountingOracle<O> {
    fn cost_of(
        &self,
        from: &LocationId,
        to: &LocationId,
        mode: TransportMode,
    ) -> Result<TravelCost, CostLookupError> {
        self.queries.set(self.queries.get().saturating_add(1));
        self.inner.cost_of(from, to, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tourplan_core::MemoryCostMatrix;

    #[rstest]
    fn counts_hits_and_misses() {
        let matrix = MemoryCostMatrix::new().with_entry("a", "b", TransportMode::Fast, 1.0, 1.0);
        let oracle = CountingOracle::new(&matrix);

        assert!(oracle.cost_of(&"b".into(), &"a".into(), TransportMode::Fast).is_ok());
        assert!(oracle.cost_of(&"a".into(), &"b".into(), TransportMode::Bus).is_err());
        assert_eq!(oracle.queries(), 2);
    }
}
