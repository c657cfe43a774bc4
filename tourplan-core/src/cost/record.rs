//! Row type for importing and persisting matrix entries.

use crate::{LocationId, TransportMode};

use super::oracle::TravelCost;

/// One matrix entry: the time and cost between two places in one mode.
///
/// Entries are undirected; `from` and `to` only name the pair.
///
/// # Examples
///
/// ```
/// use tourplan_core::{LocationId, TransportMode};
/// use tourplan_core::cost::TravelCostRecord;
///
/// let record = TravelCostRecord::new("Zoo", "Airport", TransportMode::Bus, 40.0, 2.0);
/// let (a, b) = record.canonical_pair();
/// assert_eq!(a, &LocationId::from("Airport"));
/// assert_eq!(b, &LocationId::from("Zoo"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelCostRecord {
    /// One end of the pair.
    pub from: LocationId,
    /// The other end of the pair.
    pub to: LocationId,
    /// Mode the entry describes.
    pub mode: TransportMode,
    /// Travel time.
    pub time: f64,
    /// Money cost.
    pub cost: f64,
}

impl TravelCostRecord {
    /// Construct a record.
    #[must_use]
    pub fn new(
        from: impl Into<LocationId>,
        to: impl Into<LocationId>,
        mode: TransportMode,
        time: f64,
        cost: f64,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mode,
            time,
            cost,
        }
    }

    /// The pair ordered so the lexically smaller name comes first.
    #[must_use]
    pub fn canonical_pair(&self) -> (&LocationId, &LocationId) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }

    /// The time and cost carried by this record.
    #[must_use]
    pub const fn travel_cost(&self) -> TravelCost {
        TravelCost::new(self.time, self.cost)
    }
}
