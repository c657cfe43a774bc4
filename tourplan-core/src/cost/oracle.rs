//! Cost oracle traits and the per-lookup result type.

use crate::{LocationId, TransportMode};

use super::error::CostLookupError;

/// Travel time and money cost of one hop in one mode.
///
/// Units are whatever the matrix was built with (minutes and dollars in the
/// bundled data); the solver only compares and sums them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelCost {
    /// Travel time.
    pub time: f64,
    /// Money cost.
    pub cost: f64,
}

impl TravelCost {
    /// Construct a cost entry.
    #[must_use]
    pub const fn new(time: f64, cost: f64) -> Self {
        Self { time, cost }
    }
}

/// Answer time/cost queries for a pair of locations.
///
/// # Examples
///
/// ```rust
/// use tourplan_core::{CostLookupError, CostOracle, LocationId, TransportMode, TravelCost};
///
/// struct FlatRate;
///
/// impl CostOracle for FlatRate {
///     fn cost_of(
///         &self,
///         from: &LocationId,
///         to: &LocationId,
///         mode: TransportMode,
///     ) -> Result<TravelCost, CostLookupError> {
///         match mode {
///             TransportMode::Fast => Ok(TravelCost::new(10.0, 8.0)),
///             TransportMode::Bus => Ok(TravelCost::new(25.0, 1.5)),
///             TransportMode::Walk => Err(CostLookupError::no_data(from, to, mode)),
///         }
///     }
/// }
///
/// let a = LocationId::from("a");
/// let b = LocationId::from("b");
/// assert_eq!(FlatRate.cost_of(&a, &b, TransportMode::Bus)?.cost, 1.5);
/// assert!(FlatRate.cost_of(&a, &b, TransportMode::Walk).is_err());
/// # Ok::<(), CostLookupError>(())
/// ```
pub trait CostOracle {
    /// Return the time and cost of travelling between `from` and `to` in
    /// `mode`.
    ///
    /// Implementations must accept either orientation of a stored pair and
    /// return [`CostLookupError::NoData`] when no entry exists.
    fn cost_of(
        &self,
        from: &LocationId,
        to: &LocationId,
        mode: TransportMode,
    ) -> Result<TravelCost, CostLookupError>;
}

impl<T> CostOracle for &T
where
    T: CostOracle + ?Sized,
{
    fn cost_of(
        &self,
        from: &LocationId,
        to: &LocationId,
        mode: TransportMode,
    ) -> Result<TravelCost, CostLookupError> {
        (**self).cost_of(from, to, mode)
    }
}

/// Hand out scoped, read-only oracle sessions.
///
/// A session holds whatever connection or transaction the backing store
/// needs and releases it when dropped, so every exit path of a solve,
/// including lookup failures, gives the resource back.
pub trait CostSource {
    /// Oracle type borrowed from this source for one solve.
    type Session<'a>: CostOracle
    where
        Self: 'a;

    /// Open a session for a single solve.
    fn open_session(&self) -> Result<Self::Session<'_>, CostLookupError>;
}
