//! Solver boundary: requests, responses and the [`Solver`] trait.

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::{CostLookupError, LocationId, Route, RouteShapeError};

/// Parameters for a solve request.
///
/// The request names the origin, the stops to visit once each, and the most
/// money the caller is willing to spend on travel.
///
/// # Examples
/// ```rust
/// use tourplan_core::{LocationId, SolveRequest};
///
/// let request = SolveRequest {
///     origin: LocationId::from("hotel"),
///     stops: vec![LocationId::from("zoo"), LocationId::from("museum")],
///     budget: 20.0,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Where the tour starts and ends.
    pub origin: LocationId,
    /// Destinations to visit exactly once. Order breaks nearest-neighbour
    /// ties.
    pub stops: Vec<LocationId>,
    /// Maximum acceptable aggregate travel cost.
    pub budget: f64,
}

/// Reasons a [`SolveRequest`] is rejected before any lookup happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveRequestValidationError {
    /// No destinations were supplied.
    #[error("at least one stop is required")]
    EmptyStops,
    /// A destination appears more than once.
    #[error("stop {stop} is listed more than once")]
    DuplicateStop {
        /// The repeated stop.
        stop: LocationId,
    },
    /// The origin is also listed as a destination.
    #[error("origin {origin} must not be listed as a stop")]
    OriginInStops {
        /// The origin.
        origin: LocationId,
    },
    /// The budget is negative or not a finite number.
    #[error("budget must be a finite, non-negative amount (got {budget})")]
    InvalidBudget {
        /// The rejected budget.
        budget: f64,
    },
}

impl SolveRequest {
    /// Check the request for caller contract violations.
    pub fn validate(&self) -> Result<(), SolveRequestValidationError> {
        if self.stops.is_empty() {
            return Err(SolveRequestValidationError::EmptyStops);
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(SolveRequestValidationError::InvalidBudget {
                budget: self.budget,
            });
        }
        let mut seen = HashSet::with_capacity(self.stops.len());
        for stop in &self.stops {
            if *stop == self.origin {
                return Err(SolveRequestValidationError::OriginInStops {
                    origin: self.origin.clone(),
                });
            }
            if !seen.insert(stop) {
                return Err(SolveRequestValidationError::DuplicateStop { stop: stop.clone() });
            }
        }
        Ok(())
    }
}

/// Information about how a solve was carried out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent inside the solver.
    pub solve_time: Duration,
    /// Number of legs moved to their alternative mode.
    pub legs_switched: usize,
    /// Number of cost matrix lookups performed.
    pub oracle_queries: u64,
}

/// Response from a successful solve.
///
/// An over-budget route is still a successful solve: `budget_met` is `false`
/// and the route carries the lowest cost the optimiser reached.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The tour with its per-leg modes and totals.
    pub route: Route,
    /// Budget the route was optimised against.
    pub budget: f64,
    /// Whether `route.total_cost()` is within `budget`.
    pub budget_met: bool,
    /// Diagnostic information about the solve.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Error)]
pub enum SolveError {
    /// Request parameters were invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] SolveRequestValidationError),
    /// The cost matrix could not answer a required lookup.
    #[error(transparent)]
    CostLookup(#[from] CostLookupError),
    /// The constructed legs did not form a closed tour.
    #[error("constructed route is malformed: {0}")]
    MalformedRoute(#[from] RouteShapeError),
}

/// Plan a tour that satisfies the caller's stops and budget.
///
/// Implementations should return [`SolveError::InvalidRequest`] for invalid
/// parameters rather than panicking, and pass oracle failures through
/// unchanged. Solvers must be `Send + Sync` to operate safely across threads.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a response or an error.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}
