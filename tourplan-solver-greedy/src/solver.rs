//! [`GreedySolver`]: the nearest-neighbour tour with greedy budget repair.

use std::time::Instant;

use tourplan_core::{CostSource, Diagnostics, SolveError, SolveRequest, SolveResponse, Solver};

use crate::budget::enforce_budget;
use crate::construct::construct_route;
use crate::counting::CountingOracle;

/// Solver that builds a fast-mode tour and then trades time for money.
///
/// Each call to [`Solver::solve`] opens one session on the cost source and
/// drops it once every leg is priced, so a failed lookup never leaves the
/// backing store locked.
///
/// # Examples
///
/// ```
/// use tourplan_core::{MemoryCostMatrix, SolveRequest, Solver, TransportMode};
/// use tourplan_solver_greedy::GreedySolver;
///
/// let matrix = MemoryCostMatrix::new()
///     .with_entry("hotel", "zoo", TransportMode::Fast, 10.0, 6.0)
///     .with_entry("hotel", "zoo", TransportMode::Bus, 20.0, 1.0)
///     .with_entry("hotel", "zoo", TransportMode::Walk, 60.0, 0.0);
/// let solver = GreedySolver::new(matrix);
///
/// let request = SolveRequest {
///     origin: "hotel".into(),
///     stops: vec!["zoo".into()],
///     budget: 8.0,
/// };
/// let response = solver.solve(&request)?;
/// assert!(response.budget_met);
/// assert_eq!(response.route.total_cost(), 7.0);
/// # Ok::<(), tourplan_core::SolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedySolver<S> {
    source: S,
}

impl<S> GreedySolver<S>
where
    S: CostSource,
{
    /// Construct a solver reading travel costs from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S> Solver for GreedySolver<S>
where
    S: CostSource + Send + Sync,
{
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        request.validate()?;
        let started_at = Instant::now();

        let (mut route, oracle_queries) = {
            let session = self.source.open_session()?;
            let oracle = CountingOracle::new(&session);
            let route = construct_route(&oracle, &request.origin, &request.stops)?;
            (route, oracle.queries())
        };

        let outcome = enforce_budget(&mut route, request.budget);
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            legs_switched: outcome.legs_switched,
            oracle_queries,
        };
        log::info!(
            "solved tour from {} over {} stops: time {}, cost {} (budget {}, met: {}) in {:?}",
            request.origin,
            request.stops.len(),
            route.total_time(),
            route.total_cost(),
            request.budget,
            outcome.budget_met,
            diagnostics.solve_time
        );

        Ok(SolveResponse {
            route,
            budget: request.budget,
            budget_met: outcome.budget_met,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tourplan_core::{
        CostLookupError, LocationId, MemoryCostMatrix, SolveRequestValidationError, TransportMode,
    };

    fn request(stops: &[&str], budget: f64) -> SolveRequest {
        SolveRequest {
            origin: "o".into(),
            stops: stops.iter().copied().map(LocationId::from).collect(),
            budget,
        }
    }

    fn modes(response: &SolveResponse) -> Vec<TransportMode> {
        response
            .route
            .legs()
            .iter()
            .map(tourplan_core::Leg::active_transport)
            .collect()
    }

    /// Fast O–X=10, O–Y=20, X–Y=5; every pair has bus and walk entries.
    #[fixture]
    #[expect(
        clippy::float_arithmetic,
        reason = "fixture derives bus and walk entries from the fast time"
    )]
    fn triangle() -> MemoryCostMatrix {
        [("o", "x", 10.0), ("o", "y", 20.0), ("x", "y", 5.0)]
            .into_iter()
            .fold(MemoryCostMatrix::new(), |matrix, (a, b, time)| {
                matrix
                    .with_entry(a, b, TransportMode::Fast, time, 6.0)
                    .with_entry(a, b, TransportMode::Bus, time * 2.0, 1.0)
                    .with_entry(a, b, TransportMode::Walk, time * 8.0, 0.0)
            })
    }

    #[rstest]
    fn generous_budgets_keep_every_leg_fast(triangle: MemoryCostMatrix) {
        let response = GreedySolver::new(triangle)
            .solve(&request(&["y", "x"], 100.0))
            .expect("solve");

        let stops: Vec<&str> = response.route.stops().iter().map(LocationId::as_str).collect();
        assert_eq!(stops, ["o", "x", "y", "o"]);
        assert!(response.budget_met);
        assert_eq!(response.route.total_time(), 35.0);
        assert_eq!(response.route.total_cost(), 18.0);
        assert_eq!(modes(&response), [TransportMode::Fast; 3]);
        assert_eq!(response.diagnostics.legs_switched, 0);
    }

    #[rstest]
    fn tight_budgets_switch_legs_in_efficiency_order(triangle: MemoryCostMatrix) {
        // Bus efficiency is time / 5 per leg, so x-y (5) switches before o-x (10).
        let response = GreedySolver::new(triangle)
            .solve(&request(&["x", "y"], 9.0))
            .expect("solve");

        assert!(response.budget_met);
        assert_eq!(response.diagnostics.legs_switched, 2);
        assert_eq!(
            modes(&response),
            [TransportMode::Bus, TransportMode::Bus, TransportMode::Fast]
        );
        assert_eq!(response.route.total_cost(), 8.0);
        assert_eq!(response.route.total_time(), 50.0);
    }

    #[rstest]
    fn unreachable_budgets_are_reported_not_raised(triangle: MemoryCostMatrix) {
        let response = GreedySolver::new(triangle)
            .solve(&request(&["x", "y"], 0.0))
            .expect("solve");

        assert!(!response.budget_met);
        assert_eq!(response.budget, 0.0);
        assert_eq!(response.diagnostics.legs_switched, 3);
        assert_eq!(response.route.total_cost(), 3.0);
    }

    #[rstest]
    fn counts_every_lookup(triangle: MemoryCostMatrix) {
        let response = GreedySolver::new(triangle)
            .solve(&request(&["x", "y"], 100.0))
            .expect("solve");
        // Three lookups to order two stops, then three modes for each of three legs.
        assert_eq!(response.diagnostics.oracle_queries, 3 + 9);
    }

    #[rstest]
    fn missing_entries_fail_the_solve_unchanged() {
        let matrix = MemoryCostMatrix::new()
            .with_entry("o", "x", TransportMode::Fast, 10.0, 6.0)
            .with_entry("o", "x", TransportMode::Walk, 60.0, 0.0);
        let err = GreedySolver::new(matrix)
            .solve(&request(&["x"], 10.0))
            .expect_err("no bus entry");

        match err {
            SolveError::CostLookup(CostLookupError::NoData { from, to, mode }) => {
                assert_eq!(from.as_str(), "o");
                assert_eq!(to.as_str(), "x");
                assert_eq!(mode, TransportMode::Bus);
            }
            other => panic!("expected missing bus data, got {other:?}"),
        }
    }

    #[rstest]
    fn invalid_requests_are_rejected_before_lookup(triangle: MemoryCostMatrix) {
        let err = GreedySolver::new(triangle)
            .solve(&request(&["x", "x"], 10.0))
            .expect_err("duplicate stop");
        assert!(matches!(
            err,
            SolveError::InvalidRequest(SolveRequestValidationError::DuplicateStop { .. })
        ));
    }
}
