//! Behavioural tests for `GreedySolver` using rstest-bdd.

use std::cell::{Cell, RefCell};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tourplan_core::{
    CostLookupError, Leg, LocationId, MemoryCostMatrix, SolveError, SolveRequest, SolveResponse,
    Solver, TransportMode,
};
use tourplan_solver_greedy::GreedySolver;

const ORIGIN: &str = "hotel";

#[derive(Debug, Default)]
struct GreedyWorld {
    matrix: RefCell<MemoryCostMatrix>,
    stops: RefCell<Vec<LocationId>>,
    budget: Cell<f64>,
    outcome: RefCell<Option<Result<SolveResponse, SolveError>>>,
}

impl GreedyWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn with_response<R>(&self, check: impl FnOnce(&SolveResponse) -> R) -> R {
        let outcome = self.outcome.borrow();
        let response = outcome
            .as_ref()
            .expect("outcome should be recorded before assertions")
            .as_ref()
            .expect("expected solve success");
        check(response)
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn with_error<R>(&self, check: impl FnOnce(&SolveError) -> R) -> R {
        let outcome = self.outcome.borrow();
        let err = outcome
            .as_ref()
            .expect("outcome should be recorded before assertions")
            .as_ref()
            .expect_err("expected solve failure");
        check(err)
    }
}

#[fixture]
fn world() -> GreedyWorld {
    GreedyWorld::default()
}

/// Fast hotel–zoo=10, hotel–museum=20, zoo–museum=5, each costing 6.
#[expect(
    clippy::float_arithmetic,
    reason = "bus and walk entries scale with the fast time"
)]
fn hotel_matrix(with_bus: bool) -> MemoryCostMatrix {
    [
        (ORIGIN, "zoo", 10.0),
        (ORIGIN, "museum", 20.0),
        ("zoo", "museum", 5.0),
    ]
    .into_iter()
    .fold(MemoryCostMatrix::new(), |matrix, (a, b, time)| {
        let priced = matrix
            .with_entry(a, b, TransportMode::Fast, time, 6.0)
            .with_entry(a, b, TransportMode::Walk, time * 8.0, 0.0);
        if with_bus {
            priced.with_entry(a, b, TransportMode::Bus, time * 2.0, 1.0)
        } else {
            priced
        }
    })
}

#[given("a cost matrix around the hotel")]
fn given_matrix(world: &GreedyWorld) {
    world.matrix.replace(hotel_matrix(true));
}

#[given("a cost matrix around the hotel without bus fares")]
fn given_matrix_without_bus(world: &GreedyWorld) {
    world.matrix.replace(hotel_matrix(false));
}

#[given("the stops {first} and {second}")]
fn given_stops(world: &GreedyWorld, first: String, second: String) {
    world
        .stops
        .replace(vec![LocationId::new(first), LocationId::new(second)]);
}

#[given("a budget of {budget}")]
fn given_budget(world: &GreedyWorld, budget: f64) {
    world.budget.set(budget);
}

#[when("the greedy solver runs")]
fn when_solver_runs(world: &GreedyWorld) {
    let solver = GreedySolver::new(world.matrix.borrow().clone());
    let request = SolveRequest {
        origin: ORIGIN.into(),
        stops: world.stops.borrow().clone(),
        budget: world.budget.get(),
    };
    world.outcome.replace(Some(solver.solve(&request)));
}

#[then("the tour order is {order}")]
fn then_tour_order(world: &GreedyWorld, order: String) {
    let expected: Vec<&str> = order.split_whitespace().collect();
    world.with_response(|response| {
        let stops: Vec<&str> = response.route.stops().iter().map(LocationId::as_str).collect();
        assert_eq!(stops, expected);
    });
}

#[then("every leg uses the fast mode")]
fn then_all_fast(world: &GreedyWorld) {
    world.with_response(|response| {
        assert!(
            response
                .route
                .legs()
                .iter()
                .map(Leg::active_transport)
                .all(|mode| mode == TransportMode::Fast)
        );
    });
}

#[then("the budget is met")]
fn then_budget_met(world: &GreedyWorld) {
    world.with_response(|response| assert!(response.budget_met));
}

#[then("the budget is not met")]
fn then_budget_not_met(world: &GreedyWorld) {
    world.with_response(|response| {
        assert!(!response.budget_met);
        assert!(response.route.total_cost() > response.budget);
    });
}

#[then("{count} legs were switched")]
fn then_legs_switched(world: &GreedyWorld, count: usize) {
    world.with_response(|response| assert_eq!(response.diagnostics.legs_switched, count));
}

#[then("the total cost is {cost}")]
#[expect(clippy::float_cmp, reason = "costs are sums of small whole numbers")]
fn then_total_cost(world: &GreedyWorld, cost: f64) {
    world.with_response(|response| assert_eq!(response.route.total_cost(), cost));
}

#[then("the solve fails for missing bus data")]
fn then_missing_bus(world: &GreedyWorld) {
    world.with_error(|err| {
        assert!(matches!(
            err,
            SolveError::CostLookup(CostLookupError::NoData {
                mode: TransportMode::Bus,
                ..
            })
        ));
    });
}

#[then("the request is rejected")]
fn then_rejected(world: &GreedyWorld) {
    world.with_error(|err| assert!(matches!(err, SolveError::InvalidRequest(_))));
}

#[scenario(path = "tests/features/greedy_solver.feature", index = 0)]
fn nearest_stop_first(world: GreedyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/greedy_solver.feature", index = 1)]
fn tight_budget(world: GreedyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/greedy_solver.feature", index = 2)]
fn unreachable_budget(world: GreedyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/greedy_solver.feature", index = 3)]
fn missing_bus_fares(world: GreedyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/greedy_solver.feature", index = 4)]
fn repeated_stops(world: GreedyWorld) {
    let _ = world;
}
