//! End-to-end solves against a persisted SQLite cost matrix.

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tourplan_core::{
    CostLookupError, LocationId, SolveError, SolveRequest, Solver, SqliteCostSource,
    TransportMode, TravelCostRecord, persist_travel_costs,
};
use tourplan_solver_greedy::GreedySolver;

struct Store {
    _dir: TempDir,
    path: Utf8PathBuf,
}

#[expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "fixtures should fail fast during setup and derive walk times"
)]
#[fixture]
fn store() -> Store {
    let dir = TempDir::new().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("travel_costs.db")).expect("utf-8 path");

    let mut records = Vec::new();
    let pairs = [
        ("hotel", "zoo", 10.0),
        ("museum", "hotel", 20.0),
        ("zoo", "museum", 5.0),
    ];
    for (a, b, fast_time) in pairs {
        records.push(TravelCostRecord::new(a, b, TransportMode::Fast, fast_time, 6.0));
        records.push(TravelCostRecord::new(a, b, TransportMode::Walk, fast_time * 8.0, 0.0));
    }
    // Only the hotel-zoo pair has a bus service.
    records.push(TravelCostRecord::new("zoo", "hotel", TransportMode::Bus, 20.0, 1.0));
    persist_travel_costs(&path, &records).expect("persist records");

    Store { _dir: dir, path }
}

fn request(stops: &[&str], budget: f64) -> SolveRequest {
    SolveRequest {
        origin: "hotel".into(),
        stops: stops.iter().copied().map(LocationId::from).collect(),
        budget,
    }
}

#[rstest]
fn solves_against_persisted_costs(store: Store) {
    let source = SqliteCostSource::open(store.path.as_std_path()).expect("open store");
    let solver = GreedySolver::new(source);

    let response = solver.solve(&request(&["zoo"], 12.0)).expect("solve");

    assert!(response.budget_met);
    assert_eq!(response.route.legs().len(), 2);
    assert_eq!(response.diagnostics.oracle_queries, 1 + 6);
}

#[rstest]
fn missing_rows_surface_as_lookup_errors(store: Store) {
    let source = SqliteCostSource::open(store.path.as_std_path()).expect("open store");
    let solver = GreedySolver::new(source);

    let err = solver
        .solve(&request(&["zoo", "museum"], 100.0))
        .expect_err("zoo-museum has no bus row");
    assert!(matches!(
        err,
        SolveError::CostLookup(CostLookupError::NoData {
            mode: TransportMode::Bus,
            ..
        })
    ));
}

#[rstest]
fn failed_solves_release_the_store(store: Store) {
    let source = SqliteCostSource::open(store.path.as_std_path()).expect("open store");
    let solver = GreedySolver::new(source);

    assert!(solver.solve(&request(&["zoo", "museum"], 100.0)).is_err());
    let response = solver
        .solve(&request(&["zoo"], 1.0))
        .expect("a later solve reuses the connection");
    assert!(!response.budget_met);
    assert_eq!(response.route.total_cost(), 2.0);
}
