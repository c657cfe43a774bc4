//! Behaviour-driven step definitions driving the solve CLI scenarios.

use super::helpers::{Workspace, request, seed_cost_store, write_request, write_utf8};
use super::*;
use crate::solve::{DefaultSolveSolverBuilder, run_solve_with};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tourplan_core::{
    CostLookupError, LocationId, SolveError, SolveRequestValidationError, SolveResponse,
};

#[derive(Debug)]
struct SolveWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    costs_db: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SolveWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let request_path = workspace.path("request.json");
        let costs_db = workspace.path("travel_costs.db");

        Self {
            workspace,
            request_path,
            costs_db,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["tourplan".to_string(), "solve".to_string()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_string());
        }
        argv.extend([
            format!("--{ARG_COSTS_DB}"),
            self.costs_db.as_str().to_string(),
        ]);
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn response(&self) -> SolveResponse {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");

        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be JSON solve response")
    }

    fn with_error<R>(&self, check: impl FnOnce(&CliError) -> R) -> R {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        check(error)
    }
}

#[fixture]
fn world() -> SolveWorld {
    SolveWorld::new()
}

#[given("a cost store seeded around the hotel")]
fn cost_store_seeded(#[from(world)] world: &SolveWorld) {
    seed_cost_store(&world.costs_db);
}

#[given("a solve request visiting {first} and {second} with budget {budget}")]
fn solve_request_visiting(
    #[from(world)] world: &SolveWorld,
    first: String,
    second: String,
    budget: f64,
) {
    write_request(
        &world.request_path,
        &request(&[first.as_str(), second.as_str()], budget),
    );
}

#[given("I pass the budget {budget} on the command line")]
fn pass_budget_flag(#[from(world)] world: &SolveWorld, budget: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_SOLVE_BUDGET}"), budget]);
}

#[given("the solve request contains invalid JSON")]
fn solve_request_contains_invalid_json(#[from(world)] world: &SolveWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the solve request lists no stops")]
fn solve_request_lists_no_stops(#[from(world)] world: &SolveWorld) {
    write_request(&world.request_path, &request(&[], 10.0));
}

#[given("I omit the solve request path")]
fn omit_solve_request_path(#[from(world)] world: &SolveWorld) {
    *world.include_request.borrow_mut() = false;
}

#[when("I run the solve command")]
fn run_solve_command(#[from(world)] world: &SolveWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Solve(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_solve_with(args, &DefaultSolveSolverBuilder, &mut *buffer)
        }
        Command::Ingest(_) => panic!("expected solve command"),
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints JSON output")]
fn command_succeeds_and_prints_json(#[from(world)] world: &SolveWorld) {
    let response = world.response();
    assert!(!response.route.legs().is_empty());
    assert!(world.workspace.path("travel_costs.db").exists());
}

#[then("the printed tour visits {tour}")]
fn printed_tour_visits(#[from(world)] world: &SolveWorld, tour: String) {
    let expected: Vec<&str> = tour.split_whitespace().collect();
    let response = world.response();
    let stops: Vec<&str> = response.route.stops().iter().map(LocationId::as_str).collect();
    assert_eq!(stops, expected);
}

#[then("the response echoes the budget {budget}")]
#[expect(clippy::float_cmp, reason = "the budget is copied, not computed")]
fn response_echoes_budget(#[from(world)] world: &SolveWorld, budget: f64) {
    assert_eq!(world.response().budget, budget);
}

#[then("the printed budget is met with {count} legs switched")]
fn printed_budget_met(#[from(world)] world: &SolveWorld, count: usize) {
    let response = world.response();
    assert!(response.budget_met);
    assert_eq!(response.diagnostics.legs_switched, count);
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &SolveWorld) {
    world.with_error(|error| match error {
        CliError::ParseSolveRequest { .. } => {}
        other => panic!("expected ParseSolveRequest, found {other:?}"),
    });
}

#[then("the command fails because the request is invalid")]
fn command_fails_invalid_request(#[from(world)] world: &SolveWorld) {
    world.with_error(|error| match error {
        CliError::InvalidSolveRequest { source, .. } => {
            assert_eq!(*source, SolveRequestValidationError::EmptyStops);
        }
        other => panic!("expected InvalidSolveRequest, found {other:?}"),
    });
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &SolveWorld) {
    world.with_error(|error| match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_SOLVE_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    });
}

#[then("the command fails because travel data is missing")]
fn command_fails_missing_travel_data(#[from(world)] world: &SolveWorld) {
    world.with_error(|error| match error {
        CliError::Solve {
            source: SolveError::CostLookup(CostLookupError::NoData { from, to, .. }),
        } => assert!(from.as_str() == "park" || to.as_str() == "park"),
        other => panic!("expected missing travel data, found {other:?}"),
    });
}

macro_rules! register_solve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/solve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SolveWorld) {
            let _ = world;
        }
    };
}

register_solve_scenario!(solve_happy_path, "solving a request against the cost store");
register_solve_scenario!(solve_budget_override, "overriding the request budget");
register_solve_scenario!(solve_invalid_json, "rejecting invalid JSON input");
register_solve_scenario!(solve_invalid_request, "rejecting invalid solve requests");
register_solve_scenario!(solve_missing_request, "rejecting missing request paths");
register_solve_scenario!(solve_missing_travel_data, "reporting missing travel data");
