//! Solve command implementation for the Tourplan CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use tourplan_core::{SolveRequest, SolveResponse, Solver, SqliteCostSource};
use tourplan_solver_greedy::GreedySolver;

use crate::fs::{open_utf8_file, require_existing};
use crate::{
    ARG_COSTS_DB, ARG_SOLVE_BUDGET, ARG_SOLVE_REQUEST, CliError, DEFAULT_COSTS_DB,
    ENV_SOLVE_REQUEST,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a tour for a JSON-encoded SolveRequest. Travel times \
                 and costs come from the SQLite cost store written by \
                 `tourplan ingest`. The response is printed as JSON.",
    about = "Plan a budget-aware tour"
)]
#[ortho_config(prefix = "TOURPLAN")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing a SolveRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// SQLite cost store to read (defaults to `./travel_costs.db`).
    #[arg(long = ARG_COSTS_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) costs_db: Option<Utf8PathBuf>,
    /// Replace the budget stated in the request.
    #[arg(long = ARG_SOLVE_BUDGET, value_name = "amount")]
    #[serde(default)]
    pub(crate) budget: Option<f64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the SQLite cost store.
    pub(crate) costs_db: Utf8PathBuf,
    /// Budget that replaces the request's own, if any.
    pub(crate) budget: Option<f64>,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SOLVE_REQUEST)?;
        require_existing(&self.costs_db, ARG_COSTS_DB)?;
        Ok(())
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        let costs_db = args
            .costs_db
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_COSTS_DB));
        Ok(Self {
            request_path,
            costs_db,
            budget: args.budget,
        })
    }
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
        let source = SqliteCostSource::open(config.costs_db.as_std_path()).map_err(|source| {
            CliError::OpenCostStore {
                path: config.costs_db.clone(),
                source,
            }
        })?;
        Ok(Box::new(GreedySolver::new(source)))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_solve(args, builder)?;
    write_solve_response(writer, &response)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveResponse, CliError> {
    let config = resolve_solve_config(args)?;
    let mut request = load_solve_request(&config.request_path)?;
    if let Some(budget) = config.budget {
        log::debug!("overriding request budget {} with {budget}", request.budget);
        request.budget = budget;
    }
    request
        .validate()
        .map_err(|source| CliError::InvalidSolveRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let solver = builder.build(&config)?;
    solver
        .solve(&request)
        .map_err(|source| CliError::Solve { source })
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SolveRequest`] from disk.
pub(super) fn load_solve_request(path: &Utf8Path) -> Result<SolveRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_response(writer: &mut dyn Write, response: &SolveResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseSolveResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
