//! Command-line interface for planning budget-aware tours.
//!
//! Two subcommands are provided:
//!
//! - `ingest` loads travel cost records from JSON into the SQLite cost store.
//! - `solve` reads a JSON solve request, plans a tour against the cost store
//!   and prints the response as JSON.
//!
//! Options are layered with `ortho_config`: defaults, then configuration
//! files, then `TOURPLAN_*` environment variables, then command-line flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod ingest;
mod solve;

pub use error::CliError;

use ingest::{IngestArgs, run_ingest};
use solve::{SolveArgs, run_solve};

const ARG_SOLVE_REQUEST: &str = "request-path";
const ARG_SOLVE_BUDGET: &str = "budget";
const ARG_COSTS_DB: &str = "costs-db";
const ARG_INGEST_RECORDS: &str = "records";
const ENV_SOLVE_REQUEST: &str = "TOURPLAN_CMDS_SOLVE_REQUEST_PATH";
const ENV_INGEST_RECORDS: &str = "TOURPLAN_CMDS_INGEST_RECORDS";
const DEFAULT_COSTS_DB: &str = "travel_costs.db";

/// Run the Tourplan CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
        Command::Ingest(args) => run_ingest(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourplan",
    about = "Plan tours that fit a travel budget",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load travel cost records into the SQLite cost store.
    Ingest(IngestArgs),
    /// Plan a tour for a JSON solve request.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
