//! Ingest command: load travel cost records into the SQLite cost store.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use tourplan_core::{TravelCostRecord, persist_travel_costs};

use crate::fs::{open_utf8_file, require_existing, require_file_or_absent};
use crate::{ARG_COSTS_DB, ARG_INGEST_RECORDS, CliError, DEFAULT_COSTS_DB, ENV_INGEST_RECORDS};

/// CLI arguments for the `ingest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a JSON array of travel cost records (from, to, mode, \
                 time, cost) into the SQLite cost store. Pairs are \
                 undirected and re-ingesting a pair replaces its entry.",
    about = "Load travel cost records into the cost store"
)]
#[ortho_config(prefix = "TOURPLAN")]
pub(crate) struct IngestArgs {
    /// Path to a JSON file containing travel cost records.
    #[arg(long = ARG_INGEST_RECORDS, value_name = "path")]
    #[serde(default)]
    pub(crate) records: Option<Utf8PathBuf>,
    /// SQLite cost store to create or update (defaults to `./travel_costs.db`).
    #[arg(long = ARG_COSTS_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) costs_db: Option<Utf8PathBuf>,
}

impl IngestArgs {
    fn into_config(self) -> Result<IngestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IngestConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestConfig {
    pub(crate) records: Utf8PathBuf,
    pub(crate) costs_db: Utf8PathBuf,
}

impl IngestConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.records, ARG_INGEST_RECORDS)?;
        require_file_or_absent(&self.costs_db, ARG_COSTS_DB)?;
        Ok(())
    }
}

impl TryFrom<IngestArgs> for IngestConfig {
    type Error = CliError;

    fn try_from(args: IngestArgs) -> Result<Self, Self::Error> {
        let records = args.records.ok_or(CliError::MissingArgument {
            field: ARG_INGEST_RECORDS,
            env: ENV_INGEST_RECORDS,
        })?;
        let costs_db = args
            .costs_db
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_COSTS_DB));
        Ok(Self { records, costs_db })
    }
}

pub(super) fn run_ingest(args: IngestArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_ingest_with(args, &mut stdout)
}

pub(super) fn run_ingest_with(args: IngestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let written = ingest_records(&config)?;
    writeln!(
        writer,
        "ingested {written} travel cost records into {}",
        config.costs_db
    )
    .map_err(CliError::WriteOutput)
}

pub(super) fn ingest_records(config: &IngestConfig) -> Result<usize, CliError> {
    let records = load_records(&config.records)?;
    persist_travel_costs(&config.costs_db, &records).map_err(|source| CliError::PersistRecords {
        path: config.costs_db.clone(),
        source: Box::new(source),
    })
}

/// Loads a JSON array of [`TravelCostRecord`]s from disk.
pub(super) fn load_records(path: &Utf8Path) -> Result<Vec<TravelCostRecord>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRecords {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRecords {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn ingest_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<IngestConfig, CliError> {
    let merged = IngestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    IngestConfig::try_from(merged)
}
