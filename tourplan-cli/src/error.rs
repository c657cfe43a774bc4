//! Error types emitted by the Tourplan CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tourplan_core::{
    PersistTravelCostsError, SolveError, SolveRequestValidationError, SqliteCostStoreError,
};

/// Errors emitted by the Tourplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced path exists but is not a regular file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the solve request file failed.
    #[error("failed to open solve request at {path:?}: {source}")]
    OpenSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Solve request JSON could not be decoded.
    #[error("failed to parse solve request JSON at {path:?}: {source}")]
    ParseSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The solve request payload failed validation.
    #[error("solve request in {path:?} failed validation: {source}")]
    InvalidSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// The violated constraint.
        #[source]
        source: SolveRequestValidationError,
    },
    /// Opening the SQLite cost store failed.
    #[error("failed to open cost store at {path:?}: {source}")]
    OpenCostStore {
        /// Cost store path.
        path: Utf8PathBuf,
        /// Store error.
        #[source]
        source: SqliteCostStoreError,
    },
    /// The solver could not plan a tour.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver error, including missing travel data.
        #[source]
        source: SolveError,
    },
    /// Serialising the solve response failed.
    #[error("failed to serialise solve response: {0}")]
    SerialiseSolveResponse(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write command output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Opening the travel cost records file failed.
    #[error("failed to open travel cost records at {path:?}: {source}")]
    OpenRecords {
        /// Records file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Travel cost records JSON could not be decoded.
    #[error("failed to parse travel cost records at {path:?}: {source}")]
    ParseRecords {
        /// Records file path.
        path: Utf8PathBuf,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the records into the cost store failed.
    #[error("failed to persist travel costs into {path:?}: {source}")]
    PersistRecords {
        /// Cost store path.
        path: Utf8PathBuf,
        /// Persistence error.
        #[source]
        source: Box<PersistTravelCostsError>,
    },
}
