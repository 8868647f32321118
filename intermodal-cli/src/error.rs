//! Error types emitted by the intermodal CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use intermodal_routing::{ProviderBuildError, ResolveError};
use intermodal_scorer::{OptimizerError, ParseNormalisationMethodError};
use thiserror::Error;

/// Errors emitted by the intermodal CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The normalisation method label is not recognised.
    #[error(transparent)]
    InvalidMethod(#[from] ParseNormalisationMethodError),
    /// Opening a request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The optimizer rejected the candidate plans.
    #[error("comparison failed: {0}")]
    Compare(#[from] OptimizerError),
    /// Constructing the distance service failed.
    #[error("failed to build distance service for {base_url:?}: {source}")]
    BuildDistanceService {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Resolving the itinerary failed.
    #[error("route resolution failed: {0}")]
    Resolve(#[from] ResolveError),
    /// Serializing the command output failed.
    #[error("failed to serialize output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
