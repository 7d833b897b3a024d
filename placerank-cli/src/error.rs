//! Error types emitted by the Placerank CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use placerank_data::LoadError;
use placerank_scorer::{FitError, RankError, UnknownLanguage};
use thiserror::Error;

/// Exit code for failures other than a missing place.
const EXIT_FAILURE: i32 = 1;

/// Exit code when the requested place does not exist.
const EXIT_NOT_FOUND: i32 = 2;

/// Errors emitted by the Placerank CLI.
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
        /// Flag name.
        field: &'static str,
        /// Environment variable name.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
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
    /// The configured language is not supported.
    #[error(transparent)]
    InvalidLanguage(#[from] UnknownLanguage),
    /// Ranking weight overrides were rejected before loading.
    #[error("invalid ranking configuration: {0}")]
    InvalidWeights(#[source] FitError),
    /// Loading the corpus failed.
    #[error("failed to load corpus: {0}")]
    Load(#[from] LoadError),
    /// Fitting the ranking engine failed.
    #[error("failed to fit ranking engine: {0}")]
    Fit(#[from] FitError),
    /// The ranking query failed.
    #[error(transparent)]
    Rank(#[from] RankError),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Serializing the result failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Rank(RankError::NotFound { .. }) => EXIT_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }
}
