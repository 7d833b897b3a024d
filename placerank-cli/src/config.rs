//! Subcommand arguments and their resolved configurations.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use placerank_core::PlaceId;
use placerank_data::{HttpImageSourceConfig, LoadConfig};
use placerank_scorer::{Language, RankingWeights};
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::{
    ARG_CATALOG_DB, ARG_HISTORY, ARG_HISTORY_WEIGHT, ARG_IMAGES_TIMEOUT, ARG_IMAGES_URL,
    ARG_LANGUAGE, ARG_OUTPUT, ARG_PLACE_ID, ARG_REFERENCE, ARG_TOP_K, ENV_PLACE_CATALOG_DB,
    ENV_PLACE_ID, ENV_PLACE_REFERENCE, ENV_RANK_CATALOG_DB, ENV_RANK_REFERENCE,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank every catalogue place against the reference set. Pass \
                 --history with viewed place ids in viewing order (oldest first) \
                 to bias the ranking towards similar places.",
    about = "Rank catalogue places, optionally biased by viewing history"
)]
#[ortho_config(prefix = "PLACERANK")]
pub(crate) struct RankArgs {
    /// Viewed place ids in viewing order, oldest first.
    #[arg(long = ARG_HISTORY, value_name = "id", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) history: Vec<PlaceId>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Path to the JSON reference file.
    #[arg(long = ARG_REFERENCE, value_name = "path")]
    #[serde(default)]
    pub(crate) reference: Option<Utf8PathBuf>,
    /// Image listing endpoint; placeholders are used when omitted.
    #[arg(long = ARG_IMAGES_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) images_url: Option<String>,
    /// Listing request timeout in seconds.
    #[arg(long = ARG_IMAGES_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) images_timeout: Option<u64>,
    /// Morphology used for normalization (`russian` or `english`).
    #[arg(long = ARG_LANGUAGE, value_name = "name")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// Number of closest reference texts averaged into the base score.
    #[arg(long = ARG_TOP_K, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Strength of the viewing-history bias.
    #[arg(long = ARG_HISTORY_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) history_weight: Option<f64>,
    /// Write JSON here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// CLI arguments for the `place` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print a single catalogue place by id")]
#[ortho_config(prefix = "PLACERANK")]
pub(crate) struct PlaceArgs {
    /// Identifier of the place to print.
    #[arg(value_name = ARG_PLACE_ID)]
    #[serde(default)]
    pub(crate) id: Option<PlaceId>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Path to the JSON reference file.
    #[arg(long = ARG_REFERENCE, value_name = "path")]
    #[serde(default)]
    pub(crate) reference: Option<Utf8PathBuf>,
    /// Image listing endpoint; placeholders are used when omitted.
    #[arg(long = ARG_IMAGES_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) images_url: Option<String>,
    /// Listing request timeout in seconds.
    #[arg(long = ARG_IMAGES_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) images_timeout: Option<u64>,
    /// Morphology used for normalization (`russian` or `english`).
    #[arg(long = ARG_LANGUAGE, value_name = "name")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// Write JSON here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlaceArgs {
    pub(crate) fn into_config(self) -> Result<PlaceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlaceConfig::try_from(merged)
    }
}

/// Where the corpus is loaded from and how its text is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceConfig {
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) reference: Utf8PathBuf,
    pub(crate) images: Option<HttpImageSourceConfig>,
    pub(crate) language: Language,
}

/// Optional source settings shared by every subcommand.
struct SourceArgs {
    catalog_db: Option<Utf8PathBuf>,
    reference: Option<Utf8PathBuf>,
    images_url: Option<String>,
    images_timeout: Option<u64>,
    language: Option<String>,
}

impl SourceConfig {
    fn resolve(
        args: SourceArgs,
        catalog_env: &'static str,
        reference_env: &'static str,
    ) -> Result<Self, CliError> {
        let catalog_db = args.catalog_db.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG_DB,
            env: catalog_env,
        })?;
        let reference = args.reference.ok_or(CliError::MissingArgument {
            field: ARG_REFERENCE,
            env: reference_env,
        })?;
        let language = match args.language {
            Some(name) => name.parse()?,
            None => Language::default(),
        };
        let images = args.images_url.map(|url| {
            let config = HttpImageSourceConfig::new(url);
            match args.images_timeout {
                Some(secs) => config.with_timeout(Duration::from_secs(secs)),
                None => config,
            }
        });
        Ok(Self {
            catalog_db,
            reference,
            images,
            language,
        })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.catalog_db, ARG_CATALOG_DB)?;
        Self::require_existing(&self.reference, ARG_REFERENCE)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match placerank_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn load_config(&self) -> LoadConfig {
        LoadConfig {
            catalog_db: self.catalog_db.clone(),
            reference: self.reference.clone(),
            images: self.images.clone(),
        }
    }
}

/// Fully resolved `rank` invocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) sources: SourceConfig,
    pub(crate) history: Vec<PlaceId>,
    pub(crate) weights: RankingWeights,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let sources = SourceConfig::resolve(
            SourceArgs {
                catalog_db: args.catalog_db,
                reference: args.reference,
                images_url: args.images_url,
                images_timeout: args.images_timeout,
                language: args.language,
            },
            ENV_RANK_CATALOG_DB,
            ENV_RANK_REFERENCE,
        )?;
        let mut weights = RankingWeights::default();
        if let Some(top_k) = args.top_k {
            weights = weights.with_top_k(top_k);
        }
        if let Some(history) = args.history_weight {
            weights = weights.with_history(history);
        }
        Ok(Self {
            sources,
            history: args.history,
            weights: weights.validate().map_err(CliError::InvalidWeights)?,
            output: args.output,
        })
    }
}

/// Fully resolved `place` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceConfig {
    pub(crate) sources: SourceConfig,
    pub(crate) id: PlaceId,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<PlaceArgs> for PlaceConfig {
    type Error = CliError;

    fn try_from(args: PlaceArgs) -> Result<Self, Self::Error> {
        let id = args.id.ok_or(CliError::MissingArgument {
            field: ARG_PLACE_ID,
            env: ENV_PLACE_ID,
        })?;
        let sources = SourceConfig::resolve(
            SourceArgs {
                catalog_db: args.catalog_db,
                reference: args.reference,
                images_url: args.images_url,
                images_timeout: args.images_timeout,
                language: args.language,
            },
            ENV_PLACE_CATALOG_DB,
            ENV_PLACE_REFERENCE,
        )?;
        Ok(Self {
            sources,
            id,
            output: args.output,
        })
    }
}
