//! Command-line front-end for the Placerank engine.
//!
//! Each invocation loads the corpus, fits the ranking engine once and
//! answers a single query, printing the result as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;

pub use error::CliError;

use commands::{run_place, run_rank};
use config::{PlaceArgs, RankArgs};

pub(crate) const ARG_CATALOG_DB: &str = "catalog-db";
pub(crate) const ARG_REFERENCE: &str = "reference";
pub(crate) const ARG_IMAGES_URL: &str = "images-url";
pub(crate) const ARG_IMAGES_TIMEOUT: &str = "images-timeout";
pub(crate) const ARG_LANGUAGE: &str = "language";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_HISTORY: &str = "history";
pub(crate) const ARG_TOP_K: &str = "top-k";
pub(crate) const ARG_HISTORY_WEIGHT: &str = "history-weight";
pub(crate) const ARG_PLACE_ID: &str = "id";

pub(crate) const ENV_RANK_CATALOG_DB: &str = "PLACERANK_CMDS_RANK_CATALOG_DB";
pub(crate) const ENV_RANK_REFERENCE: &str = "PLACERANK_CMDS_RANK_REFERENCE";
pub(crate) const ENV_PLACE_CATALOG_DB: &str = "PLACERANK_CMDS_PLACE_CATALOG_DB";
pub(crate) const ENV_PLACE_REFERENCE: &str = "PLACERANK_CMDS_PLACE_REFERENCE";
pub(crate) const ENV_PLACE_ID: &str = "PLACERANK_CMDS_PLACE_ID";

/// Run the Placerank CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, loading, fitting or
/// the query itself fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Place(args) => run_place(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "placerank",
    about = "Rank tourist places by similarity to a reference set",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every place, most relevant first.
    Rank(RankArgs),
    /// Print a single place by id.
    Place(PlaceArgs),
}

#[cfg(test)]
mod tests;
