//! Execution of the `rank` and `place` subcommands.

use std::io::{self, BufWriter, Write};

use camino::Utf8Path;
use log::info;
use placerank_data::load_corpus;
use placerank_scorer::{Normalizer, Ranker, RankingWeights, UnfittedEngine};
use serde::Serialize;

use crate::config::{PlaceArgs, PlaceConfig, RankArgs, RankConfig, SourceConfig};
use crate::error::CliError;

/// Produces a fitted [`Ranker`] from resolved source settings.
pub(crate) trait RankerBuilder {
    fn build(&self, sources: &SourceConfig, weights: RankingWeights) -> Result<Ranker, CliError>;
}

/// Loads the corpus from disk and the listing service, then fits it.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct DefaultRankerBuilder;

impl RankerBuilder for DefaultRankerBuilder {
    fn build(&self, sources: &SourceConfig, weights: RankingWeights) -> Result<Ranker, CliError> {
        sources.validate_sources()?;
        let corpus = load_corpus(&sources.load_config())?;
        info!(
            "loaded {} places and {} reference texts",
            corpus.len(),
            corpus.reference().len()
        );
        let engine = UnfittedEngine::new(corpus, Normalizer::for_language(sources.language))
            .with_weights(weights);
        let ranker = Ranker::new();
        ranker.fit(engine)?;
        Ok(ranker)
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut rendered = Vec::new();
    run_rank_with(&config, &DefaultRankerBuilder, &mut rendered)?;
    emit(config.output.as_deref(), &rendered)
}

pub(crate) fn run_place(args: PlaceArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut rendered = Vec::new();
    run_place_with(&config, &DefaultRankerBuilder, &mut rendered)?;
    emit(config.output.as_deref(), &rendered)
}

pub(crate) fn run_rank_with(
    config: &RankConfig,
    builder: &dyn RankerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let ranker = builder.build(&config.sources, config.weights)?;
    let records = if config.history.is_empty() {
        ranker.default_ranking()?
    } else {
        ranker.ranking_with_history(&config.history)?
    };
    write_json(writer, &records)
}

pub(crate) fn run_place_with(
    config: &PlaceConfig,
    builder: &dyn RankerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let ranker = builder.build(&config.sources, RankingWeights::default())?;
    let record = ranker.get_place(config.id)?;
    write_json(writer, &record)
}

/// Write a fully rendered result. Only called once the command has
/// succeeded; a failed command never touches the output file.
fn emit(path: Option<&Utf8Path>, rendered: &[u8]) -> Result<(), CliError> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => {
            let file =
                placerank_fs::create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.to_path_buf(),
                    source,
                })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    writer
        .write_all(rendered)
        .and_then(|()| writer.flush())
        .map_err(CliError::WriteOutput)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .and_then(|()| writer.flush())
        .map_err(CliError::WriteOutput)
}
