//! Unit tests for argument parsing and configuration resolution.

use camino::Utf8PathBuf;
use clap::Parser;
use placerank_core::PlaceId;
use placerank_scorer::{FitError, Language, RankError, RankingWeights};
use rstest::rstest;

use super::helpers::CatalogueFiles;
use super::*;
use crate::config::{PlaceArgs, PlaceConfig, RankArgs, RankConfig};

fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("placerank").chain(args.iter().copied());
    Cli::try_parse_from(argv).expect("parse arguments").command
}

fn rank_args(args: &[&str]) -> RankArgs {
    match parse(args) {
        Command::Rank(args) => args,
        other => panic!("expected rank command, found {other:?}"),
    }
}

fn place_args(args: &[&str]) -> PlaceArgs {
    match parse(args) {
        Command::Place(args) => args,
        other => panic!("expected place command, found {other:?}"),
    }
}

#[rstest]
#[case(&["rank", "--history", "3", "--history", "5"], vec![3, 5])]
#[case(&["rank", "--history", "7,2,9"], vec![7, 2, 9])]
#[case(&["rank"], Vec::new())]
fn parses_history_in_order(#[case] args: &[&str], #[case] expected: Vec<PlaceId>) {
    assert_eq!(rank_args(args).history, expected);
}

#[rstest]
fn rejects_non_numeric_history() {
    let err = Cli::try_parse_from(["placerank", "rank", "--history", "cathedral"])
        .expect_err("history ids must be numeric");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[rstest]
fn resolves_rank_defaults() {
    let args = rank_args(&["rank", "--catalog-db", "places.db", "--reference", "etalon.json"]);
    let config = RankConfig::try_from(args).expect("resolve config");
    assert_eq!(config.sources.catalog_db, Utf8PathBuf::from("places.db"));
    assert_eq!(config.sources.reference, Utf8PathBuf::from("etalon.json"));
    assert_eq!(config.sources.language, Language::Russian);
    assert_eq!(config.sources.images, None);
    assert_eq!(config.weights, RankingWeights::default());
    assert!(config.history.is_empty());
    assert!(config.output.is_none());
}

#[rstest]
fn applies_weight_overrides() {
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        "places.db",
        "--reference",
        "etalon.json",
        "--top-k",
        "3",
        "--history-weight",
        "0.25",
    ]);
    let config = RankConfig::try_from(args).expect("resolve config");
    assert_eq!(config.weights.top_k, 3);
    assert!((config.weights.history - 0.25).abs() < f64::EPSILON);
}

#[rstest]
fn rejects_zero_top_k() {
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        "places.db",
        "--reference",
        "etalon.json",
        "--top-k",
        "0",
    ]);
    let err = RankConfig::try_from(args).expect_err("zero top-k is invalid");
    assert!(matches!(
        err,
        CliError::InvalidWeights(FitError::InvalidWeights { .. })
    ));
    assert!(
        err.to_string().starts_with("invalid ranking configuration"),
        "unexpected message: {err}"
    );
}

#[rstest]
fn rejects_negative_history_weight() {
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        "places.db",
        "--reference",
        "etalon.json",
        "--history-weight=-0.5",
    ]);
    let err = RankConfig::try_from(args).expect_err("negative weight is invalid");
    assert!(matches!(err, CliError::InvalidWeights(_)));
    assert!(!err.to_string().contains("failed to fit"), "unexpected message: {err}");
}

#[rstest]
fn configures_image_listing() {
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        "places.db",
        "--reference",
        "etalon.json",
        "--images-url",
        "https://listing.example/api/places",
        "--images-timeout",
        "3",
    ]);
    let config = RankConfig::try_from(args).expect("resolve config");
    let images = config.sources.images.expect("image listing configured");
    assert_eq!(images.url, "https://listing.example/api/places");
    assert_eq!(images.timeout.as_secs(), 3);
}

#[rstest]
fn rejects_unknown_language() {
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        "places.db",
        "--reference",
        "etalon.json",
        "--language",
        "klingon",
    ]);
    let err = RankConfig::try_from(args).expect_err("unknown language");
    assert!(matches!(err, CliError::InvalidLanguage(_)));
}

#[rstest]
#[case(&["rank", "--reference", "etalon.json"], ARG_CATALOG_DB, ENV_RANK_CATALOG_DB)]
#[case(&["rank", "--catalog-db", "places.db"], ARG_REFERENCE, ENV_RANK_REFERENCE)]
fn reports_missing_rank_sources(
    #[case] args: &[&str],
    #[case] field: &str,
    #[case] env_var: &str,
) {
    let err = RankConfig::try_from(rank_args(args)).expect_err("missing source");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn place_requires_an_id() {
    let args = place_args(&["place", "--catalog-db", "places.db", "--reference", "etalon.json"]);
    let err = PlaceConfig::try_from(args).expect_err("missing id");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLACE_ID);
            assert_eq!(env, ENV_PLACE_ID);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn resolves_place_config() {
    let args = place_args(&[
        "place",
        "42",
        "--catalog-db",
        "places.db",
        "--reference",
        "etalon.json",
        "--output",
        "out/place.json",
    ]);
    let config = PlaceConfig::try_from(args).expect("resolve config");
    assert_eq!(config.id, 42);
    assert_eq!(config.output, Some(Utf8PathBuf::from("out/place.json")));
}

#[rstest]
fn validate_sources_reports_missing_files() {
    let files = CatalogueFiles::empty();
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        files.catalog_db().as_str(),
        "--reference",
        files.reference().as_str(),
    ]);
    let config = RankConfig::try_from(args).expect("resolve config");
    let err = config.sources.validate_sources().expect_err("missing files");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_CATALOG_DB),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let files = CatalogueFiles::sample();
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        files.catalog_db().as_str(),
        "--reference",
        files.root().as_str(),
    ]);
    let config = RankConfig::try_from(args).expect("resolve config");
    let err = config.sources.validate_sources().expect_err("directory rejected");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_REFERENCE),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_accepts_existing_files() {
    let files = CatalogueFiles::sample();
    let args = rank_args(&[
        "rank",
        "--catalog-db",
        files.catalog_db().as_str(),
        "--reference",
        files.reference().as_str(),
    ]);
    let config = RankConfig::try_from(args).expect("resolve config");
    config.sources.validate_sources().expect("sources exist");
}

#[rstest]
#[case(CliError::Rank(RankError::NotFound { id: 7 }), 2)]
#[case(CliError::Rank(RankError::UnknownPlace { id: 7 }), 1)]
#[case(CliError::Rank(RankError::NotFitted), 1)]
#[case(CliError::MissingArgument { field: ARG_CATALOG_DB, env: ENV_RANK_CATALOG_DB }, 1)]
fn maps_errors_to_exit_codes(#[case] err: CliError, #[case] expected: i32) {
    assert_eq!(err.exit_code(), expected);
}
