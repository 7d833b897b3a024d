//! Facade crate for the Placerank point-of-interest ranking engine.
//!
//! This crate re-exports the core domain types and the ranking engine, and
//! exposes the bundled data sources behind the `sources` feature.

#![forbid(unsafe_code)]

pub use placerank_core::{
    CatalogSource, CorpusError, CorpusStore, DEFAULT_IMAGE_LINK, DEFAULT_RATING, IdIndex,
    ImageSource, Place, PlaceId, PlaceRecord, PlaceRow, ReferenceSource, SourceError,
};
pub use placerank_scorer::{
    CorpusKind, FitError, FittedEngine, Language, Lemmatizer, Normalizer, RankError, Ranker,
    RankingWeights, ScoreVector, SimilarityMatrix, SnowballLemmatizer, UnfittedEngine,
};

#[cfg(feature = "sources")]
pub use placerank_data::{
    CatalogError, HttpImageSource, HttpImageSourceConfig, ImageSourceBuildError,
    JsonReferenceSource, LoadConfig, LoadError, PlaceholderImages, ReferenceError,
    SqliteCatalogSource, load_corpus,
};
