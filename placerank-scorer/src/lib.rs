//! Relevance ranking for tourist places.
//!
//! The crate turns a [`CorpusStore`](placerank_core::CorpusStore) into a
//! fitted ranking engine:
//! - **Normalization** lower-cases, strips punctuation and numbers, and
//!   reduces each word to its base form via a pluggable [`Lemmatizer`].
//! - **Similarity** fits a TF-IDF space on the reference texts to measure
//!   how closely each place matches them, and a second space on the
//!   catalogue itself to measure how closely places match each other.
//! - **Scoring** averages the best reference matches, adds a negligible
//!   popularity prior for tie-breaking, and optionally biases the result
//!   towards places similar to a viewing history.
//!
//! # Examples
//!
//! ```
//! use placerank_core::{CorpusStore, DEFAULT_IMAGE_LINK, Place};
//! use placerank_scorer::{Language, Normalizer, Ranker, UnfittedEngine};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus = CorpusStore::new(
//!     vec![
//!         Place::new(1, "Cathedral", "old stone cathedral", DEFAULT_IMAGE_LINK, None),
//!         Place::new(2, "Museum", "modern art", DEFAULT_IMAGE_LINK, Some(5.0)),
//!     ],
//!     vec!["ancient cathedral".to_owned()],
//! )?;
//!
//! let ranker = Ranker::new();
//! ranker.fit(UnfittedEngine::new(corpus, Normalizer::for_language(Language::English)))?;
//!
//! let ids: Vec<_> = ranker.default_ranking()?.into_iter().map(|p| p.id).collect();
//! assert_eq!(ids, [1, 2]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod normalize;
mod scoring;
mod similarity;
mod tfidf;
mod types;

pub use engine::{FittedEngine, Ranker, UnfittedEngine};
pub use error::{CorpusKind, FitError, RankError};
pub use normalize::{Language, Lemmatizer, Normalizer, SnowballLemmatizer, UnknownLanguage};
pub use scoring::{RECENCY_EXPONENT, base_scores, popularity_term, recency_decay, top_k_mean};
pub use similarity::{Similarities, SimilarityMatrix, fit_similarities};
pub use tfidf::{SparseVector, TfIdfSpace};
pub use types::{
    DEFAULT_HISTORY_WEIGHT, DEFAULT_POPULARITY_WEIGHT, DEFAULT_TOP_K, MAX_RATING, MIN_RATING,
    RELEVANCE_RESOLUTION, RankingWeights, ScoreVector,
};
