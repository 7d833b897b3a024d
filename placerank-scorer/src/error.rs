//! Error types raised while fitting and querying the ranking engine.
#![forbid(unsafe_code)]

use std::fmt;

use placerank_core::PlaceId;
use thiserror::Error;

/// Which text collection a fitting error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusKind {
    /// The reference ("etalon") descriptions.
    Reference,
    /// The catalogue of candidate places.
    Catalog,
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Catalog => f.write_str("catalogue"),
        }
    }
}

/// Errors raised while fitting the vector spaces and base scores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    /// A corpus had no documents, or no terms survived normalization.
    #[error("the {corpus} corpus is empty after normalization")]
    EmptyCorpus {
        /// The offending corpus.
        corpus: CorpusKind,
    },
    /// Ranking weights failed validation.
    #[error("invalid ranking weights: {reason}")]
    InvalidWeights {
        /// Which constraint was violated.
        reason: &'static str,
    },
}

/// Errors raised by ranking queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// A query arrived before the engine was fitted.
    #[error("the ranking engine has not been fitted yet")]
    NotFitted,
    /// A viewing history referenced a place outside the catalogue.
    #[error("history references unknown place {id}")]
    UnknownPlace {
        /// Identifier that failed to resolve.
        id: PlaceId,
    },
    /// A direct lookup found no place with the identifier.
    #[error("place {id} not found")]
    NotFound {
        /// Requested identifier.
        id: PlaceId,
    },
}
