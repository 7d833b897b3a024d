//! The fitted ranking engine and the shared service wrapper around it.
//!
//! Fitting is a typestate transition: an [`UnfittedEngine`] owns the corpus
//! and configuration, and [`UnfittedEngine::fit`] consumes it to produce an
//! immutable [`FittedEngine`]. A [`Ranker`] publishes fitted snapshots to
//! concurrent readers and swaps them atomically on refit.

#![forbid(unsafe_code)]

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info};
use placerank_core::{CorpusStore, PlaceId, PlaceRecord};

use crate::error::{FitError, RankError};
use crate::normalize::Normalizer;
use crate::scoring::{base_scores, history_scores};
use crate::similarity::{Similarities, fit_similarities};
use crate::types::{RankingWeights, ScoreVector};

/// A corpus and configuration awaiting [`fit`](Self::fit).
#[derive(Debug, Clone)]
pub struct UnfittedEngine {
    corpus: CorpusStore,
    normalizer: Normalizer,
    weights: RankingWeights,
}

impl UnfittedEngine {
    /// Prepare an engine with default [`RankingWeights`].
    #[must_use]
    pub fn new(corpus: CorpusStore, normalizer: Normalizer) -> Self {
        Self {
            corpus,
            normalizer,
            weights: RankingWeights::default(),
        }
    }

    /// Override the ranking weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Normalize both corpora, fit the vector spaces and compute base scores.
    ///
    /// # Errors
    /// Returns [`FitError::InvalidWeights`] for out-of-range weights and
    /// [`FitError::EmptyCorpus`] when either corpus is empty after
    /// normalization.
    pub fn fit(self) -> Result<FittedEngine, FitError> {
        let weights = self.weights.validate()?;
        let catalog = self.normalizer.normalize_all(&self.corpus.catalog_texts());
        let reference = self.normalizer.normalize_all(self.corpus.reference());
        debug!(
            "normalized {} catalogue and {} reference texts",
            catalog.len(),
            reference.len()
        );

        let similarities = fit_similarities(&catalog, &reference)?;
        let base = base_scores(&similarities.reference, &self.corpus.popularity(), weights);
        info!(
            "fitted ranking engine over {} places (top_k = {})",
            self.corpus.len(),
            weights.top_k
        );

        Ok(FittedEngine {
            corpus: self.corpus,
            weights,
            similarities,
            base,
        })
    }
}

/// An immutable snapshot answering ranking queries.
#[derive(Debug, Clone)]
pub struct FittedEngine {
    corpus: CorpusStore,
    weights: RankingWeights,
    similarities: Similarities,
    base: ScoreVector,
}

impl FittedEngine {
    /// Every place ordered by base relevance, best first.
    #[must_use]
    pub fn rank(&self) -> Vec<PlaceRecord> {
        self.records_in_order(&self.base)
    }

    /// Every place ordered by relevance biased towards `history`.
    ///
    /// `history` lists viewed place identifiers oldest first. An empty
    /// history yields exactly [`rank`](Self::rank).
    ///
    /// # Errors
    /// Returns [`RankError::UnknownPlace`] for the first identifier that is
    /// not in the catalogue.
    pub fn rank_with_history(&self, history: &[PlaceId]) -> Result<Vec<PlaceRecord>, RankError> {
        let scores = self.history_scores(history)?;
        Ok(self.records_in_order(&scores))
    }

    /// Scores biased towards `history`, aligned with the catalogue.
    ///
    /// # Errors
    /// Returns [`RankError::UnknownPlace`] for the first identifier that is
    /// not in the catalogue.
    pub fn history_scores(&self, history: &[PlaceId]) -> Result<ScoreVector, RankError> {
        let positions = self.resolve(history)?;
        Ok(history_scores(
            &self.base,
            &self.similarities.catalog,
            &positions,
            self.weights.history,
        ))
    }

    /// Public record of the place with `id`.
    ///
    /// # Errors
    /// Returns [`RankError::NotFound`] when no such place exists.
    pub fn get_by_id(&self, id: PlaceId) -> Result<PlaceRecord, RankError> {
        self.corpus
            .get(id)
            .map(placerank_core::Place::record)
            .ok_or(RankError::NotFound { id })
    }

    /// Base relevance scores, aligned with the catalogue.
    #[must_use]
    pub const fn base_scores(&self) -> &ScoreVector {
        &self.base
    }

    /// Similarity matrices computed during the fit.
    #[must_use]
    pub const fn similarities(&self) -> &Similarities {
        &self.similarities
    }

    /// Weights the engine was fitted with.
    #[must_use]
    pub const fn weights(&self) -> RankingWeights {
        self.weights
    }

    /// The corpus the engine was fitted on.
    #[must_use]
    pub const fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    fn resolve(&self, history: &[PlaceId]) -> Result<Vec<usize>, RankError> {
        history
            .iter()
            .map(|&id| {
                self.corpus
                    .index()
                    .position(id)
                    .ok_or(RankError::UnknownPlace { id })
            })
            .collect()
    }

    fn records_in_order(&self, scores: &ScoreVector) -> Vec<PlaceRecord> {
        scores
            .ranking()
            .into_iter()
            .filter_map(|position| self.corpus.place_at(position))
            .map(placerank_core::Place::record)
            .collect()
    }
}

/// Thread-safe handle serving queries from the current fitted snapshot.
///
/// Readers clone an [`Arc`] to the snapshot and release the lock before
/// scoring, so a refit never blocks on in-flight queries and never exposes
/// a partially built engine.
#[derive(Debug, Default)]
pub struct Ranker {
    engine: RwLock<Option<Arc<FittedEngine>>>,
}

impl Ranker {
    /// A ranker with no fitted engine; every query fails with
    /// [`RankError::NotFitted`] until one is installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A ranker serving `engine`.
    #[must_use]
    pub fn with_engine(engine: FittedEngine) -> Self {
        Self {
            engine: RwLock::new(Some(Arc::new(engine))),
        }
    }

    /// Replace the served snapshot.
    pub fn install(&self, engine: FittedEngine) {
        let snapshot = Arc::new(engine);
        let mut slot = self.engine.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(snapshot);
        info!("installed fitted ranking snapshot");
    }

    /// Fit `engine` and install the result.
    ///
    /// The previous snapshot keeps serving when fitting fails.
    ///
    /// # Errors
    /// Propagates the [`FitError`] from [`UnfittedEngine::fit`].
    pub fn fit(&self, engine: UnfittedEngine) -> Result<(), FitError> {
        let fitted = engine.fit()?;
        self.install(fitted);
        Ok(())
    }

    /// Whether a fitted snapshot is installed.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.engine
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The current snapshot.
    ///
    /// # Errors
    /// Returns [`RankError::NotFitted`] before the first fit.
    pub fn snapshot(&self) -> Result<Arc<FittedEngine>, RankError> {
        self.engine
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(RankError::NotFitted)
    }

    /// Every place ordered by base relevance.
    ///
    /// # Errors
    /// Returns [`RankError::NotFitted`] before the first fit.
    pub fn default_ranking(&self) -> Result<Vec<PlaceRecord>, RankError> {
        Ok(self.snapshot()?.rank())
    }

    /// Every place ordered by relevance biased towards `history`.
    ///
    /// # Errors
    /// Returns [`RankError::NotFitted`] before the first fit and
    /// [`RankError::UnknownPlace`] for identifiers outside the catalogue.
    pub fn ranking_with_history(&self, history: &[PlaceId]) -> Result<Vec<PlaceRecord>, RankError> {
        self.snapshot()?.rank_with_history(history)
    }

    /// Public record of the place with `id`.
    ///
    /// # Errors
    /// Returns [`RankError::NotFitted`] before the first fit and
    /// [`RankError::NotFound`] when no such place exists.
    pub fn get_place(&self, id: PlaceId) -> Result<PlaceRecord, RankError> {
        self.snapshot()?.get_by_id(id)
    }
}
