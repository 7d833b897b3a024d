//! Public configuration and output types for relevance scoring.
#![forbid(unsafe_code)]

use crate::error::FitError;

/// Number of best reference matches averaged into the relevance score.
pub const DEFAULT_TOP_K: usize = 5;

/// Multiplier applied to the self-similarity bias of viewed places.
pub const DEFAULT_HISTORY_WEIGHT: f64 = 0.4;

/// Multiplier applied to the log-rating popularity prior.
pub const DEFAULT_POPULARITY_WEIGHT: f64 = 1e-20;

/// Lowest rating on the rating scale.
pub const MIN_RATING: f64 = 1.0;

/// Highest rating on the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Bound on the popularity term's magnitude.
///
/// Relevance scores closer than this are considered tied, so keeping the
/// popularity term below it restricts popularity to tie-breaking.
pub const RELEVANCE_RESOLUTION: f64 = 1e-6;

/// Tunable parameters of the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    /// How many of the best reference similarities are averaged.
    pub top_k: usize,
    /// Multiplier for `ln(rating)`.
    pub popularity: f64,
    /// Multiplier for the history bias.
    pub history: f64,
}

impl RankingWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`FitError::InvalidWeights`] when `top_k` is zero, a weight is
    /// negative or not finite, or the popularity weight could move a score
    /// by [`RELEVANCE_RESOLUTION`] or more.
    pub fn validate(self) -> Result<Self, FitError> {
        if self.top_k == 0 {
            return Err(FitError::InvalidWeights {
                reason: "top_k must be at least 1",
            });
        }
        if !self.history.is_finite() || self.history < 0.0 {
            return Err(FitError::InvalidWeights {
                reason: "history weight must be finite and non-negative",
            });
        }
        if !self.popularity.is_finite() || self.popularity < 0.0 {
            return Err(FitError::InvalidWeights {
                reason: "popularity weight must be finite and non-negative",
            });
        }
        if self.max_popularity_term() >= RELEVANCE_RESOLUTION {
            return Err(FitError::InvalidWeights {
                reason: "popularity weight is large enough to override relevance",
            });
        }
        Ok(self)
    }

    /// Largest magnitude the popularity term can reach on the rating scale.
    #[expect(
        clippy::float_arithmetic,
        reason = "the bound is the weight times the largest log-rating"
    )]
    #[must_use]
    pub fn max_popularity_term(self) -> f64 {
        self.popularity * MAX_RATING.ln()
    }

    /// Replace `top_k`.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Replace the history weight.
    #[must_use]
    pub const fn with_history(mut self, history: f64) -> Self {
        self.history = history;
        self
    }

    /// Replace the popularity weight.
    #[must_use]
    pub const fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            popularity: DEFAULT_POPULARITY_WEIGHT,
            history: DEFAULT_HISTORY_WEIGHT,
        }
    }
}

/// One relevance score per catalogue position; higher is better.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreVector {
    scores: Vec<f64>,
}

impl ScoreVector {
    /// Wrap pre-computed scores.
    #[expect(
        clippy::missing_const_for_fn,
        reason = "scores are produced at runtime from similarity matrices"
    )]
    #[must_use]
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Score at a catalogue position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<f64> {
        self.scores.get(position).copied()
    }

    /// Scores in catalogue order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.scores
    }

    /// Number of scored positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no positions are scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Catalogue positions ordered by descending score.
    ///
    /// Equal scores keep catalogue order, so repeated calls return the same
    /// ordering.
    #[must_use]
    pub fn ranking(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..self.scores.len()).collect();
        positions.sort_by(|&a, &b| {
            let left = self.get(a).unwrap_or(f64::NEG_INFINITY);
            let right = self.get(b).unwrap_or(f64::NEG_INFINITY);
            right.total_cmp(&left)
        });
        positions
    }
}
