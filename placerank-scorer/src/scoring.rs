//! Base relevance scores and the history re-ranking bias.
//!
//! Both passes are pure functions over similarity matrices. The history
//! pass always works on a copy of the base vector.

#![forbid(unsafe_code)]

use crate::similarity::SimilarityMatrix;
use crate::types::{MAX_RATING, MIN_RATING, RankingWeights, ScoreVector};

/// Exponent of the recency decay `(1 / r)^RECENCY_EXPONENT`.
pub const RECENCY_EXPONENT: f64 = 0.15;

/// Mean of the `top_k` largest values in `row`.
///
/// Uses every value when the row is shorter than `top_k`. An empty row
/// scores zero.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging similarities requires float division"
)]
#[must_use]
pub fn top_k_mean(row: &[f64], top_k: usize) -> f64 {
    let mut sorted = row.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let taken = sorted.len().min(top_k);
    if taken == 0 {
        return 0.0;
    }
    let sum: f64 = sorted.iter().take(taken).sum();
    sum / taken as f64
}

/// Popularity prior `weight * ln(rating)` with the rating clamped to the
/// 1–5 scale.
#[expect(
    clippy::float_arithmetic,
    reason = "the prior scales a log-rating by its weight"
)]
#[must_use]
pub fn popularity_term(rating: f64, weight: f64) -> f64 {
    weight * rating.clamp(MIN_RATING, MAX_RATING).ln()
}

/// Recency coefficient for 1-based position `rank` in the most-recent-first
/// history.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the decay is a fractional power of the rank"
)]
#[must_use]
pub fn recency_decay(rank: usize) -> f64 {
    let rank = rank.max(1) as f64;
    (1.0 / rank).powf(RECENCY_EXPONENT)
}

/// Base relevance score per catalogue row.
///
/// `popularity` is indexed by catalogue position; missing entries are read
/// as the lowest rating so the term vanishes.
#[expect(
    clippy::float_arithmetic,
    reason = "the base score sums relevance and the popularity prior"
)]
#[must_use]
pub fn base_scores(
    sim_ref: &SimilarityMatrix,
    popularity: &[f64],
    weights: RankingWeights,
) -> ScoreVector {
    let scores = sim_ref
        .iter_rows()
        .enumerate()
        .map(|(position, row)| {
            let rating = popularity.get(position).copied().unwrap_or(MIN_RATING);
            top_k_mean(row, weights.top_k) + popularity_term(rating, weights.popularity)
        })
        .collect();
    ScoreVector::new(scores)
}

/// Bias `base` towards places similar to the viewed `history`.
///
/// `history` holds catalogue positions in viewing order (oldest first). It
/// is walked most-recent-first; the item at 1-based position `r` of that
/// walk adds `recency_decay(r) * weight * sim_self[item]` to every other
/// place. A viewed place never boosts itself. Positions outside the matrix
/// are skipped, so callers resolve identifiers first.
#[expect(
    clippy::float_arithmetic,
    reason = "the bias accumulates decayed similarity contributions"
)]
#[must_use]
pub(crate) fn history_scores(
    base: &ScoreVector,
    sim_self: &SimilarityMatrix,
    history: &[usize],
    weight: f64,
) -> ScoreVector {
    let mut scores = base.clone();
    for (offset, &item) in history.iter().rev().enumerate() {
        let Some(row) = sim_self.row(item) else {
            continue;
        };
        let coefficient = recency_decay(offset.saturating_add(1)) * weight;
        for (position, (score, &similarity)) in
            scores.as_mut_slice().iter_mut().zip(row).enumerate()
        {
            if position != item {
                *score += coefficient * similarity;
            }
        }
    }
    scores
}
