//! Cosine similarity matrices over fitted TF-IDF spaces.

#![forbid(unsafe_code)]

use log::debug;

use crate::error::{CorpusKind, FitError};
use crate::tfidf::{SparseVector, TfIdfSpace};

/// Dense row-major matrix of cosine similarities.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Pairwise cosine similarity of every `left` vector against every
    /// `right` vector. Inputs must be L2-normalized.
    #[must_use]
    pub fn cosine(left: &[SparseVector], right: &[SparseVector]) -> Self {
        let values = left
            .iter()
            .flat_map(|row| right.iter().map(move |col| row.dot(col)))
            .collect();
        Self {
            rows: left.len(),
            cols: right.len(),
            values,
        }
    }

    /// Build a matrix from explicit rows. Returns `None` when the rows are
    /// ragged.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Row `index`, if in range.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index.checked_mul(self.cols)?;
        self.values.get(start..start.checked_add(self.cols)?)
    }

    /// Entry at (`row`, `col`), if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.cols {
            return None;
        }
        self.row(row).and_then(|values| values.get(col).copied())
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).filter_map(|index| self.row(index))
    }
}

/// The two similarity matrices derived from one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Similarities {
    /// Catalogue × reference relevance similarities.
    pub reference: SimilarityMatrix,
    /// Catalogue × catalogue topical similarities.
    pub catalog: SimilarityMatrix,
}

/// Fit both vector spaces and compute their similarity matrices.
///
/// The relevance space is fitted on the reference texts only, then both
/// corpora are projected into it. The self-similarity space is fitted on
/// the catalogue independently.
///
/// # Errors
/// Returns [`FitError::EmptyCorpus`] when either corpus has no documents or
/// no terms.
pub fn fit_similarities<S: AsRef<str>>(
    catalog: &[S],
    reference: &[S],
) -> Result<Similarities, FitError> {
    if catalog.is_empty() {
        return Err(FitError::EmptyCorpus {
            corpus: CorpusKind::Catalog,
        });
    }

    let relevance_space = TfIdfSpace::fit(reference, CorpusKind::Reference)?;
    let reference_vectors = relevance_space.transform_all(reference);
    let catalog_in_reference = relevance_space.transform_all(catalog);
    debug!(
        "reference space: {} terms over {} texts",
        relevance_space.vocabulary_len(),
        reference.len()
    );

    let catalog_space = TfIdfSpace::fit(catalog, CorpusKind::Catalog)?;
    let catalog_vectors = catalog_space.transform_all(catalog);
    debug!(
        "catalogue space: {} terms over {} texts",
        catalog_space.vocabulary_len(),
        catalog.len()
    );

    Ok(Similarities {
        reference: SimilarityMatrix::cosine(&catalog_in_reference, &reference_vectors),
        catalog: SimilarityMatrix::cosine(&catalog_vectors, &catalog_vectors),
    })
}
