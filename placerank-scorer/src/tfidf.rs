//! TF-IDF vector spaces over normalized texts.
//!
//! Terms are whitespace-delimited unigrams. Weights are raw term counts
//! multiplied by the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized so cosine
//! similarity reduces to a dot product.

#![forbid(unsafe_code)]

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{CorpusKind, FitError};

/// L2-normalized sparse vector with entries sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Whether no vocabulary term occurred in the document.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-zero `(term index, weight)` pairs in ascending index order.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product with another vector of the same space.
    #[expect(
        clippy::float_arithmetic,
        reason = "dot products accumulate weighted term overlaps"
    )]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let mut left = self.entries.iter().peekable();
        let mut right = other.entries.iter().peekable();
        let mut total = 0.0_f64;
        while let (Some(&&(li, lw)), Some(&&(ri, rw))) = (left.peek(), right.peek()) {
            match li.cmp(&ri) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    total += lw * rw;
                    left.next();
                    right.next();
                }
            }
        }
        total
    }
}

/// A fitted vocabulary with per-term inverse document frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfSpace {
    /// Fit a space on `documents`.
    ///
    /// Vocabulary indices follow sorted term order, so two fits over the
    /// same documents produce identical spaces.
    ///
    /// # Errors
    /// Returns [`FitError::EmptyCorpus`] tagged with `corpus` when there are
    /// no documents or no document contains a term.
    pub fn fit<S: AsRef<str>>(documents: &[S], corpus: CorpusKind) -> Result<Self, FitError> {
        if documents.is_empty() {
            return Err(FitError::EmptyCorpus { corpus });
        }

        let mut document_frequency: HashMap<&str, u32> = HashMap::new();
        for document in documents {
            let unique: HashSet<&str> = document.as_ref().split_whitespace().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return Err(FitError::EmptyCorpus { corpus });
        }

        let terms: BTreeSet<&str> = document_frequency.keys().copied().collect();
        let document_count = documents.len();
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = document_frequency.get(term).copied().unwrap_or(0);
            vocabulary.insert(term.to_owned(), index);
            idf.push(smoothed_idf(document_count, df));
        }

        Ok(Self { vocabulary, idf })
    }

    /// Project a normalized document into this space.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms maps to the zero vector.
    #[expect(
        clippy::float_arithmetic,
        reason = "tf-idf weighting multiplies counts by idf and divides by the norm"
    )]
    #[must_use]
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in document.split_whitespace() {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .filter_map(|(index, count)| {
                self.idf
                    .get(index)
                    .map(|idf| (index, f64::from(count) * idf))
            })
            .collect();
        entries.sort_unstable_by_key(|&(index, _)| index);

        let norm = entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for entry in &mut entries {
                entry.1 /= norm;
            }
        }

        SparseVector { entries }
    }

    /// Project every document, preserving order.
    #[must_use]
    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|document| self.transform(document.as_ref()))
            .collect()
    }

    /// Number of distinct terms in the vocabulary.
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Inverse document frequency of `term`, if it is in the vocabulary.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary
            .get(term)
            .and_then(|&index| self.idf.get(index).copied())
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "idf is a logarithm of document-count ratios"
)]
fn smoothed_idf(document_count: usize, document_frequency: u32) -> f64 {
    let n = document_count as f64;
    let df = f64::from(document_frequency);
    ((1.0 + n) / (1.0 + df)).ln() + 1.0
}
