//! In-memory collaborators used by unit and behaviour tests.

use std::collections::HashMap;

use crate::{CatalogSource, ImageSource, PlaceId, PlaceRow, ReferenceSource, SourceError};

/// In-memory [`CatalogSource`] returning fixed rows and ratings.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    rows: Vec<PlaceRow>,
    ratings: HashMap<PlaceId, f64>,
}

impl MemoryCatalog {
    /// Create a catalogue with the given rows and no ratings.
    pub fn new(rows: Vec<PlaceRow>) -> Self {
        Self {
            rows,
            ratings: HashMap::new(),
        }
    }

    /// Attach a mean rating to a place.
    #[must_use]
    pub fn with_rating(mut self, id: PlaceId, rating: f64) -> Self {
        self.ratings.insert(id, rating);
        self
    }
}

impl CatalogSource for MemoryCatalog {
    fn places(&self) -> Result<Vec<PlaceRow>, SourceError> {
        Ok(self.rows.clone())
    }

    fn ratings(&self) -> Result<HashMap<PlaceId, f64>, SourceError> {
        Ok(self.ratings.clone())
    }
}

/// In-memory [`ImageSource`] returning a fixed map or a fixed error.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    images: HashMap<PlaceId, String>,
    failure: Option<SourceError>,
}

impl MemoryImages {
    /// Serve the given image links.
    pub fn new(images: HashMap<PlaceId, String>) -> Self {
        Self {
            images,
            failure: None,
        }
    }

    /// Fail every request with `error`.
    pub fn failing(error: SourceError) -> Self {
        Self {
            images: HashMap::new(),
            failure: Some(error),
        }
    }
}

impl ImageSource for MemoryImages {
    fn images(&self) -> Result<HashMap<PlaceId, String>, SourceError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.images.clone()),
        }
    }
}

/// In-memory [`ReferenceSource`].
#[derive(Debug, Clone, Default)]
pub struct MemoryReference {
    texts: Vec<String>,
}

impl MemoryReference {
    /// Serve the given reference texts.
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts }
    }
}

impl ReferenceSource for MemoryReference {
    fn reference_texts(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.texts.clone())
    }
}
