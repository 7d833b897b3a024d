//! In-memory corpus of catalogue places and reference texts.
//!
//! A [`CorpusStore`] is built once at startup and treated as read-only
//! afterwards. Catalogue order is significant: every numeric artefact the
//! ranking engine derives later is aligned with [`CorpusStore::places`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::{debug, info};
use thiserror::Error;

use crate::{
    CatalogSource, DEFAULT_IMAGE_LINK, ImageSource, Place, PlaceId, ReferenceSource, SourceError,
};

/// Errors raised while assembling a [`CorpusStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    /// Two catalogue rows share an identifier.
    #[error("place {id} appears more than once in the catalogue")]
    DuplicatePlace {
        /// The repeated identifier.
        id: PlaceId,
    },
    /// A collaborator failed while loading.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Bijective mapping from [`PlaceId`] to catalogue position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex {
    positions: HashMap<PlaceId, usize>,
}

impl IdIndex {
    fn build(places: &[Place]) -> Result<Self, CorpusError> {
        let mut positions = HashMap::with_capacity(places.len());
        for (position, place) in places.iter().enumerate() {
            match positions.entry(place.id) {
                Entry::Occupied(_) => return Err(CorpusError::DuplicatePlace { id: place.id }),
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }
        Ok(Self { positions })
    }

    /// Catalogue position of `id`, if the place exists.
    pub fn position(&self, id: PlaceId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Number of indexed places.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Catalogue places, reference texts and the id index over the catalogue.
///
/// # Examples
/// ```
/// use placerank_core::{CorpusStore, DEFAULT_IMAGE_LINK, Place};
///
/// # fn main() -> Result<(), placerank_core::CorpusError> {
/// let places = vec![
///     Place::new(10, "Cathedral", "old stone", DEFAULT_IMAGE_LINK, None),
///     Place::new(20, "Museum", "modern art", DEFAULT_IMAGE_LINK, Some(4.0)),
/// ];
/// let store = CorpusStore::new(places, vec!["ancient cathedral".into()])?;
///
/// assert_eq!(store.index().position(20), Some(1));
/// assert_eq!(store.get(10).map(|p| p.title.as_str()), Some("Cathedral"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStore {
    places: Vec<Place>,
    reference: Vec<String>,
    index: IdIndex,
}

impl CorpusStore {
    /// Build a store, rejecting catalogues with repeated identifiers.
    pub fn new(places: Vec<Place>, reference: Vec<String>) -> Result<Self, CorpusError> {
        let index = IdIndex::build(&places)?;
        Ok(Self {
            places,
            reference,
            index,
        })
    }

    /// Load and join the collaborator feeds into a store.
    ///
    /// Images and ratings are attached by place id. Places without an image
    /// receive [`DEFAULT_IMAGE_LINK`]; places without ratings keep the
    /// default rating.
    pub fn load(
        catalog: &dyn CatalogSource,
        images: &dyn ImageSource,
        reference: &dyn ReferenceSource,
    ) -> Result<Self, CorpusError> {
        let rows = catalog.places()?;
        let ratings = catalog.ratings()?;
        let mut image_links = images.images()?;
        let reference_texts = reference.reference_texts()?;
        debug!(
            "loaded {} catalogue rows, {} ratings, {} images",
            rows.len(),
            ratings.len(),
            image_links.len()
        );

        let places = rows
            .into_iter()
            .map(|row| {
                let image = image_links
                    .remove(&row.id)
                    .unwrap_or_else(|| DEFAULT_IMAGE_LINK.to_owned());
                let rating = ratings.get(&row.id).copied();
                Place::from_row(row, image, rating)
            })
            .collect();

        let store = Self::new(places, reference_texts)?;
        info!(
            "corpus ready: {} places, {} reference texts",
            store.len(),
            store.reference().len()
        );
        Ok(store)
    }

    /// Catalogue places in load order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Reference texts in load order.
    pub fn reference(&self) -> &[String] {
        &self.reference
    }

    /// Identifier index over the catalogue.
    pub fn index(&self) -> &IdIndex {
        &self.index
    }

    /// Look a place up by identifier.
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.index
            .position(id)
            .and_then(|position| self.places.get(position))
    }

    /// Place at a catalogue position.
    pub fn place_at(&self, position: usize) -> Option<&Place> {
        self.places.get(position)
    }

    /// Raw text of each catalogue place, aligned with [`Self::places`].
    pub fn catalog_texts(&self) -> Vec<String> {
        self.places.iter().map(Place::text).collect()
    }

    /// Popularity prior of each catalogue place, aligned with [`Self::places`].
    pub fn popularity(&self) -> Vec<f64> {
        self.places.iter().map(|place| place.popularity).collect()
    }

    /// Number of catalogue places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::PlaceRow;
    use crate::test_support::{MemoryCatalog, MemoryImages, MemoryReference};

    #[fixture]
    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            PlaceRow::new(1, "Cathedral", "old stone"),
            PlaceRow::new(2, "Museum", "modern art"),
        ])
        .with_rating(2, 4.5)
    }

    #[rstest]
    fn rejects_duplicate_ids() {
        let places = vec![
            Place::new(5, "a", "b", DEFAULT_IMAGE_LINK, None),
            Place::new(5, "c", "d", DEFAULT_IMAGE_LINK, None),
        ];
        let err = CorpusStore::new(places, Vec::new()).expect_err("duplicate ids must fail");
        assert_eq!(err, CorpusError::DuplicatePlace { id: 5 });
    }

    #[rstest]
    fn load_joins_images_and_ratings(catalog: MemoryCatalog) {
        let images = MemoryImages::new(HashMap::from([(1, "https://img/1.png".to_owned())]));
        let reference = MemoryReference::new(vec!["ancient cathedral".into()]);

        let store = CorpusStore::load(&catalog, &images, &reference).expect("load corpus");

        let first = store.get(1).expect("place 1");
        assert_eq!(first.image_link, "https://img/1.png");
        assert_eq!(first.popularity, crate::DEFAULT_RATING);
        let second = store.get(2).expect("place 2");
        assert_eq!(second.image_link, DEFAULT_IMAGE_LINK);
        assert_eq!(second.popularity, 4.5);
        assert_eq!(store.reference(), ["ancient cathedral"]);
    }

    #[rstest]
    fn load_propagates_source_failures(catalog: MemoryCatalog) {
        let failure = SourceError::Unavailable {
            collaborator: "image listing",
            message: "connection refused".into(),
        };
        let images = MemoryImages::failing(failure.clone());
        let reference = MemoryReference::new(Vec::new());

        let err = CorpusStore::load(&catalog, &images, &reference).expect_err("load must fail");

        assert_eq!(err, CorpusError::Source(failure));
    }

    #[rstest]
    fn texts_and_popularity_follow_catalogue_order(catalog: MemoryCatalog) {
        let store = CorpusStore::load(
            &catalog,
            &MemoryImages::default(),
            &MemoryReference::default(),
        )
        .expect("load corpus");

        assert_eq!(
            store.catalog_texts(),
            ["Cathedral old stone", "Museum modern art"]
        );
        assert_eq!(store.popularity(), [crate::DEFAULT_RATING, 4.5]);
        assert_eq!(store.index().position(2), Some(1));
        assert_eq!(store.index().position(3), None);
    }
}
