//! Collaborator traits consumed while building a [`CorpusStore`](crate::CorpusStore).

use std::collections::HashMap;

use crate::{PlaceId, PlaceRow};

use super::error::SourceError;

/// Supplies the catalogue of candidate places and their ratings.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use placerank_core::{CatalogSource, PlaceId, PlaceRow, SourceError};
///
/// struct OnePlace;
///
/// impl CatalogSource for OnePlace {
///     fn places(&self) -> Result<Vec<PlaceRow>, SourceError> {
///         Ok(vec![PlaceRow::new(1, "Lighthouse", "Red and white tower")])
///     }
///
///     fn ratings(&self) -> Result<HashMap<PlaceId, f64>, SourceError> {
///         Ok(HashMap::from([(1, 4.0)]))
///     }
/// }
///
/// assert_eq!(OnePlace.places()?.len(), 1);
/// # Ok::<(), SourceError>(())
/// ```
pub trait CatalogSource {
    /// Return every place in catalogue order.
    fn places(&self) -> Result<Vec<PlaceRow>, SourceError>;

    /// Return the mean rating per place. Unrated places are simply absent.
    fn ratings(&self) -> Result<HashMap<PlaceId, f64>, SourceError>;
}

/// Supplies an image URL per place.
///
/// Places missing from the returned map are shown with
/// [`DEFAULT_IMAGE_LINK`](crate::DEFAULT_IMAGE_LINK).
pub trait ImageSource {
    /// Return the known image links keyed by place id.
    fn images(&self) -> Result<HashMap<PlaceId, String>, SourceError>;
}

/// Supplies the reference ("etalon") descriptions of ideal places.
pub trait ReferenceSource {
    /// Return the reference texts, each already joined as
    /// `title + " " + description`.
    fn reference_texts(&self) -> Result<Vec<String>, SourceError>;
}
