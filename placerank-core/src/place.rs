//! Places and the records exposed to front-ends.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a place in the catalogue.
pub type PlaceId = u64;

/// Rating assumed for places that have never been rated.
///
/// Ratings use a 1–5 scale, so 3 is the neutral midpoint.
pub const DEFAULT_RATING: f64 = 3.0;

/// Placeholder image shown for places without a listing image.
pub const DEFAULT_IMAGE_LINK: &str =
    "https://i.pinimg.com/originals/8a/eb/d8/8aebd875fbddd22bf3971c3a7159bdc7.png";

/// A candidate place as returned by a catalogue source, before images and
/// ratings are joined onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRow {
    /// Unique identifier.
    pub id: PlaceId,
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
}

impl PlaceRow {
    /// Construct a row from its parts.
    pub fn new(id: PlaceId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A tourist point of interest with its ranking metadata.
///
/// `popularity` holds the mean visitor rating, or [`DEFAULT_RATING`] when
/// nobody has rated the place yet. It is internal to ranking and never
/// surfaced through [`PlaceRecord`].
///
/// # Examples
/// ```
/// use placerank_core::{DEFAULT_RATING, Place};
///
/// let place = Place::new(7, "Cathedral", "Old stone cathedral", "https://img/7.png", None);
///
/// assert_eq!(place.text(), "Cathedral Old stone cathedral");
/// assert_eq!(place.popularity, DEFAULT_RATING);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Unique identifier.
    pub id: PlaceId,
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Image URL shown alongside the place.
    pub image_link: String,
    /// Mean rating used as the popularity prior.
    pub popularity: f64,
}

impl Place {
    /// Construct a place, falling back to [`DEFAULT_RATING`] when `rating`
    /// is absent or not a finite number.
    pub fn new(
        id: PlaceId,
        title: impl Into<String>,
        description: impl Into<String>,
        image_link: impl Into<String>,
        rating: Option<f64>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            image_link: image_link.into(),
            popularity: rating
                .filter(|value| value.is_finite())
                .unwrap_or(DEFAULT_RATING),
        }
    }

    /// Join a catalogue row with its image and mean rating.
    pub fn from_row(row: PlaceRow, image_link: impl Into<String>, rating: Option<f64>) -> Self {
        Self::new(row.id, row.title, row.description, image_link, rating)
    }

    /// Title and description joined by a space; the text that gets ranked.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// The public view of this place.
    pub fn record(&self) -> PlaceRecord {
        PlaceRecord::from(self)
    }
}

/// The externally visible fields of a [`Place`].
///
/// Popularity and scores are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceRecord {
    /// Unique identifier.
    pub id: PlaceId,
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Image URL shown alongside the place.
    pub image_link: String,
}

impl From<&Place> for PlaceRecord {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id,
            title: place.title.clone(),
            description: place.description.clone(),
            image_link: place.image_link.clone(),
        }
    }
}
