//! Response types for the place listing endpoint.
//!
//! The listing returns one entry per place with its gallery:
//!
//! ```json
//! {"data": [{"id": 12, "images": ["https://cdn.example/12.jpg"]}]}
//! ```

use std::collections::HashMap;

use log::warn;
use placerank_core::{DEFAULT_IMAGE_LINK, PlaceId};
use serde::Deserialize;

/// Top-level listing payload.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    /// Listed places.
    #[serde(default)]
    pub data: Vec<ListingEntry>,
}

/// One listed place.
#[derive(Debug, Deserialize)]
pub struct ListingEntry {
    /// Place identifier shared with the catalogue.
    pub id: i64,
    /// Gallery images, best first. `null` reads as empty.
    #[serde(default)]
    pub images: Option<Vec<ListingImage>>,
}

/// A gallery image, given either as a bare URL or as an object with one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListingImage {
    /// Bare URL.
    Link(String),
    /// Object carrying the URL.
    Object {
        /// Image URL.
        url: String,
    },
}

impl ListingImage {
    fn into_link(self) -> String {
        match self {
            Self::Link(url) | Self::Object { url } => url,
        }
    }
}

/// Map each listed place to its first image, or the placeholder when the
/// gallery is empty.
///
/// Entries with negative identifiers cannot match a place and are skipped.
/// When an id repeats, the last entry wins.
pub fn convert_listing(response: ListingResponse) -> HashMap<PlaceId, String> {
    let mut images = HashMap::with_capacity(response.data.len());
    for entry in response.data {
        let Ok(id) = PlaceId::try_from(entry.id) else {
            warn!("skipping listing entry with out-of-range id {}", entry.id);
            continue;
        };
        let link = entry
            .images
            .and_then(|gallery| gallery.into_iter().next())
            .map_or_else(|| DEFAULT_IMAGE_LINK.to_owned(), ListingImage::into_link);
        images.insert(id, link);
    }
    images
}
