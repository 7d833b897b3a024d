//! Core domain types for the Placerank engine.
//!
//! The crate defines the places being ranked, the read-only
//! [`CorpusStore`] that holds them alongside the reference texts, and the
//! collaborator traits through which catalogue, image and reference data
//! enter the system.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod corpus;
pub mod place;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use corpus::{CorpusError, CorpusStore, IdIndex};
pub use place::{DEFAULT_IMAGE_LINK, DEFAULT_RATING, Place, PlaceId, PlaceRecord, PlaceRow};
pub use source::{CatalogSource, ImageSource, ReferenceSource, SourceError};
