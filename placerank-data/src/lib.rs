//! Data sources feeding the Placerank corpus.
//!
//! Responsibilities:
//! - Read places and mean ratings from a SQLite catalogue.
//! - Fetch image links from a remote place listing.
//! - Parse the reference descriptions from a JSON file.
//! - Join everything into a [`CorpusStore`](placerank_core::CorpusStore)
//!   once at startup.
//!
//! Boundaries:
//! - Do not encode ranking rules (they live in `placerank-scorer`).
//! - Keep blocking I/O off async executors.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod images;
mod load;
pub mod reference;

pub use catalog::{CatalogError, SqliteCatalogSource};
pub use images::{
    DEFAULT_USER_AGENT, HttpImageSource, HttpImageSourceConfig, ImageSourceBuildError,
    PlaceholderImages,
};
pub use load::{LoadConfig, LoadError, load_corpus};
pub use reference::{JsonReferenceSource, ReferenceError};
