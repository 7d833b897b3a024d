//! Startup loading of the full corpus from its configured sources.

use camino::Utf8PathBuf;
use log::info;
use placerank_core::{CorpusError, CorpusStore, ImageSource};
use thiserror::Error;

use crate::catalog::{CatalogError, SqliteCatalogSource};
use crate::images::{
    HttpImageSource, HttpImageSourceConfig, ImageSourceBuildError, PlaceholderImages,
};
use crate::reference::{JsonReferenceSource, ReferenceError};

/// Where the corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// SQLite catalogue database.
    pub catalog_db: Utf8PathBuf,
    /// JSON reference file.
    pub reference: Utf8PathBuf,
    /// Image listing; every place shows the placeholder when absent.
    pub images: Option<HttpImageSourceConfig>,
}

/// Errors raised while loading the corpus at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalogue database could not be opened.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The reference file could not be read.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    /// The image listing client could not be built.
    #[error("failed to build image source for {url}: {source}")]
    Images {
        /// Listing URL.
        url: String,
        /// Construction failure.
        #[source]
        source: ImageSourceBuildError,
    },
    /// Joining the feeds into a store failed.
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// Open every configured source and join them into a [`CorpusStore`].
///
/// Loading runs once and is not retried; any failure is returned to the
/// caller.
///
/// # Errors
/// Returns [`LoadError`] describing the first source that failed.
pub fn load_corpus(config: &LoadConfig) -> Result<CorpusStore, LoadError> {
    let catalog = SqliteCatalogSource::open(&config.catalog_db)?;
    let reference = JsonReferenceSource::from_path(&config.reference)?;
    let images: Box<dyn ImageSource> = match &config.images {
        Some(images) => Box::new(HttpImageSource::with_config(images.clone()).map_err(
            |source| LoadError::Images {
                url: images.url.clone(),
                source,
            },
        )?),
        None => {
            info!("no image listing configured; using placeholder images");
            Box::new(PlaceholderImages)
        }
    };
    Ok(CorpusStore::load(&catalog, images.as_ref(), &reference)?)
}
