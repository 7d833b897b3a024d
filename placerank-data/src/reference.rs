//! Reference ("etalon") descriptions read from a JSON file.
//!
//! The file lists the ideal places the catalogue is ranked against:
//!
//! ```json
//! {"places": [{"title": "Kola Bay", "description": "Fjord walk at dusk"}]}
//! ```

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use placerank_core::{ReferenceSource, SourceError};
use placerank_fs::open_utf8_file;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading the reference file.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The file could not be opened.
    #[error("failed to open reference file at {path}: {source}")]
    Open {
        /// Location of the file.
        path: Utf8PathBuf,
        /// Source IO error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid reference document.
    #[error("failed to parse reference file at {path}: {source}")]
    Parse {
        /// Location of the file.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ReferenceDocument {
    places: Vec<ReferenceEntry>,
}

#[derive(Debug, Deserialize)]
struct ReferenceEntry {
    title: String,
    #[serde(default)]
    description: String,
}

impl ReferenceEntry {
    fn into_text(self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// [`ReferenceSource`] holding texts parsed from a reference document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonReferenceSource {
    texts: Vec<String>,
}

impl JsonReferenceSource {
    /// Read and parse the reference file at `path`.
    ///
    /// # Errors
    /// Returns [`ReferenceError::Open`] when the file cannot be opened and
    /// [`ReferenceError::Parse`] when its contents are not a reference
    /// document.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ReferenceError> {
        let file = open_utf8_file(path).map_err(|source| ReferenceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::from_reader(BufReader::new(file)).map_err(|source| {
            ReferenceError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("loaded {} reference texts from {path}", source.texts.len());
        Ok(source)
    }

    /// Parse a reference document from `reader`.
    ///
    /// # Errors
    /// Returns the JSON decoding error when the document is malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let document: ReferenceDocument = serde_json::from_reader(reader)?;
        Ok(Self {
            texts: document
                .places
                .into_iter()
                .map(ReferenceEntry::into_text)
                .collect(),
        })
    }

    /// Parsed texts, each `title + " " + description`.
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }
}

impl ReferenceSource for JsonReferenceSource {
    fn reference_texts(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.texts.clone())
    }
}
