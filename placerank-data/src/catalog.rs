//! SQLite-backed catalogue of places and visitor ratings.
//!
//! The database holds two tables:
//!
//! ```sql
//! CREATE TABLE places (id INTEGER PRIMARY KEY, title TEXT, description TEXT);
//! CREATE TABLE ratings (rateable_id INTEGER NOT NULL, value REAL NOT NULL);
//! ```
//!
//! Ratings are averaged per place inside the query, so the loader never
//! materialises individual votes.

use std::collections::HashMap;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use placerank_core::{CatalogSource, PlaceId, PlaceRow, SourceError};
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

const COLLABORATOR: &str = "catalogue database";

const SELECT_PLACES: &str = "SELECT id, title, description FROM places ORDER BY rowid";
const SELECT_MEAN_RATINGS: &str =
    "SELECT rateable_id, AVG(value) FROM ratings GROUP BY rateable_id ORDER BY rateable_id";

/// Errors raised while reading the catalogue database.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open catalogue database at {path}: {source}")]
    OpenDatabase {
        /// Location of the database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A query against the catalogue failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// What the loader was doing.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A place id does not fit the identifier range.
    #[error("place id {id} is outside the supported range")]
    IdOutOfRange {
        /// The stored identifier.
        id: i64,
    },
}

impl From<CatalogError> for SourceError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::IdOutOfRange { .. } => Self::Malformed {
                collaborator: COLLABORATOR,
                message: error.to_string(),
            },
            CatalogError::OpenDatabase { .. } | CatalogError::Query { .. } => Self::Unavailable {
                collaborator: COLLABORATOR,
                message: error.to_string(),
            },
        }
    }
}

/// Read-only [`CatalogSource`] over a SQLite database.
pub struct SqliteCatalogSource {
    connection: Connection,
}

impl fmt::Debug for SqliteCatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogSource")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogSource {
    /// Open the catalogue at `path` without write access.
    ///
    /// # Errors
    /// Returns [`CatalogError::OpenDatabase`] when the file cannot be opened
    /// as a SQLite database.
    pub fn open(path: &Utf8Path) -> Result<Self, CatalogError> {
        let connection =
            Connection::open_with_flags(path.as_std_path(), OpenFlags::SQLITE_OPEN_READ_ONLY)
                .map_err(|source| CatalogError::OpenDatabase {
                    path: path.to_path_buf(),
                    source,
                })?;
        Ok(Self { connection })
    }

    /// Wrap an existing connection.
    #[must_use]
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Read every place in table order.
    ///
    /// Missing titles or descriptions read as empty text.
    ///
    /// # Errors
    /// Returns [`CatalogError::Query`] for SQLite failures and
    /// [`CatalogError::IdOutOfRange`] for negative identifiers.
    pub fn read_places(&self) -> Result<Vec<PlaceRow>, CatalogError> {
        let mut statement =
            self.connection
                .prepare(SELECT_PLACES)
                .map_err(|source| CatalogError::Query {
                    operation: "prepare place selection",
                    source,
                })?;
        let rows = statement
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let title: Option<String> = row.get(1)?;
                let description: Option<String> = row.get(2)?;
                Ok((id, title, description))
            })
            .map_err(|source| CatalogError::Query {
                operation: "query places",
                source,
            })?;

        let mut places = Vec::new();
        for row in rows {
            let (raw_id, title, description) = row.map_err(|source| CatalogError::Query {
                operation: "read place row",
                source,
            })?;
            let id = PlaceId::try_from(raw_id)
                .map_err(|_| CatalogError::IdOutOfRange { id: raw_id })?;
            if description.is_none() {
                debug!("place {id} has no description");
            }
            places.push(PlaceRow::new(
                id,
                title.unwrap_or_default(),
                description.unwrap_or_default(),
            ));
        }
        Ok(places)
    }

    /// Read the mean rating of every rated place.
    ///
    /// Ratings attached to negative identifiers cannot match a place and
    /// are skipped.
    ///
    /// # Errors
    /// Returns [`CatalogError::Query`] for SQLite failures.
    pub fn read_mean_ratings(&self) -> Result<HashMap<PlaceId, f64>, CatalogError> {
        let mut statement =
            self.connection
                .prepare(SELECT_MEAN_RATINGS)
                .map_err(|source| CatalogError::Query {
                    operation: "prepare rating aggregation",
                    source,
                })?;
        let rows = statement
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let mean: Option<f64> = row.get(1)?;
                Ok((id, mean))
            })
            .map_err(|source| CatalogError::Query {
                operation: "aggregate ratings",
                source,
            })?;

        let mut ratings = HashMap::new();
        for row in rows {
            let (raw_id, mean) = row.map_err(|source| CatalogError::Query {
                operation: "read rating row",
                source,
            })?;
            let Ok(id) = PlaceId::try_from(raw_id) else {
                warn!("skipping ratings for out-of-range place id {raw_id}");
                continue;
            };
            if let Some(mean) = mean {
                ratings.insert(id, mean);
            }
        }
        Ok(ratings)
    }
}

impl CatalogSource for SqliteCatalogSource {
    fn places(&self) -> Result<Vec<PlaceRow>, SourceError> {
        Ok(self.read_places()?)
    }

    fn ratings(&self) -> Result<HashMap<PlaceId, f64>, SourceError> {
        Ok(self.read_mean_ratings()?)
    }
}
