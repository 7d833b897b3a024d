//! Shared fixtures for data-source behaviour tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::Connection;
use tempfile::TempDir;

/// Temporary directory holding a catalogue database and a reference file.
#[derive(Debug)]
pub struct CorpusFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CorpusFiles {
    /// Create an empty workspace; no files exist until written.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    /// Path of the catalogue database.
    pub fn catalog_db(&self) -> Utf8PathBuf {
        self.root.join("places.db")
    }

    /// Path of the reference file.
    pub fn reference(&self) -> Utf8PathBuf {
        self.root.join("etalon.json")
    }

    /// Write a catalogue database from SQL statements run after the schema.
    pub fn write_catalog(&self, seed: &str) {
        write_catalog(&self.catalog_db(), seed);
    }

    /// Write a reference file with the given JSON.
    pub fn write_reference(&self, json: &str) {
        fs::write(self.reference(), json).expect("write reference file");
    }
}

fn write_catalog(path: &Utf8Path, seed: &str) {
    let connection = Connection::open(path.as_std_path()).expect("create catalogue");
    connection
        .execute_batch(
            "CREATE TABLE places (id INTEGER PRIMARY KEY, title TEXT, description TEXT);
             CREATE TABLE ratings (rateable_id INTEGER NOT NULL, value REAL NOT NULL);",
        )
        .expect("create schema");
    connection.execute_batch(seed).expect("seed catalogue");
}
