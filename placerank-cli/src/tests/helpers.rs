//! Test helpers that write a small catalogue and reference set to disk.

use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::Connection;
use tempfile::TempDir;

const REFERENCE_JSON: &str = r#"{"places": [
    {"title": "Ancient", "description": "ancient cathedral"},
    {"title": "Stone", "description": "stone cathedral"}
]}"#;

/// A catalogue database and reference file inside a temporary directory.
pub(super) struct CatalogueFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CatalogueFiles {
    /// Write the four-place sample catalogue and its reference file.
    pub(super) fn sample() -> Self {
        let files = Self::empty();
        let connection =
            Connection::open(files.catalog_db().as_std_path()).expect("create catalogue");
        connection
            .execute_batch(
                "CREATE TABLE places (id INTEGER PRIMARY KEY, title TEXT, description TEXT);
                 CREATE TABLE ratings (rateable_id INTEGER NOT NULL, value REAL NOT NULL);
                 INSERT INTO places VALUES (1, 'Cathedral', 'old stone cathedral');
                 INSERT INTO places VALUES (2, 'Museum', 'modern art museum');
                 INSERT INTO places VALUES (3, 'Bridge', 'stone bridge over the river');
                 INSERT INTO places VALUES (4, 'Gallery', 'modern art gallery');",
            )
            .expect("seed catalogue");
        std::fs::write(files.reference(), REFERENCE_JSON).expect("write reference");
        files
    }

    /// A directory with no files in it.
    pub(super) fn empty() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn catalog_db(&self) -> Utf8PathBuf {
        self.root.join("places.db")
    }

    pub(super) fn reference(&self) -> Utf8PathBuf {
        self.root.join("etalon.json")
    }

    /// Command-line arguments pointing a subcommand at these files.
    pub(super) fn source_args(&self) -> Vec<String> {
        vec![
            "--catalog-db".to_owned(),
            self.catalog_db().into_string(),
            "--reference".to_owned(),
            self.reference().into_string(),
            "--language".to_owned(),
            "english".to_owned(),
        ]
    }
}
