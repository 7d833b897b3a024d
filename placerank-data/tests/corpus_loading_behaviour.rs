//! Behavioural coverage for loading the corpus from its on-disk sources.

mod support;

use std::cell::RefCell;

use placerank_core::{CorpusStore, DEFAULT_IMAGE_LINK};
use placerank_data::{CatalogError, LoadConfig, LoadError, ReferenceError, load_corpus};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::CorpusFiles;

/// World state for corpus loading scenarios.
#[derive(Debug)]
struct LoadingWorld {
    files: CorpusFiles,
    result: RefCell<Option<Result<CorpusStore, LoadError>>>,
}

#[fixture]
fn world() -> LoadingWorld {
    LoadingWorld {
        files: CorpusFiles::new(),
        result: RefCell::new(None),
    }
}

fn loaded_store(world: &LoadingWorld) -> CorpusStore {
    match world.result.borrow().as_ref() {
        Some(Ok(store)) => store.clone(),
        Some(Err(err)) => panic!("corpus should load, got {err}"),
        None => panic!("corpus must be loaded first"),
    }
}

#[given("a catalogue database with two rated places")]
fn catalogue_database(world: &LoadingWorld) {
    world.files.write_catalog(
        "INSERT INTO places VALUES (1, 'Cathedral', 'Old stone cathedral');
         INSERT INTO places VALUES (2, 'Museum', 'Modern art museum');
         INSERT INTO ratings VALUES (2, 4.0);
         INSERT INTO ratings VALUES (2, 5.0);",
    );
}

#[given("a reference file with one description")]
fn reference_file(world: &LoadingWorld) {
    world
        .files
        .write_reference(r#"{"places": [{"title": "Cathedral", "description": "ancient stone"}]}"#);
}

#[when("I load the corpus without an image listing")]
fn load_without_images(world: &LoadingWorld) {
    let config = LoadConfig {
        catalog_db: world.files.catalog_db(),
        reference: world.files.reference(),
        images: None,
    };
    world.result.replace(Some(load_corpus(&config)));
}

#[then("both places show the placeholder image")]
fn placeholders(world: &LoadingWorld) {
    let store = loaded_store(world);
    assert_eq!(store.len(), 2);
    assert!(
        store
            .places()
            .iter()
            .all(|place| place.image_link == DEFAULT_IMAGE_LINK)
    );
    assert_eq!(store.reference(), ["Cathedral ancient stone"]);
}

#[then("the museum's popularity is the mean of its ratings")]
fn mean_popularity(world: &LoadingWorld) {
    let store = loaded_store(world);
    let museum = store.get(2).expect("museum is loaded");
    assert_eq!(museum.popularity, 4.5);
}

#[then("loading fails because the reference file is missing")]
fn reference_missing(world: &LoadingWorld) {
    let binding = world.result.borrow();
    match binding.as_ref() {
        Some(Err(LoadError::Reference(ReferenceError::Open { path, .. }))) => {
            assert_eq!(path, &world.files.reference());
        }
        other => panic!("expected a reference open error, got {other:?}"),
    }
}

#[then("loading fails because the catalogue cannot be opened")]
fn catalogue_missing(world: &LoadingWorld) {
    let binding = world.result.borrow();
    match binding.as_ref() {
        Some(Err(LoadError::Catalog(CatalogError::OpenDatabase { path, .. }))) => {
            assert_eq!(path, &world.files.catalog_db());
        }
        other => panic!("expected a catalogue open error, got {other:?}"),
    }
}

#[scenario(path = "tests/features/corpus_loading.feature", index = 0)]
fn loads_with_placeholders(world: LoadingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/corpus_loading.feature", index = 1)]
fn missing_reference_fails(world: LoadingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/corpus_loading.feature", index = 2)]
fn missing_catalogue_fails(world: LoadingWorld) {
    let _ = world;
}
