//! Behavioural coverage for assembling the corpus store from collaborators.

use std::cell::RefCell;
use std::collections::HashMap;

use placerank_core::test_support::{MemoryCatalog, MemoryImages, MemoryReference};
use placerank_core::{CorpusError, CorpusStore, DEFAULT_IMAGE_LINK, DEFAULT_RATING, PlaceRow};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const CATHEDRAL_IMAGE: &str = "https://img.example/cathedral.png";

type LoadResult = RefCell<Option<Result<CorpusStore, CorpusError>>>;

#[fixture]
fn catalog() -> RefCell<MemoryCatalog> {
    RefCell::new(MemoryCatalog::default())
}

#[fixture]
fn images() -> RefCell<MemoryImages> {
    RefCell::new(MemoryImages::default())
}

#[fixture]
fn result() -> LoadResult {
    RefCell::new(None)
}

#[given("a catalogue with a cathedral and a museum")]
fn catalogue_with_two_places(#[from(catalog)] catalog: &RefCell<MemoryCatalog>) {
    *catalog.borrow_mut() = MemoryCatalog::new(vec![
        PlaceRow::new(1, "Cathedral", "old stone cathedral"),
        PlaceRow::new(2, "Museum", "modern art museum"),
    ])
    .with_rating(2, 4.0);
}

#[given("a catalogue that lists the cathedral twice")]
fn catalogue_with_duplicate(#[from(catalog)] catalog: &RefCell<MemoryCatalog>) {
    *catalog.borrow_mut() = MemoryCatalog::new(vec![
        PlaceRow::new(1, "Cathedral", "old stone cathedral"),
        PlaceRow::new(1, "Cathedral", "listed again"),
    ]);
}

#[given("an image listing that only knows the cathedral")]
fn listing_with_cathedral(#[from(images)] images: &RefCell<MemoryImages>) {
    *images.borrow_mut() =
        MemoryImages::new(HashMap::from([(1, CATHEDRAL_IMAGE.to_owned())]));
}

#[when("I load the corpus")]
fn load_corpus(
    #[from(catalog)] catalog: &RefCell<MemoryCatalog>,
    #[from(images)] images: &RefCell<MemoryImages>,
    #[from(result)] result: &LoadResult,
) {
    let reference = MemoryReference::new(vec!["ancient cathedral".to_owned()]);
    let loaded = CorpusStore::load(&*catalog.borrow(), &*images.borrow(), &reference);
    *result.borrow_mut() = Some(loaded);
}

fn loaded_store(result: &LoadResult) -> CorpusStore {
    match result.borrow().as_ref() {
        Some(Ok(store)) => store.clone(),
        Some(Err(err)) => panic!("corpus should load, got {err}"),
        None => panic!("corpus must be loaded first"),
    }
}

#[then("the museum shows the placeholder image")]
fn museum_has_placeholder(#[from(result)] result: &LoadResult) {
    let store = loaded_store(result);
    let museum = store.get(2).expect("museum is loaded");
    assert_eq!(museum.image_link, DEFAULT_IMAGE_LINK);
}

#[then("the cathedral shows its listing image")]
fn cathedral_has_image(#[from(result)] result: &LoadResult) {
    let store = loaded_store(result);
    let cathedral = store.get(1).expect("cathedral is loaded");
    assert_eq!(cathedral.image_link, CATHEDRAL_IMAGE);
}

#[then("the cathedral has the default popularity")]
fn cathedral_default_popularity(#[from(result)] result: &LoadResult) {
    let store = loaded_store(result);
    let cathedral = store.get(1).expect("cathedral is loaded");
    assert_eq!(cathedral.popularity, DEFAULT_RATING);
}

#[then("loading fails because place 1 is duplicated")]
fn loading_fails(#[from(result)] result: &LoadResult) {
    let binding = result.borrow();
    match binding.as_ref() {
        Some(Err(CorpusError::DuplicatePlace { id })) => assert_eq!(*id, 1),
        other => panic!("expected a duplicate place error, got {other:?}"),
    }
}

#[scenario(path = "tests/features/corpus_store.feature", index = 0)]
fn placeholder_images(
    catalog: RefCell<MemoryCatalog>,
    images: RefCell<MemoryImages>,
    result: LoadResult,
) {
    let _ = (catalog, images, result);
}

#[scenario(path = "tests/features/corpus_store.feature", index = 1)]
fn duplicate_ids(
    catalog: RefCell<MemoryCatalog>,
    images: RefCell<MemoryImages>,
    result: LoadResult,
) {
    let _ = (catalog, images, result);
}

#[scenario(path = "tests/features/corpus_store.feature", index = 2)]
fn default_popularity(
    catalog: RefCell<MemoryCatalog>,
    images: RefCell<MemoryImages>,
    result: LoadResult,
) {
    let _ = (catalog, images, result);
}
