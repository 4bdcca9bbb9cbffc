use std::fs;
use std::sync::Once;

use suggest_core::{CountStore, Features, Model};
use suggest_store::{FileBackedStore, PersistError};
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(suggest_logging::initialize_for_tests);
}

#[test]
fn missing_file_opens_empty_and_clean() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = FileBackedStore::open(temp.path().join("model.json")).unwrap();

    assert!(store.tables().is_empty());
    assert!(!store.is_dirty());
    assert!(store.classes().is_empty());
}

#[test]
fn trained_counts_survive_a_reopen() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("model.json");

    let mut model = Model::new(FileBackedStore::open(&path).unwrap());
    model.update("office", &Features::new().text("q", "stapler paper stapler"));
    assert!(model.store().is_dirty());
    model.store_mut().flush().unwrap();
    assert!(!model.store().is_dirty());

    let reopened = FileBackedStore::open(&path).unwrap();
    assert_eq!(reopened.path(), path.as_path());
    assert_eq!(reopened.prior_count("office"), 1);
    assert_eq!(reopened.word_count_in_class("q", "office", "stapler"), 2);
    assert_eq!(reopened.total_word_count_in_class("q", "office"), 3);
    assert_eq!(reopened.vocabulary_size("q"), 2);
}

#[test]
fn clean_flush_does_not_create_a_file() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("model.json");

    let mut store = FileBackedStore::open(&path).unwrap();
    store.flush().unwrap();
    assert!(!path.exists());
}

#[test]
fn corrupt_file_is_an_error() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("model.json");
    fs::write(&path, "garbage").unwrap();

    let result = FileBackedStore::open(&path);
    assert!(matches!(result, Err(PersistError::Snapshot(_))));
}

#[test]
fn predictions_match_the_in_memory_model() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let training = [
        ("p", Features::new().text("q", "awesome awesome ok")),
        ("n", Features::new().text("q", "terrible ok").categorical("user", "bob")),
    ];

    let mut file_model = Model::new(FileBackedStore::open(temp.path().join("m.json")).unwrap());
    let mut memory_model: Model = Model::default();
    for (outcome, features) in &training {
        file_model.update(outcome, features);
        memory_model.update(outcome, features);
    }

    let probe = Features::new().text("q", "awesome").categorical("user", "bob");
    assert_eq!(file_model.predict(&probe), memory_model.predict(&probe));
}
