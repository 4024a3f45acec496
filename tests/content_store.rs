//! Filesystem Store Tests
//!
//! Exercises the filesystem-backed content and record stores against
//! temporary directories.

use tempfile::TempDir;
use tokio::fs;

use pbimport::import::{FsRecordStore, RecordStore};
use pbimport::library::{ContentSource, FsContentStore};

async fn write_library(dir: &TempDir, name: &str, entries: serde_json::Value) {
    let path = dir.path().join(format!("{name}.json"));
    fs::write(&path, serde_json::to_string_pretty(&entries).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_library_preserves_order() {
    let dir = TempDir::new().unwrap();
    write_library(
        &dir,
        "pf2e.ancestries",
        serde_json::json!([
            {"_id": "a1", "name": "Human", "type": "ancestry"},
            {"_id": "a2", "name": "Dwarf", "type": "ancestry"},
            {"_id": "a3", "name": "Elf", "type": "ancestry"}
        ]),
    )
    .await;

    let store = FsContentStore::new(dir.path());
    let entries = store.get_library("pf2e.ancestries").await.unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Human", "Dwarf", "Elf"]);
}

#[tokio::test]
async fn test_missing_library_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = FsContentStore::new(dir.path());

    let entries = store.get_library("pf2e.nothing").await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_get_document_by_key() {
    let dir = TempDir::new().unwrap();
    write_library(
        &dir,
        "pf2e.classfeatures",
        serde_json::json!([
            {"_id": "aoo", "name": "Attack of Opportunity", "type": "feat"},
            {"_id": "brav", "name": "Bravery", "type": "feat"}
        ]),
    )
    .await;

    let store = FsContentStore::new(dir.path());

    let found = store.get_document("pf2e.classfeatures", "brav").await.unwrap();
    assert_eq!(found.unwrap().name, "Bravery");

    let missing = store.get_document("pf2e.classfeatures", "nope").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_malformed_library_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pf2e.broken.json"), "not json")
        .await
        .unwrap();

    let store = FsContentStore::new(dir.path());
    assert!(store.get_library("pf2e.broken").await.is_err());
}

#[tokio::test]
async fn test_list_libraries_sorted() {
    let dir = TempDir::new().unwrap();
    write_library(&dir, "pf2e.heritages", serde_json::json!([])).await;
    write_library(&dir, "pf2e.ancestries", serde_json::json!([])).await;
    write_library(&dir, "pf2e.classes", serde_json::json!([])).await;
    // Non-JSON files are ignored
    fs::write(dir.path().join("README.md"), "notes").await.unwrap();

    let store = FsContentStore::new(dir.path());
    let names = store.list_libraries().await.unwrap();

    assert_eq!(names, ["pf2e.ancestries", "pf2e.classes", "pf2e.heritages"]);
}

#[tokio::test]
async fn test_list_libraries_without_directory() {
    let dir = TempDir::new().unwrap();
    let store = FsContentStore::new(dir.path().join("does-not-exist"));

    assert!(store.list_libraries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_record_store_writes_document() {
    let dir = TempDir::new().unwrap();
    let store = FsRecordStore::new(dir.path().join("records"));

    store
        .import_document("actor-17", r#"{"name":"Test"}"#)
        .await
        .unwrap();

    let written = fs::read_to_string(store.record_path("actor-17"))
        .await
        .unwrap();
    assert_eq!(written, r#"{"name":"Test"}"#);
}

#[tokio::test]
async fn test_record_store_overwrites_existing() {
    let dir = TempDir::new().unwrap();
    let store = FsRecordStore::new(dir.path().join("records"));

    store.import_document("actor-17", "{\"v\":1}").await.unwrap();
    store.import_document("actor-17", "{\"v\":2}").await.unwrap();

    let written = fs::read_to_string(store.record_path("actor-17"))
        .await
        .unwrap();
    assert_eq!(written, "{\"v\":2}");
}
