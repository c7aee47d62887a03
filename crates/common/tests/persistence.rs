//! Integration tests for the JSON document on disk

mod common;

use ::common::prelude::*;
use common::MEMBER_PASSWORD;

#[test]
fn test_document_survives_reopen() {
    let (catalog, _admin, temp) = common::setup_file_catalog();
    let alice = common::member("alice");

    let slide = catalog
        .create_slide(&alice, common::titled("Q1 Review", &["finance"]))
        .unwrap();
    catalog.add_comment(&alice, slide.id, "ship it").unwrap();
    drop(catalog);

    let reopened = Catalog::open(temp.path().join("slides.json")).unwrap();
    assert_eq!(reopened.get_slide(&alice, slide.id).unwrap(), slide);
    assert_eq!(reopened.list_comments(&alice, slide.id).unwrap().len(), 1);
    assert!(reopened.authenticate("alice", MEMBER_PASSWORD).is_ok());

    let next = reopened
        .create_slide(&alice, common::titled("Next", &[]))
        .unwrap();
    assert_eq!(next.id, SlideId(2));
}

#[test]
fn test_open_creates_missing_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("slides.json");
    let catalog = Catalog::open(&path).unwrap();

    assert!(path.exists());
    assert_eq!(catalog.path(), Some(path.as_path()));
    catalog.check().unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["slides"], serde_json::json!([]));
}

#[test]
fn test_hand_written_document_loads() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("slides.json");
    std::fs::write(
        &path,
        r#"{
  "slides": [{
    "id": 4,
    "title": "Legacy",
    "owner": "root",
    "source": {"type": "link", "url": "https://example.com/legacy"},
    "created_at": "2024-03-01T10:00:00Z",
    "modified_at": "2024-03-01T10:00:00Z"
  }]
}"#,
    )
    .unwrap();

    let catalog = Catalog::open(&path).unwrap().with_hash_cost(HashCost::Low);
    let admin = Session::new("root", Role::Admin);
    let legacy = catalog.get_slide(&admin, SlideId(4)).unwrap();
    assert_eq!(legacy.title, "Legacy");
    assert!(legacy.tags.is_empty());

    let fresh = catalog
        .create_slide(&admin, common::titled("Fresh", &[]))
        .unwrap();
    assert_eq!(fresh.id, SlideId(5));
}

#[test]
fn test_corrupt_document_is_an_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("slides.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Catalog::open(&path), Err(CatalogError::Json(_))));
}

#[test]
fn test_reload_picks_up_external_changes() {
    let (catalog, admin, temp) = common::setup_file_catalog();
    let path = temp.path().join("slides.json");

    let other = Catalog::open(&path).unwrap().with_hash_cost(HashCost::Low);
    other
        .create_slide(&admin, common::titled("From elsewhere", &[]))
        .unwrap();

    assert!(catalog.list_slides(&admin, &SlideFilter::default()).is_empty());
    catalog.reload().unwrap();
    assert_eq!(catalog.list_slides(&admin, &SlideFilter::default()).len(), 1);
}

#[test]
fn test_failed_mutation_leaves_disk_untouched() {
    let (catalog, admin, temp) = common::setup_file_catalog();
    let path = temp.path().join("slides.json");
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(catalog
        .update_slide(&admin, SlideId(99), SlidePatch::default())
        .is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
