//! Integration tests for creating, reading, updating, deleting and listing slides

mod common;

use ::common::prelude::*;

#[test]
fn test_create_then_list_by_tag() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    let created = catalog
        .create_slide(&alice, common::titled("Q1 Review", &["finance"]))
        .unwrap();
    assert_eq!(created.id, SlideId(1));

    let listed = catalog.list_slides(&alice, &SlideFilter::tag("finance"));
    assert_eq!(listed, vec![created]);
}

#[test]
fn test_get_returns_the_created_record() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    let created = catalog
        .create_slide(&alice, common::titled("Roadmap", &["Plan", "plan", " 2025 "]))
        .unwrap();
    assert_eq!(created.tags, vec!["plan", "2025"]);
    assert_eq!(created.owner, "alice");
    assert_eq!(created.created_at, created.modified_at);

    let fetched = catalog.get_slide(&alice, created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn test_default_titles_from_link() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    let google = catalog
        .create_slide(
            &alice,
            common::link("https://docs.google.com/presentation/d/1AbC_x-9/edit"),
        )
        .unwrap();
    assert_eq!(google.title, "Google Slides Presentation");
    assert_eq!(google.kind(), SlideKind::Google);
    assert!(matches!(
        &google.source,
        SlideSource::Google { presentation_id, .. } if presentation_id == "1AbC_x-9"
    ));

    let other = catalog
        .create_slide(&alice, common::link("https://www.example.org/talk"))
        .unwrap();
    assert_eq!(other.title, "Presentation from example.org");
    assert_eq!(other.kind(), SlideKind::Link);
}

#[test]
fn test_create_rejects_non_http_link() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    for source in [
        SlideSource::Link {
            url: "ftp://example.com/deck".to_string(),
        },
        SlideSource::Link {
            url: "   ".to_string(),
        },
        SlideSource::Google {
            url: "docs.google.com/presentation/d/abc".to_string(),
            presentation_id: "abc".to_string(),
        },
        SlideSource::Google {
            url: "https://docs.google.com/presentation/d/abc".to_string(),
            presentation_id: String::new(),
        },
    ] {
        let new = NewSlide {
            source,
            ..common::link("https://example.com/deck")
        };
        assert!(matches!(
            catalog.create_slide(&alice, new),
            Err(CatalogError::Validation(_))
        ));
    }
    assert!(catalog
        .list_slides(&alice, &SlideFilter::default())
        .is_empty());
}

#[test]
fn test_update_checks_access_before_link() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let bob = common::member("bob");
    let created = catalog
        .create_slide(&alice, common::link("https://example.com/deck"))
        .unwrap();

    let bad_link = || SlidePatch {
        url: Some("not a url".to_string()),
        ..SlidePatch::default()
    };
    assert!(matches!(
        catalog.update_slide(&alice, SlideId(42), bad_link()),
        Err(CatalogError::SlideNotFound(_))
    ));
    assert!(matches!(
        catalog.update_slide(&bob, created.id, bad_link()),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.update_slide(&alice, created.id, bad_link()),
        Err(CatalogError::Validation(_))
    ));
}

#[test]
fn test_update_patches_fields_and_bumps_modified() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let created = catalog
        .create_slide(&alice, common::titled("Draft", &["wip"]))
        .unwrap();

    let updated = catalog
        .update_slide(
            &alice,
            created.id,
            SlidePatch {
                title: Some("Final".to_string()),
                tags: Some(vec!["Done".to_string()]),
                url: Some("https://docs.google.com/presentation/d/xyz/edit".to_string()),
                ..SlidePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.tags, vec!["done"]);
    assert_eq!(updated.kind(), SlideKind::Google);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.modified_at >= created.modified_at);
    assert_eq!(catalog.get_slide(&alice, created.id).unwrap(), updated);
}

#[test]
fn test_empty_patch_touches_record() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let created = catalog
        .create_slide(&alice, common::titled("Draft", &[]))
        .unwrap();

    let touched = catalog
        .update_slide(&alice, created.id, SlidePatch::default())
        .unwrap();
    assert_eq!(touched.title, created.title);
    assert!(touched.modified_at >= created.modified_at);
}

#[test]
fn test_blank_title_is_rejected_and_nothing_changes() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let created = catalog
        .create_slide(&alice, common::titled("Draft", &[]))
        .unwrap();

    let err = catalog
        .update_slide(
            &alice,
            created.id,
            SlidePatch {
                title: Some("   ".to_string()),
                description: Some("changed".to_string()),
                ..SlidePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
    assert_eq!(catalog.get_slide(&alice, created.id).unwrap(), created);
}

#[test]
fn test_update_missing_slide_is_not_found() {
    let (catalog, admin) = common::setup_catalog();
    let err = catalog
        .update_slide(&admin, SlideId(42), SlidePatch::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_file_source_cannot_become_a_link() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let created = catalog
        .create_slide(
            &alice,
            NewSlide {
                title: None,
                description: String::new(),
                tags: vec![],
                source: SlideSource::File {
                    file_name: "Quarterly Board.pptx".to_string(),
                    stored_name: "abc.pptx".to_string(),
                    content_type: "application/vnd.ms-powerpoint".to_string(),
                    size: 1024,
                },
            },
        )
        .unwrap();
    assert_eq!(created.title, "Quarterly Board");

    let err = catalog
        .update_slide(
            &alice,
            created.id,
            SlidePatch {
                url: Some("https://example.com".to_string()),
                ..SlidePatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn test_delete_then_get_is_not_found() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let created = catalog
        .create_slide(&alice, common::titled("Old", &[]))
        .unwrap();

    let removed = catalog.delete_slide(&alice, created.id).unwrap();
    assert_eq!(removed.id, created.id);
    assert!(matches!(
        catalog.get_slide(&alice, created.id),
        Err(CatalogError::SlideNotFound(id)) if id == created.id
    ));
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    let first = catalog.create_slide(&alice, common::titled("A", &[])).unwrap();
    let second = catalog.create_slide(&alice, common::titled("B", &[])).unwrap();
    catalog.delete_slide(&alice, second.id).unwrap();
    let third = catalog.create_slide(&alice, common::titled("C", &[])).unwrap();

    assert_eq!(first.id, SlideId(1));
    assert_eq!(second.id, SlideId(2));
    assert_eq!(third.id, SlideId(3));
}

#[test]
fn test_list_is_newest_first_and_filters_combine() {
    let (catalog, admin) = common::setup_catalog();
    let alice = common::member("alice");
    let bob = common::member("bob");

    let a = catalog
        .create_slide(&alice, common::titled("Budget Q1", &["finance"]))
        .unwrap();
    let b = catalog
        .create_slide(&bob, common::titled("Budget Q2", &["finance"]))
        .unwrap();
    let c = catalog
        .create_slide(&alice, common::titled("Hiring plan", &["people"]))
        .unwrap();

    let all = catalog.list_slides(&admin, &SlideFilter::default());
    let ids: Vec<_> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    let finance = catalog.list_slides(&admin, &SlideFilter::tag("FINANCE"));
    let ids: Vec<_> = finance.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);

    let filter = SlideFilter {
        title: Some("budget".to_string()),
        owner: Some("alice".to_string()),
        ..SlideFilter::default()
    };
    let ids: Vec<_> = catalog
        .list_slides(&admin, &filter)
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![a.id]);

    let limited = SlideFilter {
        limit: Some(1),
        ..SlideFilter::default()
    };
    assert_eq!(catalog.list_slides(&admin, &limited).len(), 1);

    let by_kind = SlideFilter {
        kind: Some(SlideKind::Google),
        ..SlideFilter::default()
    };
    assert!(catalog.list_slides(&admin, &by_kind).is_empty());
}

#[test]
fn test_blank_filter_fields_are_ignored() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    catalog.create_slide(&alice, common::titled("A", &["x"])).unwrap();

    let filter = SlideFilter {
        tag: Some(String::new()),
        title: Some("  ".to_string()),
        owner: Some(String::new()),
        ..SlideFilter::default()
    };
    assert_eq!(catalog.list_slides(&alice, &filter).len(), 1);
}
