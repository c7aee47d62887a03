//! Integration tests for the dashboard aggregate

mod common;

use ::common::prelude::*;

#[test]
fn test_dashboard_counts_visible_slides() {
    let (catalog, admin) = common::setup_catalog();
    let alice = common::member("alice");
    let bob = common::member("bob");

    let google = catalog
        .create_slide(
            &alice,
            NewSlide {
                tags: vec!["finance".to_string()],
                ..common::link("https://docs.google.com/presentation/d/deck123/edit")
            },
        )
        .unwrap();
    catalog
        .create_slide(&alice, common::titled("Canva", &["finance", "design"]))
        .unwrap();
    catalog
        .create_slide(&bob, common::titled("Bob only", &["secret"]))
        .unwrap();
    catalog.add_comment(&alice, google.id, "nice").unwrap();

    let dashboard = catalog.dashboard(&alice, &SlideFilter::default());
    assert_eq!(dashboard.stats.total, 2);
    assert_eq!(dashboard.stats.google, 1);
    assert_eq!(dashboard.stats.links, 1);
    assert_eq!(dashboard.stats.files, 0);
    assert_eq!(
        dashboard.stats.tags,
        vec![
            TagCount {
                tag: "finance".to_string(),
                count: 2
            },
            TagCount {
                tag: "design".to_string(),
                count: 1
            },
        ]
    );

    let summary = dashboard
        .slides
        .iter()
        .find(|s| s.slide.id == google.id)
        .unwrap();
    assert_eq!(summary.comment_count, 1);
    assert_eq!(
        summary.embed.as_ref().map(|e| e.src.as_str()),
        Some("https://docs.google.com/presentation/d/deck123/embed")
    );

    assert_eq!(catalog.dashboard(&admin, &SlideFilter::default()).stats.total, 3);
}

#[test]
fn test_dashboard_respects_filter() {
    let (catalog, admin) = common::setup_catalog();
    catalog
        .create_slide(&admin, common::titled("One", &["a"]))
        .unwrap();
    catalog
        .create_slide(&admin, common::titled("Two", &["b"]))
        .unwrap();

    let dashboard = catalog.dashboard(&admin, &SlideFilter::tag("b"));
    assert_eq!(dashboard.stats.total, 1);
    assert_eq!(dashboard.slides[0].slide.title, "Two");
}
