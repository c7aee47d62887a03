//! Integration tests for role checks across catalog operations

mod common;

use ::common::prelude::*;

#[test]
fn test_member_cannot_touch_foreign_slides() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    let bob = common::member("bob");
    let slide = catalog.create_slide(&alice, common::titled("Private", &[])).unwrap();

    assert!(matches!(
        catalog.get_slide(&bob, slide.id),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.update_slide(&bob, slide.id, SlidePatch::default()),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.delete_slide(&bob, slide.id),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.add_comment(&bob, slide.id, "hi"),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.list_comments(&bob, slide.id),
        Err(CatalogError::Forbidden(_))
    ));

    assert_eq!(catalog.get_slide(&alice, slide.id).unwrap(), slide);
}

#[test]
fn test_admin_sees_and_manages_everything() {
    let (catalog, admin) = common::setup_catalog();
    let alice = common::member("alice");
    let bob = common::member("bob");
    catalog.create_slide(&alice, common::titled("A", &[])).unwrap();
    let b = catalog.create_slide(&bob, common::titled("B", &[])).unwrap();

    assert_eq!(catalog.list_slides(&admin, &SlideFilter::default()).len(), 2);
    assert_eq!(catalog.list_slides(&alice, &SlideFilter::default()).len(), 1);

    catalog
        .set_sharing(&admin, b.id, vec!["alice".to_string()])
        .unwrap();
    catalog.delete_slide(&admin, b.id).unwrap();
    assert!(catalog.list_slides(&bob, &SlideFilter::default()).is_empty());
}

#[test]
fn test_member_cannot_administer() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    assert!(matches!(
        catalog.reset_password(&alice, "bob", "new-password"),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.add_user(&alice, "carol", "carol-password", Role::Member),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.remove_user(&alice, "bob"),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.list_users(&alice),
        Err(CatalogError::Forbidden(_))
    ));
    assert!(matches!(
        catalog.view_activity_log(&alice, 10),
        Err(CatalogError::Forbidden(_))
    ));
}

#[test]
fn test_forbidden_reset_is_checked_before_lookup() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");
    assert!(matches!(
        catalog.reset_password(&alice, "nobody", "x"),
        Err(CatalogError::Forbidden(_))
    ));
}
