//! Integration tests for authentication and user administration

mod common;

use ::common::prelude::*;
use common::{ADMIN_PASSWORD, MEMBER_PASSWORD};

#[test]
fn test_authenticate() {
    let (catalog, _admin) = common::setup_catalog();

    let session = catalog.authenticate("alice", MEMBER_PASSWORD).unwrap();
    assert_eq!(session, Session::new("alice", Role::Member));

    let admin = catalog.authenticate("root", ADMIN_PASSWORD).unwrap();
    assert!(admin.is_admin());
}

#[test]
fn test_unknown_user_and_wrong_password_fail_alike() {
    let (catalog, _admin) = common::setup_catalog();

    let unknown = catalog.authenticate("mallory", MEMBER_PASSWORD).unwrap_err();
    let wrong = catalog.authenticate("alice", "not-the-password").unwrap_err();
    assert!(matches!(unknown, CatalogError::InvalidCredentials));
    assert!(matches!(wrong, CatalogError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[test]
fn test_bootstrap_only_once() {
    let (catalog, _admin) = common::setup_catalog();
    assert!(!catalog.bootstrap_admin("other", "other-password").unwrap());
    assert!(!catalog.user_exists("other"));
}

#[test]
fn test_add_duplicate_user() {
    let (catalog, admin) = common::setup_catalog();
    assert!(matches!(
        catalog.add_user(&admin, "alice", "whatever-pass", Role::Member),
        Err(CatalogError::AlreadyExists(name)) if name == "alice"
    ));
}

#[test]
fn test_add_user_validates_input() {
    let (catalog, admin) = common::setup_catalog();
    assert!(matches!(
        catalog.add_user(&admin, "carol", "short", Role::Member),
        Err(CatalogError::Validation(_))
    ));
    assert!(matches!(
        catalog.add_user(&admin, "carol smith", "long-enough", Role::Member),
        Err(CatalogError::Validation(_))
    ));
    assert!(!catalog.user_exists("carol"));
}

#[test]
fn test_list_users_is_sorted() {
    let (catalog, admin) = common::setup_catalog();
    let names: Vec<_> = catalog
        .list_users(&admin)
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["alice", "bob", "root"]);
}

#[test]
fn test_reset_password() {
    let (catalog, admin) = common::setup_catalog();

    assert!(matches!(
        catalog.reset_password(&admin, "alice", "short"),
        Err(CatalogError::Validation(_))
    ));
    assert!(matches!(
        catalog.reset_password(&admin, "nobody", "long-enough"),
        Err(CatalogError::UserNotFound(_))
    ));

    let user = catalog
        .reset_password(&admin, "  alice ", "brand-new-password")
        .unwrap();
    assert_eq!(user.username, "alice");
    assert!(catalog.authenticate("alice", MEMBER_PASSWORD).is_err());
    assert!(catalog.authenticate("alice", "brand-new-password").is_ok());
}

#[test]
fn test_change_password_requires_current() {
    let (catalog, _admin) = common::setup_catalog();
    let alice = common::member("alice");

    assert!(matches!(
        catalog.change_password(&alice, "wrong-current", "another-password"),
        Err(CatalogError::InvalidCredentials)
    ));
    catalog
        .change_password(&alice, MEMBER_PASSWORD, "another-password")
        .unwrap();
    assert!(catalog.authenticate("alice", "another-password").is_ok());
}

#[test]
fn test_remove_user_scrubs_sharing() {
    let (catalog, admin) = common::setup_catalog();
    let alice = common::member("alice");
    let bob = common::member("bob");

    let shared = catalog.create_slide(&alice, common::titled("Shared", &[])).unwrap();
    catalog
        .set_sharing(&alice, shared.id, vec!["bob".to_string()])
        .unwrap();
    let owned = catalog.create_slide(&bob, common::titled("Bob's", &[])).unwrap();

    let removed = catalog.remove_user(&admin, "bob").unwrap();
    assert_eq!(removed.username, "bob");
    assert!(!catalog.user_exists("bob"));
    assert!(catalog.get_slide(&admin, shared.id).unwrap().shared_with.is_empty());

    // orphaned slides stay and admins can still manage them
    assert_eq!(catalog.get_slide(&admin, owned.id).unwrap().owner, "bob");
    catalog.delete_slide(&admin, owned.id).unwrap();
    assert!(catalog.authenticate("bob", MEMBER_PASSWORD).is_err());
}

#[test]
fn test_admin_cannot_remove_self() {
    let (catalog, admin) = common::setup_catalog();
    assert!(matches!(
        catalog.remove_user(&admin, "root"),
        Err(CatalogError::Validation(_))
    ));
    assert!(matches!(
        catalog.remove_user(&admin, "nobody"),
        Err(CatalogError::UserNotFound(_))
    ));
}

#[test]
fn test_activity_log_newest_first() {
    let (catalog, admin) = common::setup_catalog();
    let alice = common::member("alice");
    let slide = catalog.create_slide(&alice, common::titled("Deck", &[])).unwrap();
    catalog.add_comment(&alice, slide.id, "note").unwrap();
    let _ = catalog.authenticate("alice", "bad-password");

    let log = catalog.view_activity_log(&admin, 3).unwrap();
    let kinds: Vec<_> = log.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityKind::LoginFailed,
            ActivityKind::CommentAdded,
            ActivityKind::SlideCreated,
        ]
    );
    assert_eq!(log[1].actor, "alice");
}

#[test]
fn test_activity_log_is_capped() {
    let catalog = Catalog::in_memory()
        .with_hash_cost(HashCost::Low)
        .with_activity_limit(5);
    catalog.bootstrap_admin("root", ADMIN_PASSWORD).unwrap();
    let admin = catalog.authenticate("root", ADMIN_PASSWORD).unwrap();

    for i in 0..10 {
        catalog
            .create_slide(&admin, common::titled(&format!("Deck {i}"), &[]))
            .unwrap();
    }

    let log = catalog.view_activity_log(&admin, 100).unwrap();
    assert_eq!(log.len(), 5);
    assert_eq!(log[0].subject, "#10 Deck 9");
}
