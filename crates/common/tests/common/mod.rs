//! Shared fixtures for catalog integration tests
#![allow(dead_code)]

use ::common::prelude::*;
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "admin-password";
pub const MEMBER_PASSWORD: &str = "member-password";

/// An in-memory catalog with an admin `root` and members `alice` and `bob`.
pub fn setup_catalog() -> (Catalog, Session) {
    let catalog = Catalog::in_memory().with_hash_cost(HashCost::Low);
    populate(&catalog)
}

/// Same as [`setup_catalog`] but backed by `slides.json` in a temp dir.
pub fn setup_file_catalog() -> (Catalog, Session, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let catalog = Catalog::open(temp_dir.path().join("slides.json"))
        .unwrap()
        .with_hash_cost(HashCost::Low);
    let (catalog, admin) = populate(&catalog);
    (catalog, admin, temp_dir)
}

fn populate(catalog: &Catalog) -> (Catalog, Session) {
    assert!(catalog.bootstrap_admin("root", ADMIN_PASSWORD).unwrap());
    let admin = catalog.authenticate("root", ADMIN_PASSWORD).unwrap();
    catalog
        .add_user(&admin, "alice", MEMBER_PASSWORD, Role::Member)
        .unwrap();
    catalog
        .add_user(&admin, "bob", MEMBER_PASSWORD, Role::Member)
        .unwrap();
    (catalog.clone(), admin)
}

pub fn member(name: &str) -> Session {
    Session::new(name, Role::Member)
}

pub fn link(url: &str) -> NewSlide {
    NewSlide {
        title: None,
        description: String::new(),
        tags: vec![],
        source: ::common::links::classify(url).unwrap(),
    }
}

pub fn titled(title: &str, tags: &[&str]) -> NewSlide {
    NewSlide {
        title: Some(title.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..link("https://example.com/deck")
    }
}
