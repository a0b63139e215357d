//! Integration tests for on-disk persistence.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use revelion_core::{EventMode, RsvpStatus};
use revelion_integration_tests::TestContext;
use revelion_planner::db::{FileStorage, StorageError, keys};
use revelion_planner::models::RsvpSubmission;
use revelion_planner::session::Session;
use revelion_planner::stores::AccountStore;

#[test]
fn test_collections_survive_restart() {
    let ctx = TestContext::new();
    {
        let mut planner = ctx.planner();
        let ana = planner.accounts_mut().register("Ana", "1111").unwrap();
        planner.shopping_mut().add("Champagne", &ana.id).unwrap();
        planner
            .participants_mut()
            .upsert(RsvpSubmission::new("Ana", RsvpStatus::Confirmed, EventMode::NewYear))
            .unwrap();
    }

    let planner = ctx.planner();
    assert_eq!(planner.accounts().list().len(), 1);
    assert_eq!(planner.shopping().list()[0].name, "Champagne");
    assert_eq!(planner.participants().headcount(EventMode::NewYear), 1);
}

#[test]
fn test_stored_json_uses_camel_case_and_millis() {
    let ctx = TestContext::new();
    let mut planner = ctx.planner();
    let ana = planner.accounts_mut().register("Ana", "1111").unwrap();
    planner.shopping_mut().add("Cake", &ana.id).unwrap();

    let accounts = ctx.read_raw(keys::ACCOUNTS);
    assert_eq!(accounts[0]["isAdmin"], false);
    assert!(accounts[0]["createdAt"].is_i64());

    let items = ctx.read_raw(keys::SHOPPING);
    assert_eq!(items[0]["addedBy"], ana.id.as_str());
    assert!(items[0].get("claimedBy").is_none());
}

#[test]
fn test_no_temp_files_left_behind() {
    let ctx = TestContext::new();
    let mut planner = ctx.planner();
    planner.accounts_mut().register("Ana", "1111").unwrap();
    planner.accounts_mut().register("Ion", "2222").unwrap();

    let names: Vec<String> = std::fs::read_dir(ctx.data_dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&format!("{}.json", keys::ACCOUNTS)));
    assert!(names.iter().all(|name| !name.ends_with(".tmp")));
}

#[test]
fn test_legacy_participants_file_is_normalized() {
    let ctx = TestContext::new();
    ctx.write_raw(
        keys::PARTICIPANTS,
        r#"[{"id":"p1","name":"Ana","status":"confirmed","event":"newyear",
             "guests":{"count":2,"names":"Ion, Radu"}}]"#,
    );

    let mut planner = ctx.planner();
    assert_eq!(planner.participants().list_all()[0].guests, vec!["Ion", "Radu"]);
    assert_eq!(planner.participants().headcount(EventMode::NewYear), 3);

    planner
        .participants_mut()
        .upsert(RsvpSubmission::new("ana", RsvpStatus::Maybe, EventMode::NewYear))
        .unwrap();
    let stored = ctx.read_raw(keys::PARTICIPANTS);
    assert_eq!(stored[0]["id"], "p1");
    assert_eq!(stored[0]["guests"], serde_json::json!(["Ion", "Radu"]));
}

#[test]
fn test_corrupt_collection_is_reported() {
    let ctx = TestContext::new();
    ctx.write_raw(keys::ACCOUNTS, "{not json");

    let storage = FileStorage::open(ctx.data_dir()).unwrap();
    let result = AccountStore::open(Arc::new(storage), Session::in_memory());
    assert!(matches!(result, Err(StorageError::Corrupt { key, .. }) if key == keys::ACCOUNTS));
}

#[test]
fn test_partial_config_is_merged_over_defaults() {
    let ctx = TestContext::new();
    ctx.write_raw(
        keys::CONFIG,
        r#"{"mode":"christmas","christmas":{"venueName":"Loft"},"rules":null}"#,
    );

    let planner = ctx.planner();
    let config = planner.config().get();
    assert_eq!(config.mode, EventMode::Christmas);
    assert_eq!(config.christmas.venue_name, "Loft");
    assert!(!config.christmas.date.is_empty());
    assert!(!config.rules.is_empty());
    assert!(!config.playlist_url.is_empty());
}
