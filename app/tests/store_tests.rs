//! Session store tests
//!
//! Lifecycle, persistence and import behavior against the in-memory
//! key-value store.

use serde_json::{json, Value};

use sca_cupping_app::error::AppError;
use sca_cupping_app::storage::{KeyValueStore, MemoryStore};
use sca_cupping_app::store::{is_first_launch, mark_launched, SessionStore, SESSIONS_KEY};
use shared::models::CupScore;

fn open_empty() -> SessionStore<MemoryStore> {
    SessionStore::open(MemoryStore::new()).unwrap()
}

#[test]
fn test_open_without_stored_data_is_empty() {
    let store = open_empty();
    assert!(store.sessions().is_empty());
}

#[test]
fn test_open_with_malformed_json_is_empty() {
    let storage = MemoryStore::new().with_entry(SESSIONS_KEY, "{not json");
    let store = SessionStore::open(storage).unwrap();
    assert!(store.sessions().is_empty());
}

#[test]
fn test_create_session_defaults_and_order() {
    let mut store = open_empty();
    store.create("first", 3, "").unwrap();
    store.create("second", 5, "lot 7").unwrap();

    let sessions = store.sessions();
    assert_eq!(sessions.len(), 2);
    // newest first
    assert_eq!(sessions[0].title, "second");
    assert_eq!(sessions[0].num_cups, 5);
    assert_eq!(sessions[0].cup_scores.len(), 5);
    assert!(!sessions[0].is_complete);
    assert_eq!(sessions[1].title, "first");
}

#[test]
fn test_create_clamps_cup_count() {
    let mut store = open_empty();
    let id = store.create("", 99, "").unwrap().id.clone();
    assert_eq!(store.get(&id).unwrap().num_cups, 30);
}

#[test]
fn test_mutations_persist_to_storage() {
    let mut store = open_empty();
    let id = store.create("persisted", 2, "").unwrap().id.clone();

    let raw = store.storage().get(SESSIONS_KEY).unwrap().unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["title"], "persisted");
    assert_eq!(stored[0]["cupScores"].as_array().unwrap().len(), 2);

    store.finish(&id).unwrap();
    let raw = store.storage().get(SESSIONS_KEY).unwrap().unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["isComplete"], true);
}

#[test]
fn test_persisted_state_reloads() {
    let mut store = open_empty();
    let id = store.create("round trip", 3, "notes").unwrap().id.clone();
    let mut cup = CupScore::default();
    cup.set_taint_cups(2);
    store.update_cup(&id, 1, cup).unwrap();

    let reopened = SessionStore::open(store.storage().clone()).unwrap();
    let session = reopened.get(&id).unwrap();
    assert_eq!(session.title, "round trip");
    assert_eq!(session.cup_scores[1].taint_cups, 2);
    assert_eq!(session.cup_scores.len(), session.num_cups);
}

#[test]
fn test_open_migrates_legacy_records() {
    let stored = json!([{
        "id": "1600000000000",
        "title": "Old archive",
        "date": "2021-09-13T12:00:00.000Z",
        "isComplete": true,
        "numCups": 1,
        "sessionNotes": "",
        "cupScores": [{
            "cupTitle": "",
            "fragrance": 7.5,
            "uniformity": 6,
            "cleanCup": 10,
            "sweetness": 10,
            "defectType": "taint",
            "defectCount": 1,
            "notes": ""
        }]
    }]);
    let storage = MemoryStore::new().with_entry(SESSIONS_KEY, &stored.to_string());
    let store = SessionStore::open(storage).unwrap();

    let cup = &store.get("1600000000000").unwrap().cup_scores[0];
    assert_eq!(cup.taint_cups, 1);
    assert_eq!(cup.fault_cups, 0);
    assert_eq!(cup.uniformity_issues, vec![true, true, false, false, false]);
    assert_eq!(cup.clean_cup_issues, vec![false; 5]);
}

#[test]
fn test_update_cup_replaces_record() {
    let mut store = open_empty();
    let id = store.create("", 2, "").unwrap().id.clone();

    let mut cup = CupScore::default();
    cup.cup_title = "left bowl".to_string();
    store.update_cup(&id, 0, cup).unwrap();

    let session = store.get(&id).unwrap();
    assert_eq!(session.cup_scores[0].cup_title, "left bowl");
    assert_eq!(session.cup_scores.len(), session.num_cups);
}

#[test]
fn test_update_cup_rejects_out_of_range_index() {
    let mut store = open_empty();
    let id = store.create("", 2, "").unwrap().id.clone();
    let result = store.update_cup(&id, 2, CupScore::default());
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_finish_and_delete() {
    let mut store = open_empty();
    let id = store.create("", 1, "").unwrap().id.clone();

    store.finish(&id).unwrap();
    assert!(store.get(&id).unwrap().is_complete);

    store.delete(&id).unwrap();
    assert!(store.get(&id).is_none());
    assert!(matches!(store.delete(&id), Err(AppError::NotFound(_))));
}

#[test]
fn test_update_details_keeps_flight() {
    let mut store = open_empty();
    let id = store.create("before", 4, "old").unwrap().id.clone();
    store.update_details(&id, "after", "new").unwrap();

    let session = store.get(&id).unwrap();
    assert_eq!(session.title, "after");
    assert_eq!(session.session_notes, "new");
    assert_eq!(session.num_cups, 4);
    assert_eq!(session.cup_scores.len(), 4);
}

#[test]
fn test_resize_grows_and_truncates() {
    let mut store = open_empty();
    let id = store.create("", 3, "").unwrap().id.clone();

    store.resize_cups(&id, 5).unwrap();
    let session = store.get(&id).unwrap();
    assert_eq!(session.num_cups, 5);
    assert_eq!(session.cup_scores.len(), 5);
    assert_eq!(session.cup_scores[3], CupScore::default());

    store.resize_cups(&id, 3).unwrap();
    let session = store.get(&id).unwrap();
    assert_eq!(session.num_cups, 3);
    assert_eq!(session.cup_scores.len(), 3);
}

#[test]
fn test_import_assigns_fresh_identity() {
    let mut store = open_empty();
    let doc = json!({
        "id": "1500000000000",
        "title": "Shared by a friend",
        "date": "2020-01-01T00:00:00.000Z",
        "numCups": 1,
        "cupScores": [{"taintCups": 1, "flavor": 8.5}]
    });

    let session = store.import(&doc.to_string()).unwrap();
    assert_ne!(session.id, "1500000000000");
    assert_ne!(session.date, "2020-01-01T00:00:00.000Z");
    assert!(!session.is_complete);
    assert_eq!(session.title, "Shared by a friend");
    assert_eq!(session.cup_scores[0].taint_cups, 1);
}

#[test]
fn test_import_migrates_legacy_cups() {
    let mut store = open_empty();
    let doc = json!({
        "id": "x",
        "cupScores": [{"defectType": "fault", "defectCount": 2, "sweetness": 8}]
    });

    let session = store.import(&doc.to_string()).unwrap();
    let cup = &session.cup_scores[0];
    assert_eq!(cup.fault_cups, 2);
    assert_eq!(cup.sweetness_issues, vec![true, false, false, false, false]);
}

#[test]
fn test_import_rejections_take_no_action() {
    let mut store = open_empty();

    let cases = [
        "{not json",
        "[1, 2, 3]",
        r#"{"cupScores": []}"#,
        r#"{"id": "x"}"#,
        r#"{"id": "x", "cupScores": "nope"}"#,
    ];
    for raw in cases {
        assert!(matches!(
            store.import(raw),
            Err(AppError::InvalidImport(_))
        ));
    }
    assert!(store.sessions().is_empty());
}

#[test]
fn test_first_launch_flag() {
    let mut storage = MemoryStore::new();
    assert!(is_first_launch(&storage).unwrap());
    mark_launched(&mut storage).unwrap();
    assert!(!is_first_launch(&storage).unwrap());
}
