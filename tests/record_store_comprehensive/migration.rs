//! Legacy document shapes are upgraded in place at load.

use std::fs;

use crate::store_config;
use tagstore::prelude::*;

#[test]
fn test_legacy_scalar_document_upgrades() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = store_config(&dir);
    fs::write(
        &config.data_file,
        r#"{"motd": "welcome", "banner": "hello"}"#,
    )
    .unwrap();

    let store = RecordStore::open(config).unwrap();

    assert_eq!(store.len(), 2);
    assert!(!store.recovered_from_corruption());
    let motd = store.get("motd").unwrap();
    assert_eq!(motd.value, "welcome");
    assert!(motd.tags.is_empty());
    assert_eq!(motd.created_at, motd.updated_at);
}

#[test]
fn test_structured_record_without_tags_gains_empty_set() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = store_config(&dir);
    fs::write(
        &config.data_file,
        r#"{
            "k": {
                "value": "v",
                "created_at": "2024-01-01T10:00:00+00:00",
                "updated_at": "2024-01-02T10:00:00+00:00"
            }
        }"#,
    )
    .unwrap();

    let store = RecordStore::open(config).unwrap();
    let record = store.get("k").unwrap();
    assert!(record.tags.is_empty());
    assert!(record.updated_at > record.created_at);
}

#[test]
fn test_mixed_document_upgrades_only_legacy_entries() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = store_config(&dir);
    fs::write(
        &config.data_file,
        r#"{
            "old": "scalar value",
            "new": {
                "value": "structured",
                "created_at": "2024-01-01T10:00:00+00:00",
                "updated_at": "2024-01-01T10:00:00+00:00",
                "tags": ["kept"]
            }
        }"#,
    )
    .unwrap();

    let store = RecordStore::open(config).unwrap();

    assert!(store.get("old").unwrap().tags.is_empty());
    let kept = store.get("new").unwrap();
    assert!(kept.tags.contains("kept"));
    assert_eq!(
        kept.created_at.to_rfc3339(),
        "2024-01-01T10:00:00+00:00",
        "structured entries pass through untouched"
    );
}

#[test]
fn test_naive_legacy_timestamps_accepted() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = store_config(&dir);
    // Offset-less stamps, as older deployments wrote them.
    fs::write(
        &config.data_file,
        r#"{
            "k": {
                "value": "v",
                "created_at": "2024-06-01T08:30:00.123456",
                "updated_at": "2024-06-01T09:00:00",
                "tags": []
            }
        }"#,
    )
    .unwrap();

    let store = RecordStore::open(config).unwrap();
    let record = store.get("k").unwrap();
    assert!(record.updated_at > record.created_at);
}

#[test]
fn test_migration_is_stable_across_reopens() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        store_config(&dir).data_file(),
        r#"{"plain": "value"}"#,
    )
    .unwrap();

    // First open migrates; a mutation persists the upgraded shape.
    {
        let store = RecordStore::open(store_config(&dir)).unwrap();
        store.add("other", "x", &[]).unwrap();
    }

    // Second open reads the already-migrated document.
    let store = RecordStore::open(store_config(&dir)).unwrap();
    assert_eq!(store.get("plain").unwrap().value, "value");
    assert_eq!(store.len(), 2);

    let raw = fs::read_to_string(store_config(&dir).data_file()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(
        parsed["plain"].is_object(),
        "the durable document now holds the structured shape"
    );
    assert!(parsed["plain"]["tags"].is_array());
}
