use std::fs;

use fimon::error::StorageError;
use fimon::monitor::CancellationToken;
use fimon::scan::{HashAlgorithm, SnapshotBuilder};
use fimon::snapshot::Snapshot;
use fimon::store::{load_or_empty, BaselineStore, JsonBaselineStore};
use tempfile::TempDir;

#[test]
fn snapshot_of_real_tree_survives_save_and_load() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("watched");
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    fs::write(root.join("top.txt"), "top").unwrap();
    fs::write(root.join("nested/mid.bin"), [0u8, 159, 146, 150]).unwrap();
    fs::write(root.join("nested/deeper/leaf"), "").unwrap();

    let snapshot = SnapshotBuilder::new(root)
        .build(&CancellationToken::new())
        .unwrap();
    assert_eq!(snapshot.len(), 3);

    let store = JsonBaselineStore::new(temp.path().join("state/baseline.json"));
    store.save(&snapshot).unwrap();
    assert_eq!(store.load().unwrap(), snapshot);
}

#[test]
fn stored_file_is_a_flat_path_to_hex_object() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("baseline.json");
    let mut snapshot = Snapshot::new();
    snapshot.insert("/w/a", [0xab; 32]);
    JsonBaselineStore::new(&path).save(&snapshot).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["/w/a"], serde_json::json!("ab".repeat(32)));
}

#[test]
fn corrupt_baseline_degrades_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("baseline.json");
    fs::write(&path, "{ not json").unwrap();
    let store = JsonBaselineStore::new(&path);
    assert!(matches!(store.load(), Err(StorageError::Corrupt { .. })));
    assert!(load_or_empty(&store).is_empty());
}

#[test]
fn empty_file_digest_matches_known_vector() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("watched");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("empty"), "").unwrap();

    let snapshot = SnapshotBuilder::new(root)
        .with_fingerprinter(std::sync::Arc::new(HashAlgorithm::Sha256))
        .build(&CancellationToken::new())
        .unwrap();
    let (_, digest) = snapshot.iter().next().unwrap();
    assert_eq!(
        hex::encode(digest),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
