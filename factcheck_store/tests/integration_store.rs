use factcheck_core::FactSet;
use factcheck_store::{ArtifactKind, ArtifactStore, ProcessedClaims, StoreError};
use std::cell::Cell;

fn processed() -> ProcessedClaims {
    ProcessedClaims {
        categories: vec!["award".to_string(), "birth place".to_string()],
        claims: Vec::new(),
    }
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn open_creates_nested_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("out").join("nested");
    let store = ArtifactStore::open(&root, FactSet::Training).expect("store should open");

    assert!(root.is_dir());
    assert_eq!(
        store.path(ArtifactKind::Processed),
        root.join("processed_training.json")
    );
    assert!(!store.exists(ArtifactKind::Processed));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn load_or_create_computes_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::open(dir.path(), FactSet::Test).expect("store should open");
    let calls = Cell::new(0);

    for _ in 0..3 {
        let value = store
            .load_or_create(ArtifactKind::Processed, || {
                calls.set(calls.get() + 1);
                Ok(processed())
            })
            .expect("artifact should load");
        assert_eq!(value, processed());
    }

    assert_eq!(calls.get(), 1);
    assert!(store.exists(ArtifactKind::Processed));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn cached_bytes_are_stable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::open(dir.path(), FactSet::Test).expect("store should open");
    store
        .load_or_create(ArtifactKind::Processed, || Ok(processed()))
        .expect("artifact should be written");
    let first = std::fs::read(store.path(ArtifactKind::Processed)).expect("artifact bytes");

    let reloaded: ProcessedClaims = store
        .load(ArtifactKind::Processed)
        .expect("artifact should parse")
        .expect("artifact should exist");
    assert_eq!(reloaded, processed());
    assert_eq!(
        std::fs::read(store.path(ArtifactKind::Processed)).expect("artifact bytes"),
        first
    );
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn save_never_overwrites() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::open(dir.path(), FactSet::Training).expect("store should open");
    store
        .save(ArtifactKind::Predictions, &vec![1, 2, 3])
        .expect("first save should succeed");

    let again = store.save(ArtifactKind::Predictions, &vec![4]);
    assert!(matches!(again, Err(StoreError::Io { .. })));

    let kept: Option<Vec<i32>> = store
        .load(ArtifactKind::Predictions)
        .expect("artifact should parse");
    assert_eq!(kept, Some(vec![1, 2, 3]));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn failed_build_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::open(dir.path(), FactSet::Training).expect("store should open");

    let result: Result<ProcessedClaims, _> =
        store.load_or_create(ArtifactKind::Processed, || anyhow::bail!("corpus missing"));

    assert!(matches!(
        result,
        Err(StoreError::Build {
            kind: ArtifactKind::Processed,
            ..
        })
    ));
    assert!(!store.exists(ArtifactKind::Processed));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn corrupt_artifact_is_a_json_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::open(dir.path(), FactSet::Training).expect("store should open");
    std::fs::write(store.path(ArtifactKind::WikiMatch), "{ not json").expect("write");

    let result: Result<Option<Vec<String>>, _> = store.load(ArtifactKind::WikiMatch);
    assert!(matches!(result, Err(StoreError::Json { .. })));
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn async_load_or_create_reuses_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ArtifactStore::open(dir.path(), FactSet::Training).expect("store should open");

    let first: Vec<String> = store
        .load_or_create_async(ArtifactKind::WikiMatch, || async {
            Ok(vec!["Marie Curie".to_string()])
        })
        .await
        .expect("artifact should build");
    let second: Vec<String> = store
        .load_or_create_async(ArtifactKind::WikiMatch, || async {
            anyhow::bail!("should not rebuild")
        })
        .await
        .expect("artifact should be cached");

    assert_eq!(first, second);
}
