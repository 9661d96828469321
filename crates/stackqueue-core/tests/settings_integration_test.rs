use stackqueue_core::{BenchSettings, PollStrategy, RemainderPolicy, StackQueueError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_without_file_uses_defaults() {
    let settings = BenchSettings::load(None).unwrap();
    assert!(!settings.producers.is_empty());
    assert!(settings.total_items > 0);
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.toml");
    fs::write(
        &path,
        r#"
producers = [1, 3]
consumers = [2]
total_items = 999
log_file = "out.csv"
remainder = "truncate"
poll = "backoff"
"#,
    )
    .unwrap();

    let settings = BenchSettings::load(Some(&path)).unwrap();
    assert_eq!(settings.producers, vec![1, 3]);
    assert_eq!(settings.consumers, vec![2]);
    assert_eq!(settings.total_items, 999);
    assert_eq!(settings.log_file, std::path::PathBuf::from("out.csv"));
    assert_eq!(settings.remainder, RemainderPolicy::Truncate);
    assert_eq!(settings.poll, PollStrategy::Backoff);
    // untouched keys keep their defaults
    assert_eq!(settings.spsc_capacity, BenchSettings::default().spsc_capacity);
}

#[test]
fn test_invalid_file_contents_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.toml");
    fs::write(&path, "total_items = 0\n").unwrap();

    let err = BenchSettings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StackQueueError::InvalidConfig(_)));
}

#[test]
fn test_oversized_spsc_ring_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.toml");
    fs::write(&path, "spsc_capacity = 1099511627776\n").unwrap();

    let err = BenchSettings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StackQueueError::InvalidConfig(_)));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = BenchSettings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, StackQueueError::Settings(_)));
}
