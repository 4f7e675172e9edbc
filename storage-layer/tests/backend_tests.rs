/// Round-trip and fallback behavior shared by both storage backends.
use serde::{Deserialize, Serialize};
use storage_layer::{FileBackend, MemoryBackend, StorageBackend, StorageExt, StorageKey};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    id: Uuid,
    label: String,
    amount: String,
}

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry {
            id: Uuid::new_v4(),
            label: "first".to_string(),
            amount: "100.50".to_string(),
        },
        Entry {
            id: Uuid::new_v4(),
            label: "second".to_string(),
            amount: "0.01".to_string(),
        },
    ]
}

fn assert_round_trip(backend: &dyn StorageBackend) {
    let entries = sample_entries();
    backend.store(&StorageKey::Savings, &entries).unwrap();

    let reloaded: Vec<Entry> = backend.load(&StorageKey::Savings).unwrap();
    assert_eq!(reloaded, entries);
}

#[test]
fn test_memory_backend_round_trip() {
    assert_round_trip(&MemoryBackend::new());
}

#[test]
fn test_file_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    assert_round_trip(&backend);
}

#[test]
fn test_absent_key_loads_as_default() {
    let backend = MemoryBackend::new();
    let loaded: Vec<Entry> = backend.load(&StorageKey::Loans).unwrap();
    assert!(loaded.is_empty());

    let maybe: Option<Entry> = backend.load(&StorageKey::ActiveGroup).unwrap();
    assert!(maybe.is_none());
}

#[test]
fn test_malformed_value_loads_as_default() {
    let backend = MemoryBackend::new();
    backend
        .write_raw(&StorageKey::Groups, "{not valid json")
        .unwrap();

    let loaded: Vec<Entry> = backend.load(&StorageKey::Groups).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_overwrite_replaces_previous_value() {
    let backend = MemoryBackend::new();
    backend.store(&StorageKey::Savings, &sample_entries()).unwrap();

    let shorter = vec![sample_entries().remove(0)];
    backend.store(&StorageKey::Savings, &shorter).unwrap();

    let reloaded: Vec<Entry> = backend.load(&StorageKey::Savings).unwrap();
    assert_eq!(reloaded, shorter);
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_remove_then_load_yields_default() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();

    backend.store(&StorageKey::Loans, &sample_entries()).unwrap();
    backend.remove(&StorageKey::Loans).unwrap();
    // Removing again is a no-op.
    backend.remove(&StorageKey::Loans).unwrap();

    let reloaded: Vec<Entry> = backend.load(&StorageKey::Loans).unwrap();
    assert!(reloaded.is_empty());
}

#[test]
fn test_member_collections_are_isolated_per_group() {
    let backend = MemoryBackend::new();
    let group_a = Uuid::new_v4();
    let group_b = Uuid::new_v4();

    backend
        .store(&StorageKey::Members(group_a), &sample_entries())
        .unwrap();

    let other: Vec<Entry> = backend.load(&StorageKey::Members(group_b)).unwrap();
    assert!(other.is_empty());

    let original: Vec<Entry> = backend.load(&StorageKey::Members(group_a)).unwrap();
    assert_eq!(original.len(), 2);
}

#[test]
fn test_file_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let entries = sample_entries();
    {
        let backend = FileBackend::new(dir.path()).unwrap();
        backend.store(&StorageKey::Groups, &entries).unwrap();
    }
    let backend = FileBackend::new(dir.path()).unwrap();
    let reloaded: Vec<Entry> = backend.load(&StorageKey::Groups).unwrap();
    assert_eq!(reloaded, entries);
}
