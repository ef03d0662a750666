use std::fs;

use jobboard_core::{QueryParams, SessionSnapshot};
use jobboard_engine::{
    ensure_state_dir, AtomicFileWriter, PersistError, SessionStore, SESSION_FILE,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_state_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("notes.ron", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("notes.ron", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn state_dir_that_is_a_file_is_refused() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let store = SessionStore::new(file_path.clone());
    let result = store.save(&SessionSnapshot {
        query: QueryParams::new(),
        recent_searches: Vec::new(),
    });
    assert!(matches!(result, Err(PersistError::StateDir(_))));
}

#[test]
fn session_survives_a_restart() {
    let temp = TempDir::new().unwrap();
    let snapshot = SessionSnapshot {
        query: QueryParams::parse("company=R%26D+Labs&remote=Remote"),
        recent_searches: vec!["designer".to_string(), "rust".to_string()],
    };

    SessionStore::new(temp.path().to_path_buf())
        .save(&snapshot)
        .unwrap();
    let restored = SessionStore::new(temp.path().to_path_buf())
        .load()
        .unwrap()
        .expect("saved session");

    assert_eq!(restored, snapshot);
    let text = fs::read_to_string(temp.path().join(SESSION_FILE)).unwrap();
    assert!(text.contains("company=R%26D+Labs&remote=Remote"));
}

#[test]
fn missing_session_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let store = SessionStore::new(temp.path().join("never-created"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn corrupt_session_reports_format_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(SESSION_FILE), "{ not ron").unwrap();
    let store = SessionStore::new(temp.path().to_path_buf());
    assert!(matches!(store.load(), Err(PersistError::Format(_))));
}
