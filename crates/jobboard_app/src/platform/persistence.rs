use engine_logging::{engine_error, engine_info, engine_warn};
use jobboard_core::SessionSnapshot;
use jobboard_engine::SessionStore;

/// Missing and unreadable sessions both start fresh; only the latter is logged.
pub(crate) fn load_session(store: &SessionStore) -> Option<SessionSnapshot> {
    match store.load() {
        Ok(Some(snapshot)) => {
            engine_info!("Loaded session from {:?}", store.path());
            Some(snapshot)
        }
        Ok(None) => None,
        Err(err) => {
            engine_warn!("Ignoring saved session at {:?}: {}", store.path(), err);
            None
        }
    }
}

pub(crate) fn save_session(store: &SessionStore, snapshot: &SessionSnapshot) {
    if let Err(err) = store.save(snapshot) {
        engine_error!("Failed to write session to {:?}: {}", store.path(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::QueryParams;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn corrupt_session_starts_fresh() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().to_path_buf());
        fs::write(store.path(), "(query: 12").unwrap();
        assert_eq!(load_session(&store), None);
    }

    #[test]
    fn saved_session_is_loaded_back() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path().join("nested"));
        let snapshot = SessionSnapshot {
            query: QueryParams::parse("title=Engineer"),
            recent_searches: vec!["kochi".into()],
        };
        save_session(&store, &snapshot);
        assert_eq!(load_session(&store), Some(snapshot));
    }
}
