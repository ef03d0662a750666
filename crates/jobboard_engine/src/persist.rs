use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_debug;
use jobboard_core::{QueryParams, SessionSnapshot};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

pub const SESSION_FILE: &str = "session.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("session format error: {0}")]
    Format(String),
}

/// Ensure the state directory exists; create if missing.
pub fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StateDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file and a rename.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_state_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedSession {
    query: String,
    #[serde(default)]
    recent_searches: Vec<String>,
}

/// The query string and recent searches, kept between runs.
pub struct SessionStore {
    writer: AtomicFileWriter,
    path: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        let path = dir.join(SESSION_FILE);
        Self {
            writer: AtomicFileWriter::new(dir),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<SessionSnapshot>, PersistError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let persisted: PersistedSession =
            ron::from_str(&text).map_err(|e| PersistError::Format(e.to_string()))?;
        Ok(Some(SessionSnapshot {
            query: QueryParams::parse(&persisted.query),
            recent_searches: persisted.recent_searches,
        }))
    }

    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<PathBuf, PersistError> {
        let persisted = PersistedSession {
            query: snapshot.query.to_query_string(),
            recent_searches: snapshot.recent_searches.clone(),
        };
        let text = ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::default())
            .map_err(|e| PersistError::Format(e.to_string()))?;
        let path = self.writer.write(SESSION_FILE, &text)?;
        engine_debug!("Saved session to {:?}", path);
        Ok(path)
    }
}
