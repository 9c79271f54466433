//! Session persistence for the CLI.
//!
//! A small RON file in the working directory carries the bearer token
//! and a short history of completed generations between runs. Writes go
//! through a temp file then rename, so a crash never leaves a torn file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use client_logging::{client_error, client_info, client_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

const SESSION_FILENAME: &str = ".composer_session.ron";

/// Most recent generations kept in the session file.
const HISTORY_CAP: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Local wall-clock time of completion, RFC 3339.
    pub at: String,
    pub source_url: String,
    pub theme: String,
    pub platforms: Vec<String>,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    pub bearer_token: Option<String>,
    pub recent: Vec<GenerationRecord>,
}

impl Session {
    /// Prepends a record, trimming history to the cap.
    pub fn record(&mut self, record: GenerationRecord) {
        self.recent.insert(0, record);
        self.recent.truncate(HISTORY_CAP);
    }
}

/// Loads the session from `dir`, or a default one when the file is
/// missing or unreadable. A corrupt file is logged and discarded, never
/// fatal.
pub fn load_session(dir: &Path) -> Session {
    let path = dir.join(SESSION_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Session::default();
        }
        Err(err) => {
            client_warn!("Failed to read session from {:?}: {}", path, err);
            return Session::default();
        }
    };

    match ron::from_str(&content) {
        Ok(session) => {
            client_info!("Loaded session from {:?}", path);
            session
        }
        Err(err) => {
            client_warn!("Failed to parse session from {:?}: {}", path, err);
            Session::default()
        }
    }
}

/// Persists the session atomically. Errors are logged; the run's output
/// was already printed, so persistence failure is not fatal.
pub fn save_session(dir: &Path, session: &Session) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(session, pretty) {
        Ok(text) => text,
        Err(err) => {
            client_error!("Failed to serialize session: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(dir, SESSION_FILENAME, &content) {
        client_error!("Failed to write session to {:?}: {}", dir, err);
    }
}

fn write_atomic(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_record(theme: &str) -> GenerationRecord {
        GenerationRecord {
            at: "2026-08-30T10:00:00+02:00".to_string(),
            source_url: "https://example.com/about".to_string(),
            theme: theme.to_string(),
            platforms: vec!["linkedin".to_string()],
            post_count: 1,
        }
    }

    #[test]
    fn missing_file_yields_default_session() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_session(dir.path()), Session::default());
    }

    #[test]
    fn session_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session {
            bearer_token: Some("tok".to_string()),
            recent: Vec::new(),
        };
        session.record(sample_record("launch"));

        save_session(dir.path(), &session);
        assert_eq!(load_session(dir.path()), session);
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SESSION_FILENAME), "not ron at all (").unwrap();
        assert_eq!(load_session(dir.path()), Session::default());
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let mut session = Session::default();
        for i in 0..25 {
            session.record(sample_record(&format!("theme {i}")));
        }
        assert_eq!(session.recent.len(), HISTORY_CAP);
        assert_eq!(session.recent[0].theme, "theme 24");
    }
}
