//! JSON snapshot of a dashboard session.
//!
//! The engine keeps everything in memory; the CLI saves a snapshot between
//! invocations. Flow ratings inside a snapshot are informational only and
//! are recomputed by [`crate::store::Store::from_snapshot`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::engine::{LoadHistory, SuggestionState};
use crate::error::{CoreError, Result};
use crate::focus::FocusTimer;
use crate::model::{Project, Task};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub suggestion: SuggestionState,
    #[serde(default)]
    pub focus: FocusTimer,
    #[serde(default)]
    pub history: LoadHistory,
}

impl SessionSnapshot {
    /// Default snapshot location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("session.json"))
    }

    /// Read a snapshot. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Write atomically via a sibling temp file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectDna, ProjectId, ProjectStatus, TaskId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SessionSnapshot::load_from(&dir.path().join("session.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let snapshot = SessionSnapshot {
            projects: vec![Project {
                id: ProjectId::from("p1"),
                name: "Freelance Gig".into(),
                dna: ProjectDna::ClientCommunication,
                impact_score: 3,
                status: ProjectStatus::Paused,
                burnout_budget_usage: 25.0,
            }],
            tasks: vec![Task::new(
                TaskId::from("t1"),
                ProjectId::from("p1"),
                "Client feedback implementation",
                Utc.with_ymd_and_hms(2026, 5, 7, 9, 0, 0).unwrap(),
                7,
            )],
            ..Default::default()
        };
        snapshot.save_to(&path).unwrap();

        let loaded = SessionSnapshot::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn empty_object_is_an_empty_session() {
        let snapshot: SessionSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.projects.is_empty());
        assert_eq!(snapshot.suggestion, SuggestionState::Idle);
    }
}
