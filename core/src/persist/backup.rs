//! Crash-recovery snapshot of the running session.
//!
//! One file per participant, overwritten after every finalized mark. It is a
//! snapshot, not a log: only the latest state is kept.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{Mark, Session};
use crate::util::paths::sanitize_file_component;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub participant_id: String,
    pub start_date: Option<String>,
    pub marks: Vec<Mark>,
    pub backup_time: DateTime<Local>,
}

impl BackupSnapshot {
    /// Only finalized marks are captured. `None` until a participant is known.
    pub fn from_session(session: &Session, now: DateTime<Local>) -> Option<Self> {
        let participant_id = session.participant_id()?.to_string();
        let marks = session
            .marks()
            .iter()
            .filter(|m| !m.is_pending())
            .cloned()
            .collect();
        Some(Self {
            participant_id,
            start_date: session.start_date().map(str::to_string),
            marks,
            backup_time: now,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize backup")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize backup")
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// reader never sees a half-written snapshot.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write backup to {:?}", tmp))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move backup into place at {:?}", path))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read backup from {:?}", path.as_ref()))?;
        Self::from_json(&json)
    }
}

/// Fixed-location backup files, keyed by participant id.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// `<temp>/stopwatcher`
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("stopwatcher")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, participant_id: &str) -> PathBuf {
        self.dir.join(format!(
            "session_backup_{}.json",
            sanitize_file_component(participant_id)
        ))
    }

    /// Returns `Ok(None)` when there is nothing to back up yet.
    pub fn write(&self, session: &Session, now: DateTime<Local>) -> Result<Option<PathBuf>> {
        let Some(snapshot) = BackupSnapshot::from_session(session, now) else {
            return Ok(None);
        };
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create backup directory: {:?}", self.dir))?;
        let path = self.path_for(&snapshot.participant_id);
        snapshot.save_to_file(&path)?;
        tracing::debug!(path = %path.display(), marks = snapshot.marks.len(), "backup written");
        Ok(Some(path))
    }

    pub fn load(&self, participant_id: &str) -> Result<Option<BackupSnapshot>> {
        let path = self.path_for(participant_id);
        if !path.exists() {
            return Ok(None);
        }
        BackupSnapshot::load_from_file(path).map(Some)
    }
}
