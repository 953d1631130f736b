//! Writing manifests and partial drafts to disk.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::util::paths::sanitize_file_component;

pub fn manifest_file_name(participant_id: &str) -> String {
    format!("participant_{}.json", sanitize_file_component(participant_id))
}

/// Where an interrupted questionnaire lands: the working directory, always.
pub fn fallback_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("backup_data_{}.json", now.format("%Y%m%d_%H%M%S")))
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("Failed to serialize manifest")?;
    String::from_utf8(buf).context("Serialized manifest is not UTF-8")
}

/// Pretty-prints `value` with a four-space indent, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let mut json = to_pretty_json(value)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::info!(path = %path.display(), "json saved");
    Ok(())
}
