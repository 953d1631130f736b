//! Final CSV export written when a session ends.
//!
//! Layout: `#` comment lines, one header row, one row per mark.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::platform::PlatformInfo;
use crate::session::{Mark, Session};
use crate::util::paths::sanitize_file_component;

pub const CSV_COLUMNS: [&str; 8] = [
    "timestamp_id",
    "date",
    "hour",
    "minute",
    "second",
    "millisecond",
    "iso_timestamp",
    "notes",
];

pub fn export_file_name(participant_id: &str, at: DateTime<Local>) -> String {
    format!(
        "session_recording_{}_{}.csv",
        sanitize_file_component(participant_id),
        at.format("%Y%m%d_%H%M%S")
    )
}

pub fn render_csv(
    participant_id: &str,
    start_date: Option<&str>,
    marks: &[Mark],
    platform: &PlatformInfo,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Session Recording for Participant: {}\n",
        single_line(participant_id)
    ));
    out.push_str(&format!("# Date: {}\n", start_date.unwrap_or("unknown")));
    out.push_str(&format!("# Total Timestamps: {}\n", marks.len()));
    for line in platform.comment_lines() {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');

    for mark in marks {
        let row = [
            mark.sequence_id.to_string(),
            mark.date(),
            mark.hour().to_string(),
            mark.minute().to_string(),
            mark.second().to_string(),
            mark.millisecond().to_string(),
            mark.iso_timestamp(),
            mark.annotation.clone(),
        ];
        let fields: Vec<Cow<'_, str>> = row.iter().map(|f| escape_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Writes the export for an ended session into `dir`.
///
/// The caller decides whether there is anything to export; this fails if the
/// session has no participant id.
pub fn write_export(
    dir: &Path,
    session: &Session,
    platform: &PlatformInfo,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let participant_id = session
        .participant_id()
        .context("Session has no participant id")?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {:?}", dir))?;

    let body = render_csv(participant_id, session.start_date(), session.marks(), platform);
    let file_name = export_file_name(participant_id, now);
    let (path, mut file) = create_unique(dir, &file_name)?;
    file.write_all(body.as_bytes())
        .with_context(|| format!("Failed to write export to {:?}", path))?;
    file.flush()
        .with_context(|| format!("Failed to flush export {:?}", path))?;

    tracing::info!(
        path = %path.display(),
        marks = session.marks().len(),
        "session exported"
    );
    Ok(path)
}

/// Same-second exports get a `_2`, `_3`, ... suffix instead of clobbering.
fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, fs::File)> {
    let stem = file_name.trim_end_matches(".csv");
    for attempt in 1..=100u32 {
        let candidate = if attempt == 1 {
            dir.join(file_name)
        } else {
            dir.join(format!("{stem}_{attempt}.csv"))
        };
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {:?}", candidate));
            }
        }
    }
    anyhow::bail!("Too many exports named {file_name} in {:?}", dir)
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(s)
    }
}
