#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, Duration, Local, TimeZone};
use stopwatcher_core::api::{KeyInput, PlatformInfo, Recorder, RecorderEvent, RecorderSettings};

pub fn fixed_platform() -> PlatformInfo {
    PlatformInfo {
        os_name: "Linux".into(),
        os_version: "24.04".into(),
        kernel_version: "6.8.0".into(),
        host_name: "lab-01".into(),
        arch: "x86_64".into(),
        toolkit_version: "test".into(),
    }
}

/// 2024-01-01 10:00:00 local, plus `ms` milliseconds.
pub fn at(ms: i64) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap() + Duration::milliseconds(ms)
}

pub fn recorder_in(root: &Path, participant_id: Option<&str>) -> Recorder {
    let settings = RecorderSettings {
        export_dir: root.join("exports"),
        backup_dir: root.join("backups"),
        participant_id: participant_id.map(str::to_string),
    };
    let mut recorder = Recorder::with_platform(settings, fixed_platform());
    recorder.start(at(-1_000)).unwrap();
    recorder
}

pub fn type_text(recorder: &mut Recorder, text: &str, now: DateTime<Local>) -> Vec<RecorderEvent> {
    text.chars()
        .flat_map(|ch| recorder.handle_key(KeyInput::Char(ch), now))
        .collect()
}

/// Rows after the header, skipping `#` comment lines.
pub fn data_rows(csv: &str) -> Vec<String> {
    csv.lines()
        .filter(|l| !l.starts_with('#'))
        .skip(1)
        .map(str::to_string)
        .collect()
}

pub fn files_in(dir: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}
