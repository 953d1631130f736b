use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::persist::BackupStore;
use crate::session::RecorderSettings;
use crate::util::paths::resolve_output_dir;

/// Command-line overrides for a recording run. Anything unset falls back to config.
#[derive(Debug, Clone, Default)]
pub struct RecordOverrides {
    pub participant_id: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppContext {
    cfg: AppConfig,
}

impl AppContext {
    pub fn new(cfg: AppConfig) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn recorder_settings(&self, overrides: RecordOverrides) -> RecorderSettings {
        let rec = &self.cfg.recorder;
        let export_dir =
            resolve_output_dir(overrides.export_dir.as_deref(), rec.export_dir.as_deref());
        let backup_dir = overrides.backup_dir.unwrap_or_else(|| {
            rec.backup_dir
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(BackupStore::default_dir)
        });
        RecorderSettings {
            export_dir,
            backup_dir,
            participant_id: overrides.participant_id,
        }
    }

    /// `--output` wins; otherwise `participant_<id>.json` in the configured
    /// directory or the Downloads folder.
    pub fn manifest_output_path(&self, explicit: Option<&Path>, participant_id: &str) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        resolve_output_dir(None, self.cfg.manifest.output_dir.as_deref())
            .join(crate::manifest::manifest_file_name(participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_beat_config() {
        let mut cfg = AppConfig::default();
        cfg.recorder.export_dir = Some("/cfg/exports".into());
        cfg.recorder.backup_dir = Some("/cfg/backups".into());
        let ctx = AppContext::new(cfg);

        let s = ctx.recorder_settings(RecordOverrides {
            participant_id: Some("P07".into()),
            export_dir: Some(PathBuf::from("/cli/exports")),
            backup_dir: None,
        });
        assert_eq!(s.export_dir, PathBuf::from("/cli/exports"));
        assert_eq!(s.backup_dir, PathBuf::from("/cfg/backups"));
        assert_eq!(s.participant_id.as_deref(), Some("P07"));
    }

    #[test]
    fn blank_backup_dir_uses_temp() {
        let mut cfg = AppConfig::default();
        cfg.recorder.backup_dir = Some("  ".into());
        let s = AppContext::new(cfg).recorder_settings(RecordOverrides::default());
        assert_eq!(s.backup_dir, BackupStore::default_dir());
    }

    #[test]
    fn manifest_path_uses_configured_dir() {
        let mut cfg = AppConfig::default();
        cfg.manifest.output_dir = Some("/data/manifests".into());
        let ctx = AppContext::new(cfg);
        assert_eq!(
            ctx.manifest_output_path(None, "P07"),
            PathBuf::from("/data/manifests/participant_P07.json")
        );
        assert_eq!(
            ctx.manifest_output_path(Some(Path::new("out.json")), "P07"),
            PathBuf::from("out.json")
        );
    }
}
