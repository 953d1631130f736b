use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default stopwatcher data directory: ~/.stopwatcher
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".stopwatcher"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.stopwatcher/config.toml (highest)
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        let logs_dir = data_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());

    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)?;
    Ok(cfg)
}

pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("STOPWATCHER_EXPORT_DIR") {
        cfg.recorder.export_dir = Some(v);
    }
    if let Some(v) = non_empty("STOPWATCHER_BACKUP_DIR") {
        cfg.recorder.backup_dir = Some(v);
    }
    if let Some(v) = non_empty("STOPWATCHER_LOG_LEVEL") {
        cfg.logging.level = v;
    }
}
