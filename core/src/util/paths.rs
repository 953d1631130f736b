use std::path::{Path, PathBuf};

/// The user's Downloads folder, falling back to the current directory.
pub fn downloads_dir() -> PathBuf {
    if let Some(dir) = dirs::download_dir().filter(|d| d.exists()) {
        return dir;
    }
    if let Some(dir) = dirs::home_dir()
        .map(|h| h.join("Downloads"))
        .filter(|d| d.exists())
    {
        return dir;
    }
    tracing::warn!("Downloads folder not found, using current directory");
    current_dir()
}

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// First non-blank candidate wins; otherwise the Downloads folder.
pub fn resolve_output_dir(explicit: Option<&Path>, configured: Option<&str>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => downloads_dir(),
    }
}

/// Keeps `[A-Za-z0-9._-]`, replaces everything else with `_`.
pub fn sanitize_file_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
