use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub recorder: RecorderConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub launcher: LauncherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr. Off by default: the recorder draws on the
    /// alternate screen and the questionnaire shares the terminal with prompts.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "stopwatcher_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    false
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Where session CSV exports go. Unset means the user's Downloads folder.
    #[serde(default)]
    pub export_dir: Option<String>,

    /// Where auto-backups go. Unset means `<temp>/stopwatcher`.
    #[serde(default)]
    pub backup_dir: Option<String>,

    /// Status display refresh period.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Show a "Mark #n recorded" notice after each mark.
    #[serde(default = "default_show_confirmations")]
    pub show_confirmations: bool,

    /// How long a notice stays on the status line.
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,

    /// Also listen for the mark and end keys while another window has focus.
    /// Needs a binary built with the `global-keys` feature.
    #[serde(default = "default_global_keys")]
    pub global_keys: bool,
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_show_confirmations() -> bool {
    true
}

fn default_notice_duration_ms() -> u64 {
    4_000
}

fn default_global_keys() -> bool {
    true
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            backup_dir: None,
            tick_interval_ms: default_tick_interval_ms(),
            show_confirmations: default_show_confirmations(),
            notice_duration_ms: default_notice_duration_ms(),
            global_keys: default_global_keys(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Directory for `participant_<id>.json`. Unset means the Downloads folder.
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Local page opened by menu entry 1, relative to the working directory.
    #[serde(default = "default_web_page")]
    pub web_page: String,
}

fn default_web_page() -> String {
    "index.html".to_string()
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            web_page: default_web_page(),
        }
    }
}
