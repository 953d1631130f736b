//! Stable re-exports for consumers (`cli` and tests).
//!
//! Prefer importing from `stopwatcher_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, LauncherConfig, LoggingConfig, ManifestConfig, RecorderConfig,
};
pub use crate::context::{AppContext, RecordOverrides};
pub use crate::error::{CliError, ManifestError, RecorderError, TransitionError};
pub use crate::manifest::{
    fallback_path, save_json, AudioMode, Manifest, ManifestDraft, Prompter, Questionnaire,
};
pub use crate::persist::{BackupSnapshot, BackupStore, PlatformInfo, CSV_COLUMNS};
pub use crate::session::{
    Dialog, DialogKind, EndReport, ExportOutcome, KeyInput, Mark, Recorder, RecorderEvent,
    RecorderSettings, Session, SessionStatus, StateTransition,
};
pub use crate::util::paths::current_dir;
