//! Session files on disk: the rolling auto-backup and the final CSV export.

pub mod backup;
pub mod export;
pub mod platform;

pub use backup::{BackupSnapshot, BackupStore};
pub use export::{export_file_name, render_csv, write_export, CSV_COLUMNS};
pub use platform::PlatformInfo;
