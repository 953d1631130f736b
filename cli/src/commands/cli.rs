use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "stopwatcher",
    version,
    about = "Session manifests and keyboard-driven timestamp recording"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the interactive menu (same as running without a subcommand).
    Launch,
    /// Fill in the pre-session questionnaire and write a JSON manifest.
    Manifest(ManifestArgs),
    /// Record timestamped marks from the keyboard and export them as CSV.
    Record(RecordArgs),
    /// Open the local web page in the default browser.
    Web(WebArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// Manifest file path. Defaults to participant_<id>.json in the Downloads folder.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Participant ID. If omitted, it is asked for on the first mark.
    #[arg(long, short)]
    pub participant: Option<String>,

    /// Directory for the final CSV export.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for the auto-backup file.
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct WebArgs {
    /// Page to open. Defaults to `launcher.web_page` from config.
    #[arg(long)]
    pub page: Option<PathBuf>,
}
