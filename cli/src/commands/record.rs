use stopwatcher_core::api::{AppContext, CliError, EndReport, ExportOutcome, RecordOverrides};

use super::cli::RecordArgs;
use crate::tui;

pub async fn run(args: RecordArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let settings = ctx.recorder_settings(RecordOverrides {
        participant_id: args.participant,
        export_dir: args.output_dir,
        backup_dir: args.backup_dir,
    });
    tracing::info!(
        export_dir = %settings.export_dir.display(),
        backup_dir = %settings.backup_dir.display(),
        "recorder starting"
    );

    println!("Session Recorder");
    println!("================");
    println!("Press Enter or 'e' to record a timestamp, 'r' to end the session and save.");

    let report = tui::run_recorder(settings, &ctx.cfg().recorder).await?;
    Ok(print_report(&report))
}

/// Prints the end-of-session summary and returns the exit code.
fn print_report(report: &EndReport) -> i32 {
    if let Some(error) = &report.backup_error {
        eprintln!("Final auto-backup failed, the backup file misses the last mark: {error}");
    }
    match &report.export {
        ExportOutcome::Written(path) => {
            println!(
                "Session for Participant {} ended. {} timestamp(s) saved to {}",
                report.participant_id.as_deref().unwrap_or("-"),
                report.mark_count,
                path.display()
            );
            0
        }
        ExportOutcome::Skipped => {
            println!("Session ended. No data to save.");
            0
        }
        ExportOutcome::Failed { error, backup } => {
            eprintln!("Failed to export data: {error}");
            match backup {
                Some(path) => eprintln!("Your marks are in the backup file {}", path.display()),
                None => eprintln!("No backup file was written."),
            }
            20
        }
    }
}
