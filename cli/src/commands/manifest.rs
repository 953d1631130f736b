use std::sync::{Arc, Mutex};

use chrono::Local;
use stopwatcher_core::api::{
    current_dir, fallback_path, save_json, AppContext, CliError, ManifestDraft, ManifestError,
    Prompter, Questionnaire,
};

use super::cli::ManifestArgs;

pub async fn run(args: ManifestArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let questionnaire = Questionnaire::new();
    let draft = questionnaire.draft_handle();

    let task = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        let generated_at = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        questionnaire.run(&mut prompter, generated_at)
    });

    // The blocking reader stays parked on stdin after Ctrl+C; the process exits
    // right after this returns, which releases it.
    let outcome = tokio::select! {
        res = task => match res {
            Ok(inner) => inner,
            Err(e) => Err(ManifestError::Save(anyhow::anyhow!("questionnaire task failed: {e}"))),
        },
        _ = tokio::signal::ctrl_c() => Err(ManifestError::Interrupted),
    };

    match outcome {
        Ok(manifest) => {
            let path = ctx.manifest_output_path(args.output.as_deref(), &manifest.participant_id);
            if let Err(e) = save_json(&path, &manifest) {
                save_partial(&draft);
                return Err(ManifestError::Save(e).into());
            }
            println!("\nData successfully saved to {}", path.display());
            Ok(0)
        }
        Err(ManifestError::Interrupted) => {
            println!("\nProgram interrupted. Exiting.");
            save_partial(&draft);
            Ok(0)
        }
        Err(e) => {
            tracing::error!(error = %e, "questionnaire failed");
            eprintln!("\nAn unexpected error occurred: {e}");
            save_partial(&draft);
            Err(e.into())
        }
    }
}

/// Best effort: a failure here is printed, the command outcome stays the same.
fn save_partial(draft: &Arc<Mutex<ManifestDraft>>) {
    let snapshot = match draft.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    if snapshot.is_empty() {
        tracing::info!("no answers to save");
        return;
    }
    let path = fallback_path(&current_dir(), Local::now());
    match save_json(&path, &snapshot) {
        Ok(()) => println!("Partial data saved to {}", path.display()),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "partial save failed");
            eprintln!("Could not save partial data: {e:#}");
        }
    }
}
