use std::path::{Path, PathBuf};

use stopwatcher_core::api::{current_dir, AppContext, CliError};
use tokio::process::Command;

use super::cli::WebArgs;

pub async fn run(args: WebArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let page = resolve_page(args.page.as_deref(), &ctx.cfg().launcher.web_page, &current_dir());
    open_page(&page).await?;
    Ok(0)
}

/// Relative pages are resolved against `base`.
pub fn resolve_page(explicit: Option<&Path>, configured: &str, base: &Path) -> PathBuf {
    let page = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(configured));
    if page.is_absolute() {
        page
    } else {
        base.join(page)
    }
}

pub async fn open_page(page: &Path) -> Result<(), CliError> {
    if !page.exists() {
        return Err(CliError::Command(format!(
            "web page not found: {}",
            page.display()
        )));
    }
    let (program, args) = opener_command(page);
    tracing::info!(page = %page.display(), program, "opening web page");

    let status = Command::new(program)
        .args(&args)
        .status()
        .await
        .map_err(|e| CliError::Command(format!("failed to launch {program}: {e}")))?;
    if !status.success() {
        return Err(CliError::Command(format!("{program} exited with {status}")));
    }
    println!("Opened {}", page.display());
    Ok(())
}

fn opener_command(page: &Path) -> (&'static str, Vec<String>) {
    let target = page.to_string_lossy().to_string();
    if cfg!(windows) {
        // `start` treats the first quoted argument as a window title
        ("cmd", vec!["/C".into(), "start".into(), String::new(), target])
    } else if cfg!(target_os = "macos") {
        ("open", vec![target])
    } else {
        ("xdg-open", vec![target])
    }
}
