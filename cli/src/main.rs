use clap::Parser;
use stopwatcher_cli::commands::{cli, launcher, manifest, record, web};
use stopwatcher_core::api::{AppContext, CliError, LoggingConfig, ManifestError, RecorderError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = stopwatcher_core::api::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), command = ?args.command, "start");

    let ctx = AppContext::new(cfg);
    dispatch(args.command.unwrap_or(cli::Commands::Launch), &ctx).await
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: terminal / IO error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Recorder(re) => match re {
            RecorderError::Terminal(_) => 20,
            _ => 50,
        },
        CliError::Manifest(me) => match me {
            ManifestError::Io(_) | ManifestError::Save(_) => 20,
            ManifestError::Interrupted => 0,
        },
        CliError::Io(_) => 20,
        CliError::Command(_) => 20,
    }
}

async fn dispatch(cmd: cli::Commands, ctx: &AppContext) -> Result<i32, CliError> {
    match cmd {
        cli::Commands::Launch => launcher::run(ctx).await,
        cli::Commands::Manifest(args) => manifest::run(args, ctx).await,
        cli::Commands::Record(args) => record::run(args, ctx).await,
        cli::Commands::Web(args) => web::run(args, ctx).await,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("stopwatcher"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("stopwatcher.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
