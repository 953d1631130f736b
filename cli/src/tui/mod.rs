mod app;
mod events;
#[cfg(feature = "global-keys")]
mod global;
mod terminal;
mod ui;

use std::time::{Duration, Instant};

use chrono::Local;
use ratatui::backend::Backend;
use ratatui::Terminal;
use stopwatcher_core::api::{EndReport, Recorder, RecorderConfig, RecorderError, RecorderSettings};
use tokio::sync::mpsc;

pub use app::RecorderApp;
use events::InputEvent;
use terminal::{check_tui_support, restore_terminal, setup_terminal};

/// Runs one recording session on the alternate screen and returns its end report.
///
/// The session is always ended and exported before returning, even when drawing fails.
pub async fn run_recorder(
    settings: RecorderSettings,
    cfg: &RecorderConfig,
) -> Result<EndReport, RecorderError> {
    check_tui_support().map_err(RecorderError::Terminal)?;

    let mut app = RecorderApp::new(Recorder::new(settings), cfg);
    app.start(Local::now())?;

    let mut terminal = setup_terminal().map_err(RecorderError::Terminal)?;
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let input_reader = events::InputReader::start(input_tx.clone());
    start_global_capture(&mut app, cfg, input_tx);
    let result = run_on_terminal(&mut terminal, &mut app, input_rx, cfg.tick_interval_ms).await;
    input_reader.stop();
    restore_terminal(&mut terminal);

    match (app.finish(Local::now()), result) {
        (Some(report), Ok(())) => Ok(report),
        (Some(report), Err(e)) => {
            tracing::error!(error = %e, "display failed, session ended early");
            Ok(report)
        }
        (None, Err(e)) => Err(e),
        (None, Ok(())) => Err(RecorderError::NotRecording),
    }
}

#[cfg(feature = "global-keys")]
fn start_global_capture(
    app: &mut RecorderApp,
    cfg: &RecorderConfig,
    tx: mpsc::UnboundedSender<InputEvent>,
) {
    if cfg.global_keys {
        tracing::info!("system-wide key capture enabled");
        app.enable_global_capture();
        global::spawn(tx);
    }
}

#[cfg(not(feature = "global-keys"))]
fn start_global_capture(
    _app: &mut RecorderApp,
    cfg: &RecorderConfig,
    _tx: mpsc::UnboundedSender<InputEvent>,
) {
    if cfg.global_keys {
        tracing::warn!("built without the global-keys feature, keys are read from this terminal only");
    }
}

pub async fn run_on_terminal<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut RecorderApp,
    mut input_rx: mpsc::UnboundedReceiver<InputEvent>,
    tick_interval_ms: u64,
) -> Result<(), RecorderError> {
    let mut tick = tokio::time::interval(Duration::from_millis(tick_interval_ms.max(16)));

    loop {
        tokio::select! {
            maybe_event = input_rx.recv() => match maybe_event {
                Some(event) => app.handle_input(event, Local::now(), Instant::now()),
                None => {
                    tracing::warn!("input reader closed, ending session");
                    app.finish(Local::now());
                }
            },
            _ = tick.tick() => {}
        }

        app.expire_notice(Instant::now());
        terminal
            .draw(|f| ui::draw(f, app, Local::now()))
            .map_err(|e| RecorderError::Terminal(e.to_string()))?;

        if app.is_done() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use stopwatcher_core::api::{ExportOutcome, KeyInput, PlatformInfo};

    fn test_app(dir: &std::path::Path, participant: Option<&str>) -> RecorderApp {
        let settings = RecorderSettings {
            export_dir: dir.join("exports"),
            backup_dir: dir.join("backups"),
            participant_id: participant.map(str::to_string),
        };
        let platform = PlatformInfo {
            os_name: "Linux".into(),
            os_version: "24.04".into(),
            kernel_version: "6.8.0".into(),
            host_name: "lab".into(),
            arch: "x86_64".into(),
            toolkit_version: "test".into(),
        };
        let mut app = RecorderApp::new(
            Recorder::with_platform(settings, platform),
            &RecorderConfig::default(),
        );
        app.start(Local::now()).unwrap();
        app
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Terminal(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn keys_drive_session_to_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), None);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        for k in [
            key(KeyCode::Char('e')),
            key(KeyCode::Char('P')),
            key(KeyCode::Char('9')),
            key(KeyCode::Enter),
            key(KeyCode::Char('o')),
            key(KeyCode::Char('k')),
            key(KeyCode::Enter),
            key(KeyCode::Char('r')),
        ] {
            tx.send(k).unwrap();
        }

        run_on_terminal(&mut terminal, &mut app, rx, 1_000)
            .await
            .unwrap();

        let report = app.finish(Local::now()).unwrap();
        assert_eq!(report.participant_id.as_deref(), Some("P9"));
        assert_eq!(report.mark_count, 1);
        let ExportOutcome::Written(path) = report.export else {
            panic!("expected export, got {:?}", report.export);
        };
        let csv = std::fs::read_to_string(path).unwrap();
        assert!(csv.trim_end().ends_with(",ok"));

        let screen = screen_text(&terminal);
        assert!(screen.contains("ENDED"));
        assert!(screen.contains("Marks:       1"));
    }

    #[tokio::test]
    async fn closed_input_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Some("P01"));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (tx, rx) = mpsc::unbounded_channel::<InputEvent>();
        drop(tx);

        run_on_terminal(&mut terminal, &mut app, rx, 1_000)
            .await
            .unwrap();
        assert!(app.is_done());
        assert_eq!(
            app.finish(Local::now()).unwrap().export,
            ExportOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn global_marks_while_terminal_unfocused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Some("P02"));
        app.enable_global_capture();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        // Esc closes each note dialog from the terminal; the rest comes from another window
        for event in [
            InputEvent::Global(KeyInput::Char('e')),
            key(KeyCode::Esc),
            InputEvent::Global(KeyInput::Enter),
            key(KeyCode::Esc),
            InputEvent::Global(KeyInput::Char('r')),
        ] {
            tx.send(event).unwrap();
        }

        run_on_terminal(&mut terminal, &mut app, rx, 1_000)
            .await
            .unwrap();
        let report = app.finish(Local::now()).unwrap();
        assert_eq!(report.mark_count, 2);
        assert!(matches!(report.export, ExportOutcome::Written(_)));
    }

    #[test]
    fn dialog_is_drawn_over_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Some("P01"));
        app.handle_key(KeyInput::Enter, Local::now());

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| ui::draw(f, &app, Local::now()))
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("Add notes for this timestamp (optional):"));
        assert!(screen.contains("Notes for mark #1"));
        assert!(screen.contains("Esc: skip"));
    }
}
