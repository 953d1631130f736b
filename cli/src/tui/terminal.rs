use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::ui::{MIN_HEIGHT, MIN_WIDTH};

pub type RecorderTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Fails early, before raw mode, when the recorder screen cannot be shown.
pub fn check_tui_support() -> Result<(), String> {
    if !atty::is(atty::Stream::Stdout) {
        return Err("stdout is not a terminal".to_string());
    }
    if !cfg!(windows) && std::env::var("TERM").is_err() {
        return Err("TERM environment variable not set".to_string());
    }
    let (width, height) = terminal::size().map_err(|e| format!("terminal size failed: {e}"))?;
    check_size(width, height)
}

fn check_size(width: u16, height: u16) -> Result<(), String> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(format!(
            "terminal too small ({width}x{height}), the recorder needs at least {MIN_WIDTH}x{MIN_HEIGHT}"
        ));
    }
    Ok(())
}

pub fn setup_terminal() -> Result<RecorderTerminal, String> {
    enable_raw_mode().map_err(|e| format!("raw mode: {e}"))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(format!("alternate screen: {e}"));
    }
    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| e.to_string())
}

/// Best effort; the session report is printed on the normal screen afterwards.
pub fn restore_terminal(terminal: &mut RecorderTerminal) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}
