use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stopwatcher_core::api::KeyInput;
use tokio::sync::mpsc;

/// One key press from either capture path, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Controlling terminal: dialog text, Ctrl+C and, without global capture, every key.
    Terminal(KeyEvent),
    /// System-wide listener: only the mark and end keys.
    Global(KeyInput),
    /// The system-wide listener stopped or never started.
    GlobalUnavailable(String),
}

/// Reads terminal key presses on a dedicated thread and forwards them to the UI loop.
pub struct InputReader {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl InputReader {
    pub fn start(tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let handle = std::thread::spawn(move || {
            while thread_running.load(Ordering::SeqCst) {
                if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
                    continue;
                }
                match event::read() {
                    // Only Press: Windows also reports Release and Repeat for every key
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tracing::trace!("Key pressed: {:?}", key);
                        if tx.send(InputEvent::Terminal(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal read failed");
                    }
                }
            }
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn to_key_input(key: &KeyEvent) -> KeyInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyInput::Interrupt,
            _ => KeyInput::Other,
        };
    }
    match key.code {
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Esc => KeyInput::Esc,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        KeyCode::Char(ch) => KeyInput::Char(ch),
        _ => KeyInput::Other,
    }
}
