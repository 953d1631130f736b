//! System-wide capture of the mark and end keys.
//!
//! Only `Enter`, `e` and `r` leave this module. Dialog text and Ctrl+C still
//! come from the terminal reader.

use rdev::{EventType, Key};
use stopwatcher_core::api::KeyInput;
use tokio::sync::mpsc;

use super::events::InputEvent;

/// Starts the OS-level listener on its own thread.
///
/// `rdev::listen` blocks for the life of the process and cannot be cancelled.
/// After the receiver is dropped the callback's sends fail and are ignored.
pub fn spawn(tx: mpsc::UnboundedSender<InputEvent>) {
    let failures = tx.clone();
    let spawned = std::thread::Builder::new()
        .name("global-keys".to_string())
        .spawn(move || {
            let keys = tx.clone();
            let result = rdev::listen(move |event| {
                if let Some(key) = trigger_key(&event.event_type, event.name.as_deref()) {
                    tracing::trace!(?key, "global key");
                    let _ = keys.send(InputEvent::Global(key));
                }
            });
            if let Err(e) = result {
                tracing::warn!(error = ?e, "system-wide key capture failed");
                let _ = tx.send(InputEvent::GlobalUnavailable(format!("{e:?}")));
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not start global key thread");
        let _ = failures.send(InputEvent::GlobalUnavailable(e.to_string()));
    }
}

/// `name` is the character the key produced, when the platform reports one.
pub fn trigger_key(event: &EventType, name: Option<&str>) -> Option<KeyInput> {
    let EventType::KeyPress(key) = event else {
        return None;
    };
    match (key, name) {
        (Key::Return | Key::KpReturn, _) => Some(KeyInput::Enter),
        (_, Some("e")) => Some(KeyInput::Char('e')),
        (_, Some("r")) => Some(KeyInput::Char('r')),
        (Key::KeyE, None) => Some(KeyInput::Char('e')),
        (Key::KeyR, None) => Some(KeyInput::Char('r')),
        _ => None,
    }
}
