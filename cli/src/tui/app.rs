use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use stopwatcher_core::api::{
    EndReport, KeyInput, Recorder, RecorderConfig, RecorderError, RecorderEvent,
};

use super::events::{to_key_input, InputEvent};

/// A press seen by both capture paths arrives twice within this window.
const ECHO_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    Terminal,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub until: Instant,
}

/// UI-side state around the recorder: the transient notice line and the
/// merge of terminal and system-wide key presses.
pub struct RecorderApp {
    pub recorder: Recorder,
    pub notice: Option<Notice>,
    show_confirmations: bool,
    notice_duration: Duration,
    global_capture: bool,
    last_key: Option<(KeySource, KeyInput, Instant)>,
}

impl RecorderApp {
    pub fn new(recorder: Recorder, cfg: &RecorderConfig) -> Self {
        Self {
            recorder,
            notice: None,
            show_confirmations: cfg.show_confirmations,
            notice_duration: Duration::from_millis(cfg.notice_duration_ms),
            global_capture: false,
            last_key: None,
        }
    }

    /// Marks the system-wide listener as running; its keys are accepted from now on.
    pub fn enable_global_capture(&mut self) {
        self.global_capture = true;
    }

    pub fn global_capture(&self) -> bool {
        self.global_capture
    }

    /// Routes one event from the merged input channel.
    ///
    /// Global keys are dropped while a dialog is open; the dialog reads the
    /// terminal. A key handled from one source is not handled again when the
    /// other source reports the same key within `ECHO_WINDOW`.
    pub fn handle_input(&mut self, event: InputEvent, now: DateTime<Local>, at: Instant) {
        let (source, key) = match event {
            InputEvent::Terminal(key) => (KeySource::Terminal, to_key_input(&key)),
            InputEvent::Global(key) => {
                if !self.global_capture || self.recorder.dialog_open() {
                    return;
                }
                (KeySource::Global, key)
            }
            InputEvent::GlobalUnavailable(reason) => {
                self.global_capture = false;
                self.push_notice(
                    format!(
                        "System-wide keys unavailable ({reason}); keys work while this window has focus."
                    ),
                    NoticeLevel::Warn,
                );
                return;
            }
        };

        if let Some((prev_source, prev_key, prev_at)) = self.last_key {
            if prev_source != source
                && prev_key == key
                && at.saturating_duration_since(prev_at) <= ECHO_WINDOW
            {
                self.last_key = None;
                return;
            }
        }
        self.last_key = Some((source, key, at));
        self.handle_key(key, now);
    }

    pub fn start(&mut self, now: DateTime<Local>) -> Result<(), RecorderError> {
        self.recorder.start(now)?;
        self.push_notice(
            "Recording started. Enter or 'e' records a timestamp, 'r' ends the session.",
            NoticeLevel::Info,
        );
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyInput, now: DateTime<Local>) {
        for event in self.recorder.handle_key(key, now) {
            self.apply_event(event);
        }
    }

    /// Ends the session if it is still running and returns the report.
    pub fn finish(&mut self, now: DateTime<Local>) -> Option<EndReport> {
        self.recorder
            .end(now)
            .or_else(|| self.recorder.report().cloned())
    }

    pub fn is_done(&self) -> bool {
        self.recorder.report().is_some()
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.until <= now) {
            self.notice = None;
        }
    }

    fn apply_event(&mut self, event: RecorderEvent) {
        match event {
            RecorderEvent::ParticipantAssigned(id) => {
                self.push_notice(format!("Participant ID set: {id}"), NoticeLevel::Info);
            }
            RecorderEvent::ParticipantMissing => {
                self.push_notice(
                    "Participant ID is required to start recording.",
                    NoticeLevel::Warn,
                );
            }
            RecorderEvent::MarkRecorded {
                sequence_id,
                time_of_day,
            } => {
                tracing::info!(sequence_id, %time_of_day, "mark recorded");
                if self.show_confirmations {
                    self.push_notice(
                        format!("Timestamp #{sequence_id} recorded at {time_of_day}"),
                        NoticeLevel::Info,
                    );
                }
            }
            RecorderEvent::BackupFailed(e) => {
                self.push_notice(format!("Auto-backup failed: {e}"), NoticeLevel::Warn);
            }
            RecorderEvent::Failed(e) => {
                tracing::error!(error = %e, "key handling failed");
                self.push_notice(format!("Error: {e}"), NoticeLevel::Error);
            }
            RecorderEvent::DialogOpened(_)
            | RecorderEvent::BackupWritten(_)
            | RecorderEvent::Ended(_) => {}
        }
    }

    fn push_notice(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notice = Some(Notice {
            text: text.into(),
            level,
            until: Instant::now() + self.notice_duration,
        });
    }
}
