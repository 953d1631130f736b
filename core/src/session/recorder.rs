//! 录制协调器：按键 → 会话状态 → 对话框 → 自动备份 → 导出
//!
//! `Recorder` 运行在 UI 线程上，独占会话和对话框槽位。每次调用返回一组
//! `RecorderEvent`，由界面层转成提示信息；这里不直接做任何渲染。

use std::path::PathBuf;

use chrono::{DateTime, Local};

use super::dialog::{Dialog, DialogKind, LineAction, LineInput};
use super::input::{classify, Intent, KeyInput};
use super::session::Session;
use crate::error::RecorderError;
use crate::persist::{write_export, BackupStore, PlatformInfo};

/// 协调器配置
#[derive(Debug, Clone)]
pub struct RecorderSettings {
    pub export_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// 预先给定的参与者 ID；为空时第一次打点会弹出对话框
    pub participant_id: Option<String>,
}

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// 没有打点或没有参与者 ID，不算错误
    Skipped,
    Failed {
        error: String,
        backup: Option<PathBuf>,
    },
}

/// 会话结束报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndReport {
    pub participant_id: Option<String>,
    pub mark_count: usize,
    pub export: ExportOutcome,
    /// 关闭时最后一次自动备份失败；此时备份文件缺少最后一个打点
    pub backup_error: Option<String>,
}

/// 协调器对外事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    DialogOpened(DialogKind),
    ParticipantAssigned(String),
    /// 参与者 ID 为空或被取消，本次打点作废
    ParticipantMissing,
    MarkRecorded {
        sequence_id: u32,
        time_of_day: String,
    },
    BackupWritten(PathBuf),
    BackupFailed(String),
    /// 处理按键时的内部错误，不中断监听
    Failed(String),
    Ended(EndReport),
}

pub struct Recorder {
    session: Session,
    dialog: Option<Dialog>,
    preset_participant: Option<String>,
    backups: BackupStore,
    export_dir: PathBuf,
    platform: PlatformInfo,
    last_backup: Option<PathBuf>,
    report: Option<EndReport>,
}

impl Recorder {
    pub fn new(settings: RecorderSettings) -> Self {
        Self::with_platform(settings, PlatformInfo::detect())
    }

    pub fn with_platform(settings: RecorderSettings, platform: PlatformInfo) -> Self {
        Self {
            session: Session::new(),
            dialog: None,
            preset_participant: settings
                .participant_id
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            backups: BackupStore::new(settings.backup_dir),
            export_dir: settings.export_dir,
            platform,
            last_backup: None,
            report: None,
        }
    }

    /// 开始录制
    pub fn start(&mut self, now: DateTime<Local>) -> Result<(), RecorderError> {
        self.dialog = None;
        self.last_backup = None;
        self.session.start(now)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn last_backup(&self) -> Option<&PathBuf> {
        self.last_backup.as_ref()
    }

    /// 结束后的报告；未结束时为 None
    pub fn report(&self) -> Option<&EndReport> {
        self.report.as_ref()
    }

    /// 处理一个按键
    pub fn handle_key(&mut self, key: KeyInput, now: DateTime<Local>) -> Vec<RecorderEvent> {
        if !self.session.is_recording() {
            return Vec::new();
        }

        let dialog_open = self.dialog.is_some();
        match (classify(key, dialog_open), dialog_open) {
            (Intent::End, _) => self
                .end(now)
                .map(|report| vec![RecorderEvent::Ended(report)])
                .unwrap_or_default(),
            // 对话框打开时，其余按键都是对话框的输入
            (_, true) => self.handle_dialog_key(key, now),
            (Intent::Mark, false) => self.begin_mark(now),
            (Intent::Ignore, false) => Vec::new(),
        }
    }

    /// 结束会话并尝试导出（只执行一次）
    pub fn end(&mut self, now: DateTime<Local>) -> Option<EndReport> {
        if !self.session.end() {
            return None;
        }

        // 关闭时还开着的对话框：参与者对话框作废本次打点，注释对话框保留已输入内容
        let mut backup_error = None;
        if let Some(Dialog::Annotation { input, .. }) = self.dialog.take() {
            let text = input.text().trim().to_string();
            if self.session.annotate_last(text).is_ok() {
                if let Some(RecorderEvent::BackupFailed(e)) = self.write_backup(now) {
                    backup_error = Some(e);
                }
            }
        }

        let export = if !self.session.has_exportable_data() {
            tracing::info!(session_id = %self.session.session_id, "no data to export");
            ExportOutcome::Skipped
        } else {
            match write_export(&self.export_dir, &self.session, &self.platform, now) {
                Ok(path) => ExportOutcome::Written(path),
                Err(e) => {
                    tracing::error!(error = %format!("{e:#}"), "export failed");
                    ExportOutcome::Failed {
                        error: format!("{e:#}"),
                        backup: self.last_backup.clone(),
                    }
                }
            }
        };

        let report = EndReport {
            participant_id: self.session.participant_id().map(str::to_string),
            mark_count: self.session.marks().len(),
            export,
            backup_error,
        };
        self.report = Some(report.clone());
        Some(report)
    }

    fn begin_mark(&mut self, now: DateTime<Local>) -> Vec<RecorderEvent> {
        let mut events = Vec::new();
        if self.session.participant_id().is_none() {
            match self.preset_participant.clone() {
                Some(participant_id) => {
                    if let Err(e) = self.session.assign_participant(participant_id.clone(), now) {
                        return vec![RecorderEvent::Failed(e.to_string())];
                    }
                    events.push(RecorderEvent::ParticipantAssigned(participant_id));
                }
                None => {
                    self.dialog = Some(Dialog::ParticipantId {
                        input: LineInput::new(),
                        pending_at: now,
                    });
                    return vec![RecorderEvent::DialogOpened(DialogKind::ParticipantId)];
                }
            }
        }
        self.append_and_prompt(now, &mut events);
        events
    }

    fn append_and_prompt(&mut self, at: DateTime<Local>, events: &mut Vec<RecorderEvent>) {
        match self.session.append_mark(at) {
            Ok(sequence_id) => {
                self.dialog = Some(Dialog::Annotation {
                    sequence_id,
                    input: LineInput::new(),
                });
                events.push(RecorderEvent::DialogOpened(DialogKind::Annotation));
            }
            Err(e) => events.push(RecorderEvent::Failed(e.to_string())),
        }
    }

    fn handle_dialog_key(&mut self, key: KeyInput, now: DateTime<Local>) -> Vec<RecorderEvent> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Vec::new();
        };
        let action = dialog.input_mut().handle_key(key);
        match action {
            LineAction::None => Vec::new(),
            LineAction::Submit(text) => self.resolve_dialog(Some(text), now),
            LineAction::Cancel => self.resolve_dialog(None, now),
        }
    }

    fn resolve_dialog(&mut self, answer: Option<String>, now: DateTime<Local>) -> Vec<RecorderEvent> {
        let Some(dialog) = self.dialog.take() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        match dialog {
            Dialog::ParticipantId { pending_at, .. } => {
                let Some(participant_id) = answer.filter(|s| !s.is_empty()) else {
                    tracing::warn!("participant id not provided, mark discarded");
                    return vec![RecorderEvent::ParticipantMissing];
                };
                if let Err(e) = self
                    .session
                    .assign_participant(participant_id.clone(), pending_at)
                {
                    return vec![RecorderEvent::Failed(e.to_string())];
                }
                events.push(RecorderEvent::ParticipantAssigned(participant_id));
                self.append_and_prompt(pending_at, &mut events);
            }
            Dialog::Annotation { .. } => {
                match self.session.annotate_last(answer.unwrap_or_default()) {
                    Ok(mark) => events.push(RecorderEvent::MarkRecorded {
                        sequence_id: mark.sequence_id,
                        time_of_day: mark.time_of_day(),
                    }),
                    Err(e) => return vec![RecorderEvent::Failed(e.to_string())],
                }
                events.extend(self.write_backup(now));
            }
        }
        events
    }

    fn write_backup(&mut self, now: DateTime<Local>) -> Option<RecorderEvent> {
        match self.backups.write(&self.session, now) {
            Ok(Some(path)) => {
                self.last_backup = Some(path.clone());
                Some(RecorderEvent::BackupWritten(path))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "auto-backup failed");
                Some(RecorderEvent::BackupFailed(format!("{e:#}")))
            }
        }
    }
}
