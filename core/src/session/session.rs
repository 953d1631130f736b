//! 会话状态管理

use super::transitions::StateTransition;
use super::types::{Mark, SessionStatus};
use crate::error::RecorderError;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// 一次录制会话
///
/// 打点只追加；参与者 ID 在第一次打点时赋值，之后不可修改。
#[derive(Debug, Clone)]
pub struct Session {
    /// 会话唯一 ID（仅用于日志关联）
    pub session_id: String,
    participant_id: Option<String>,
    start_time: Option<DateTime<Local>>,
    start_date: Option<String>,
    marks: Vec<Mark>,
    status: SessionStatus,
}

impl Session {
    /// 创建空会话
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            participant_id: None,
            start_time: None,
            start_date: None,
            marks: Vec::new(),
            status: SessionStatus::Idle,
        }
    }

    /// `Idle → Recording`，清空计数
    pub fn start(&mut self, now: DateTime<Local>) -> Result<(), RecorderError> {
        StateTransition::validate(self.status, SessionStatus::Recording)?;
        self.marks.clear();
        self.participant_id = None;
        self.start_date = None;
        self.start_time = Some(now);
        self.status = SessionStatus::Recording;
        tracing::info!(session_id = %self.session_id, "recording started");
        Ok(())
    }

    /// 设置参与者 ID（只能一次）
    pub fn assign_participant(
        &mut self,
        participant_id: String,
        at: DateTime<Local>,
    ) -> Result<(), RecorderError> {
        if self.status != SessionStatus::Recording {
            return Err(RecorderError::NotRecording);
        }
        if let Some(existing) = &self.participant_id {
            return Err(RecorderError::ParticipantAlreadySet(existing.clone()));
        }
        tracing::info!(session_id = %self.session_id, participant_id = %participant_id, "participant assigned");
        self.start_date = Some(at.format("%Y-%m-%d").to_string());
        self.participant_id = Some(participant_id);
        Ok(())
    }

    /// 追加打点，返回序号
    pub fn append_mark(&mut self, at: DateTime<Local>) -> Result<u32, RecorderError> {
        if self.status != SessionStatus::Recording {
            return Err(RecorderError::NotRecording);
        }
        if self.participant_id.is_none() {
            return Err(RecorderError::MissingParticipant);
        }
        let sequence_id = self.marks.len() as u32 + 1;
        self.marks.push(Mark::new(sequence_id, at));
        tracing::debug!(session_id = %self.session_id, sequence_id, "mark appended");
        Ok(sequence_id)
    }

    /// 给最后一个打点写入注释
    pub fn annotate_last(&mut self, annotation: String) -> Result<&Mark, RecorderError> {
        let mark = self.marks.last_mut().ok_or(RecorderError::NoMark)?;
        if !mark.pending {
            return Err(RecorderError::AlreadyAnnotated(mark.sequence_id));
        }
        mark.annotation = annotation;
        mark.pending = false;
        Ok(mark)
    }

    /// 结束会话；已结束时返回 false 且不做任何事
    pub fn end(&mut self) -> bool {
        if StateTransition::validate(self.status, SessionStatus::Ended).is_err() {
            return false;
        }
        self.status = SessionStatus::Ended;
        tracing::info!(
            session_id = %self.session_id,
            marks = self.marks.len(),
            "recording ended"
        );
        true
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_recording(&self) -> bool {
        self.status == SessionStatus::Recording
    }

    pub fn participant_id(&self) -> Option<&str> {
        self.participant_id.as_deref()
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn last_mark(&self) -> Option<&Mark> {
        self.marks.last()
    }

    /// 录制时长（秒）
    pub fn elapsed_secs(&self, now: DateTime<Local>) -> u64 {
        self.start_time
            .map(|start| (now - start).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    /// 是否有可导出的数据
    pub fn has_exportable_data(&self) -> bool {
        self.participant_id.is_some() && !self.marks.is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
