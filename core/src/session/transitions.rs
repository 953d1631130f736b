//! 状态转换规则和验证

use super::types::SessionStatus;
use thiserror::Error;

/// 状态转换错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
    #[error("Cannot transition from terminal state {state:?}")]
    FromTerminalState { state: SessionStatus },
}

/// 状态转换
pub struct StateTransition;

impl StateTransition {
    /// 验证状态转换是否合法
    pub fn validate(from: SessionStatus, to: SessionStatus) -> Result<(), TransitionError> {
        // 终态不能转换
        if Self::is_terminal(from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        let is_valid = matches!(
            (from, to),
            (SessionStatus::Idle, SessionStatus::Recording)
                | (SessionStatus::Recording, SessionStatus::Ended)
                // 未开始就关闭：直接结束，不导出
                | (SessionStatus::Idle, SessionStatus::Ended)
        );

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    /// 判断是否为终态
    pub fn is_terminal(status: SessionStatus) -> bool {
        matches!(status, SessionStatus::Ended)
    }

    /// 状态栏标签
    pub fn label(status: SessionStatus) -> &'static str {
        match status {
            SessionStatus::Idle => "IDLE",
            SessionStatus::Recording => "RECORDING",
            SessionStatus::Ended => "ENDED",
        }
    }
}
