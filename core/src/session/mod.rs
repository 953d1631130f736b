//! # 会话状态模块
//!
//! 记录一次录制会话：按键分类、打点（Mark）序列、注释对话框和持久化触发。
//!
//! ## 设计原则
//!
//! 1. **单一所有者**：`Recorder` 独占 `Session`，输入线程只转发按键
//! 2. **单向状态**：`Idle → Recording → Ended`，不可回退
//! 3. **单槽对话框**：同一时间最多一个对话框，打开时按键全部交给对话框
//! 4. **故障恢复**：每个打点定稿后写一次自动备份

pub mod dialog;
pub mod input;
pub mod recorder;
pub mod session;
pub mod transitions;
pub mod types;

pub use dialog::{Dialog, DialogKind, LineInput};
pub use input::{classify, Intent, KeyInput};
pub use recorder::{EndReport, ExportOutcome, Recorder, RecorderEvent, RecorderSettings};
pub use session::Session;
pub use transitions::{StateTransition, TransitionError};
pub use types::{Mark, SessionStatus};
