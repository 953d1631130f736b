//! 会话数据类型

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// 尚未开始
    Idle,
    /// 录制中，接受打点
    Recording,
    /// 已结束（终态）
    Ended,
}

/// 一次打点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    /// 从 1 开始的序号
    pub sequence_id: u32,
    /// 按键时刻（本地时间，毫秒精度）
    pub wall_clock_time: DateTime<Local>,
    /// 注释，可为空
    pub annotation: String,
    /// 注释尚未写入；从备份恢复的打点视为已定稿
    #[serde(skip)]
    pub(crate) pending: bool,
}

impl Mark {
    pub(crate) fn new(sequence_id: u32, at: DateTime<Local>) -> Self {
        Self {
            sequence_id,
            wall_clock_time: truncate_to_millis(at),
            annotation: String::new(),
            pending: true,
        }
    }

    /// 注释是否还在等待对话框
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn date(&self) -> String {
        self.wall_clock_time.format("%Y-%m-%d").to_string()
    }

    pub fn hour(&self) -> u32 {
        self.wall_clock_time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.wall_clock_time.minute()
    }

    pub fn second(&self) -> u32 {
        self.wall_clock_time.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.wall_clock_time.nanosecond() / 1_000_000 % 1_000
    }

    pub fn iso_timestamp(&self) -> String {
        self.wall_clock_time
            .format("%Y-%m-%dT%H:%M:%S%.3f")
            .to_string()
    }

    /// `HH:MM:SS.mmm`，用于状态栏
    pub fn time_of_day(&self) -> String {
        self.wall_clock_time.format("%H:%M:%S%.3f").to_string()
    }
}

fn truncate_to_millis(at: DateTime<Local>) -> DateTime<Local> {
    let nanos = at.nanosecond();
    at.with_nanosecond(nanos - nanos % 1_000_000).unwrap_or(at)
}
