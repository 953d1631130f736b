//! 单槽对话框和行编辑

use super::input::KeyInput;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    ParticipantId,
    Annotation,
}

/// 当前打开的对话框
#[derive(Debug, Clone)]
pub enum Dialog {
    /// 第一次打点前询问参与者 ID；`pending_at` 是按键时刻
    ParticipantId {
        input: LineInput,
        pending_at: DateTime<Local>,
    },
    /// 给刚追加的打点写注释
    Annotation { sequence_id: u32, input: LineInput },
}

impl Dialog {
    pub fn input(&self) -> &LineInput {
        match self {
            Dialog::ParticipantId { input, .. } | Dialog::Annotation { input, .. } => input,
        }
    }

    pub(crate) fn input_mut(&mut self) -> &mut LineInput {
        match self {
            Dialog::ParticipantId { input, .. } | Dialog::Annotation { input, .. } => input,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Dialog::ParticipantId { .. } => "Participant ID".to_string(),
            Dialog::Annotation { sequence_id, .. } => format!("Notes for mark #{sequence_id}"),
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Dialog::ParticipantId { .. } => "Enter participant ID number:",
            Dialog::Annotation { .. } => "Add notes for this timestamp (optional):",
        }
    }
}

/// 对话框按键的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    None,
    Submit(String),
    Cancel,
}

/// 单行输入缓冲；光标是字节偏移，始终落在字符边界上
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    buffer: String,
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// 光标前的字符数，用于终端列定位
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    pub fn handle_key(&mut self, key: KeyInput) -> LineAction {
        match key {
            KeyInput::Enter => LineAction::Submit(self.buffer.trim().to_string()),
            KeyInput::Esc => LineAction::Cancel,
            KeyInput::Backspace => {
                self.backspace();
                LineAction::None
            }
            KeyInput::Left => {
                self.move_left();
                LineAction::None
            }
            KeyInput::Right => {
                self.move_right();
                LineAction::None
            }
            KeyInput::Home => {
                self.cursor = 0;
                LineAction::None
            }
            KeyInput::End => {
                self.cursor = self.buffer.len();
                LineAction::None
            }
            KeyInput::Char(ch) => {
                self.insert_char(ch);
                LineAction::None
            }
            KeyInput::Interrupt | KeyInput::Other => LineAction::None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(&self.buffer, self.cursor);
        self.buffer.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    fn move_left(&mut self) {
        self.cursor = prev_char_boundary(&self.buffer, self.cursor);
    }

    fn move_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}
