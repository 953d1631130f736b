//! 按键分类

/// 终端无关的按键表示，由 cli 层从 crossterm 事件转换而来
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Enter,
    Esc,
    Backspace,
    Left,
    Right,
    Home,
    End,
    Char(char),
    /// Ctrl+C：外部关闭请求
    Interrupt,
    Other,
}

/// 按键意图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Mark,
    End,
    Ignore,
}

/// 把按键分类为意图
///
/// `r` 只在没有对话框时才结束会话；Ctrl+C 总是结束。
pub fn classify(key: KeyInput, dialog_open: bool) -> Intent {
    match key {
        KeyInput::Enter | KeyInput::Char('e') => Intent::Mark,
        KeyInput::Char('r') if !dialog_open => Intent::End,
        KeyInput::Interrupt => Intent::End,
        _ => Intent::Ignore,
    }
}
