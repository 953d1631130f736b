use chrono::{DateTime, Local};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use stopwatcher_core::api::{Dialog, SessionStatus, StateTransition};

use super::app::{NoticeLevel, RecorderApp};

const POPUP_MIN_WIDTH: u16 = 30;
const POPUP_HEIGHT: u16 = 6;
/// Header, notice and hint rows plus a bordered session panel with four lines.
const LAYOUT_MIN_HEIGHT: u16 = 2 + 6 + 1 + 2;

/// Smallest terminal the recorder screen and its dialog fit in.
pub const MIN_WIDTH: u16 = POPUP_MIN_WIDTH;
pub const MIN_HEIGHT: u16 = if LAYOUT_MIN_HEIGHT > POPUP_HEIGHT {
    LAYOUT_MIN_HEIGHT
} else {
    POPUP_HEIGHT
};

pub fn draw(f: &mut Frame<'_>, app: &RecorderApp, now: DateTime<Local>) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_main(f, chunks[1], app, now);
    draw_notice(f, chunks[2], app);
    draw_hint(f, chunks[3], app);

    if let Some(dialog) = app.recorder.dialog() {
        draw_dialog(f, size, dialog);
    }
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &RecorderApp) {
    let status = app.recorder.session().status();
    let status_style = match status {
        SessionStatus::Idle => Style::default().fg(Color::Gray),
        SessionStatus::Recording => Style::default().fg(Color::Green),
        SessionStatus::Ended => Style::default().fg(Color::Cyan),
    };
    let label = StateTransition::label(status);
    let line = Line::from(vec![
        Span::styled(
            "Session Recorder",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Status: "),
        Span::styled(label, status_style),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_main(f: &mut Frame<'_>, area: Rect, app: &RecorderApp, now: DateTime<Local>) {
    let session = app.recorder.session();
    let value = Style::default().fg(Color::Gray);
    let participant = session.participant_id().unwrap_or("(asked on first mark)");
    let last_mark = session
        .last_mark()
        .map(|m| format!("#{} at {}", m.sequence_id, m.time_of_day()))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![
            Span::raw("Participant: "),
            Span::styled(participant.to_string(), value),
        ]),
        Line::from(vec![
            Span::raw("Elapsed:     "),
            Span::styled(format_elapsed(session.elapsed_secs(now)), value),
        ]),
        Line::from(vec![
            Span::raw("Marks:       "),
            Span::styled(session.marks().len().to_string(), value),
        ]),
        Line::from(vec![
            Span::raw("Last mark:   "),
            Span::styled(last_mark, value),
        ]),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Session"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn draw_notice(f: &mut Frame<'_>, area: Rect, app: &RecorderApp) {
    let Some(notice) = app.notice.as_ref() else {
        return;
    };
    let style = match notice.level {
        NoticeLevel::Info => Style::default().fg(Color::Cyan),
        NoticeLevel::Warn => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => Style::default().fg(Color::Red),
    };
    f.render_widget(
        Paragraph::new(Span::styled(notice.text.clone(), style)),
        area,
    );
}

fn draw_hint(f: &mut Frame<'_>, area: Rect, app: &RecorderApp) {
    let hint = if app.recorder.dialog_open() {
        "Enter: confirm  Esc: skip  Ctrl+C: end session"
    } else {
        "Enter/e: record timestamp  r: end session and save  Ctrl+C: end session"
    };
    let widget = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(hint, Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::TOP))
    .alignment(Alignment::Left);
    f.render_widget(widget, area);
}

fn draw_dialog(f: &mut Frame<'_>, area: Rect, dialog: &Dialog) {
    let popup = centered_rect(area, 60, POPUP_HEIGHT);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(dialog.title());
    let inner = block.inner(popup);
    let input = dialog.input();
    let lines = vec![
        Line::from(dialog.prompt()),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(input.text().to_string()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), popup);

    f.set_cursor_position(cursor_position(inner, input.cursor_column()));
}

/// Cursor cell after the "> " prefix, clamped to the dialog's inner area.
fn cursor_position(inner: Rect, column: usize) -> (u16, u16) {
    let max_x = inner.x.saturating_add(inner.width.saturating_sub(1));
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(2).saturating_add(column).min(max_x);
    (x, inner.y.saturating_add(2))
}

/// `percent_x` of the width, `height` rows, centred.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_x) / 100;
    let width = u16::try_from(scaled)
        .unwrap_or(u16::MAX)
        .max(POPUP_MIN_WIDTH)
        .min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn format_elapsed(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}
