use crate::app::state::{AppState, StatusKind};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    let message_style = match state.status_message.as_ref().map(|m| m.kind) {
        Some(StatusKind::Error) => Theme::error_message().bg(Color::DarkGray),
        Some(StatusKind::Info) => Theme::success_message().bg(Color::DarkGray),
        None => Theme::status_bar(),
    };
    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        message_style,
    ));

    parts.push(Span::styled(
        " Tab Next · Enter Pick · Ctrl+Space Toggle · Ctrl+R Reset · Ctrl+C Quit ",
        Theme::status_bar(),
    ));

    // Pad to push the focus indicator to the right edge
    let focus_name = state.focus_label();
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.width() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Theme::key_hint(),
    ));

    let line = Line::from(parts);
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}
