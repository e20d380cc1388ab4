use crate::form::multiselect::DROPDOWN_ROWS;
use crate::form::{Field, MultiSelectState};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// The field box: selected-option tokens followed by the search input.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    field: &Field,
    ms: &MultiSelectState,
    focused: bool,
) {
    let box_area = Rect::new(area.x, area.y, area.width, area.height.min(3));
    let (border_style, title_style) = if focused {
        (Theme::border_focused(), Theme::title())
    } else {
        (Theme::border(), Theme::border())
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut spans: Vec<Span> = Vec::new();
    let mut prefix_width = 0usize;
    for option in ms.selected_options() {
        let token = format!(" {} ", option.value);
        prefix_width += token.width() + 2; // token + "✕" + trailing gap
        spans.push(Span::styled(token, Theme::token()));
        spans.push(Span::styled("✕", Theme::token_remove()));
        spans.push(Span::raw(" "));
    }

    if ms.search.text.is_empty() && spans.is_empty() {
        spans.push(Span::styled(field.placeholder.as_str(), Theme::placeholder()));
    } else {
        spans.push(Span::styled(ms.search.text.as_str(), Theme::input_text()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if focused {
        let text_width = ms.search.text[..ms.search.cursor].width();
        let cursor_x = inner.x + (prefix_width + text_width) as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }

    super::render_error_line(frame, area, field.error.as_deref());
}

/// Dropdown popup listing the visible options, with a match-count footer.
/// Drawn after all field boxes so it covers whatever sits below.
pub fn render_dropdown(frame: &mut Frame, area: Rect, ms: &MultiSelectState) {
    let list_y = area.y + 3;
    let available = frame.area().bottom().saturating_sub(list_y);
    let rows = ms.visible_len().clamp(1, DROPDOWN_ROWS);
    let height = ((rows as u16) + 2).min(available);
    if height < 3 || area.width < 8 {
        return;
    }
    let popup = Rect::new(area.x, list_y, area.width, height);

    frame.render_widget(Clear, popup);
    let footer = format!(" {} / {} shown ", ms.visible_len(), ms.pool().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_focused())
        .title_bottom(Line::from(Span::styled(footer, Theme::placeholder())));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if ms.visible_len() == 0 {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No matches.",
            Theme::no_matches(),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    let start = ms.scroll_offset.min(ms.visible_len().saturating_sub(1));
    let mut lines: Vec<Line> = Vec::new();
    for (vis_i, option) in ms
        .visible_options()
        .enumerate()
        .skip(start)
        .take(inner.height as usize)
    {
        let style = if vis_i == ms.highlighted {
            Theme::option_highlighted()
        } else {
            Theme::option_normal()
        };
        lines.push(Line::from(Span::styled(
            format!(" {:<width$}", option.value, width = inner.width as usize - 1),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}
