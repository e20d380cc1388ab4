use crate::form::{Field, SelectState};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, field: &Field, select: &SelectState, focused: bool) {
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

    let line = match select.selected_option() {
        Some(option) => Line::from(vec![
            Span::styled(option.value.as_str(), Theme::input_text()),
            Span::styled(" ▾", Theme::placeholder()),
        ]),
        None => Line::from(vec![
            Span::styled("Choose...", Theme::placeholder()),
            Span::styled(" ▾", Theme::placeholder()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), inner);

    super::render_error_line(frame, area, field.error.as_deref());
}

/// Dropdown popup under the field box. Drawn after all field boxes so it
/// covers whatever sits below.
pub fn render_dropdown(frame: &mut Frame, area: Rect, select: &SelectState) {
    let list_y = area.y + 3;
    let available = frame.area().bottom().saturating_sub(list_y);
    let rows = select.options().len().max(1);
    let height = ((rows as u16) + 2).min(available);
    if height < 3 || area.width < 4 {
        return;
    }
    let popup = Rect::new(area.x, list_y, area.width, height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    for (i, option) in select.options().iter().enumerate().take(inner.height as usize) {
        let style = if i == select.highlighted {
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
