use crate::form::{Field, TextInputState};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    field: &Field,
    input: &TextInputState,
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

    if input.text.is_empty() {
        let paragraph = Paragraph::new(field.placeholder.as_str()).style(Theme::placeholder());
        frame.render_widget(paragraph, inner);
    } else {
        let paragraph = Paragraph::new(input.text.as_str()).style(Theme::input_text());
        frame.render_widget(paragraph, inner);
    }

    if focused {
        let cursor_x = inner.x + input.text[..input.cursor].width() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }

    super::render_error_line(frame, area, field.error.as_deref());
}
