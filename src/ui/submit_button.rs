use crate::form::FormState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, form: &FormState, focused: bool) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Disabled while a submission is in flight, like a submit button
    // during form submission.
    let (label, style) = if form.submitting {
        ("[ Submitting... ]", Theme::submit_disabled())
    } else {
        ("[ Submit ]", Theme::submit_enabled())
    };
    let paragraph = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
