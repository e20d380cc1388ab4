mod layout;
mod multiselect_field;
mod select_field;
mod status_bar;
mod submit_button;
mod text_field;
mod theme;

use crate::app::state::{AppState, FormFocus};
use crate::form::Control;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, state.form.field_count());

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", state.form.title),
        Theme::title(),
    )));
    frame.render_widget(title, app_layout.title_bar);

    for (i, field) in state.form.fields.iter().enumerate() {
        let focused = state.focused_field() == Some(i);
        let field_area = app_layout.fields[i];
        match &field.control {
            Control::Text(input) => text_field::render(frame, field_area, field, input, focused),
            Control::Select(select) => {
                select_field::render(frame, field_area, field, select, focused)
            }
            Control::MultiSelect(ms) => {
                multiselect_field::render(frame, field_area, field, ms, focused)
            }
        }
    }

    submit_button::render(
        frame,
        app_layout.submit,
        &state.form,
        state.focus == FormFocus::Submit,
    );
    status_bar::render(frame, app_layout.status_bar, state);

    // Open dropdowns render last so they sit above the fields below them.
    for (i, field) in state.form.fields.iter().enumerate() {
        let field_area = app_layout.fields[i];
        match &field.control {
            Control::Select(select) if select.open => {
                select_field::render_dropdown(frame, field_area, select)
            }
            Control::MultiSelect(ms) if ms.open => {
                multiselect_field::render_dropdown(frame, field_area, ms)
            }
            _ => {}
        }
    }
}

/// One-line validation message under a field box, red like the reference
/// error rendering.
fn render_error_line(frame: &mut Frame, area: Rect, error: Option<&str>) {
    let Some(message) = error else { return };
    if area.height < 4 {
        return;
    }
    let rect = Rect::new(area.x + 1, area.y + 3, area.width.saturating_sub(1), 1);
    let paragraph = Paragraph::new(message).style(Theme::error_message());
    frame.render_widget(paragraph, rect);
}
