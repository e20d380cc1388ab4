use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows per field: a 3-row bordered box plus one error line.
pub const FIELD_ROWS: u16 = 4;

pub struct AppLayout {
    pub title_bar: Rect,
    pub fields: Vec<Rect>,
    pub submit: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, field_count: usize) -> AppLayout {
    let mut constraints = Vec::with_capacity(field_count + 4);
    constraints.push(Constraint::Length(1)); // Title
    for _ in 0..field_count {
        constraints.push(Constraint::Length(FIELD_ROWS));
    }
    constraints.push(Constraint::Length(3)); // Submit button
    constraints.push(Constraint::Min(0)); // Filler
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    AppLayout {
        title_bar: chunks[0],
        fields: chunks[1..1 + field_count].to_vec(),
        submit: chunks[1 + field_count],
        status_bar: chunks[chunks.len() - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stacks_fields_vertically() {
        let layout = compute_layout(Rect::new(0, 0, 80, 30), 3);
        assert_eq!(layout.fields.len(), 3);
        assert_eq!(layout.title_bar.height, 1);
        assert!(layout.fields.iter().all(|r| r.height == FIELD_ROWS));
        assert_eq!(layout.submit.height, 3);
        assert_eq!(layout.status_bar.y, 29);
    }
}
