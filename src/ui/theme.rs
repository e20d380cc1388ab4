use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn placeholder() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn token() -> Style {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    }

    pub fn token_remove() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn option_normal() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn option_highlighted() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn no_matches() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success_message() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn submit_enabled() -> Style {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }

    pub fn submit_disabled() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Color::Cyan).bg(Color::DarkGray)
    }
}
