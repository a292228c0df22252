pub mod widgets;

use crate::app::App;
use crate::models::ThemeConfig;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Color,
    Frame,
};
use std::str::FromStr;

/// Resolved colors from the `[theme]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub error: Color,
    pub border: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: parse_color(&config.accent_color, Color::Magenta),
            error: parse_color(&config.error_color, Color::Red),
            border: parse_color(&config.border_color, Color::Cyan),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        tracing::warn!(color = name, "unknown theme color, using default");
        fallback
    })
}

/// Draw the whole screen from `app`. Never mutates state.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Prompt input
            Constraint::Length(3), // Genre / length selectors
            Constraint::Length(1), // Error region
            Constraint::Min(0),    // Output + examples
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_header(frame, app, theme, chunks[0]);
    widgets::render_prompt_field(frame, app, theme, chunks[1]);

    let selectors = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    widgets::render_genre_selector(frame, app, theme, selectors[0]);
    widgets::render_length_selector(frame, app, theme, selectors[1]);

    widgets::render_error_region(frame, app, theme, chunks[3]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[4]);
    widgets::render_output_panel(frame, app, theme, body[0]);
    widgets::render_examples(frame, app, theme, body[1]);

    widgets::render_bottom_bar(frame, app, chunks[5]);

    if app.show_help {
        widgets::render_help_window(frame, theme, frame.area());
    }
}
