use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::app::{App, Focus, UiState};
use crate::models::Story;

fn field_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.border } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
}

pub fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            "StoryForm",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.server_url), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

pub fn render_prompt_field(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Prompt;
    let (text, style) = if app.form.prompt.is_empty() {
        ("Enter a story prompt...", Style::default().fg(Color::Gray))
    } else {
        (
            app.form.prompt.as_str(),
            Style::default().fg(theme.border).add_modifier(Modifier::BOLD),
        )
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(field_block(" Prompt ", focused, theme));

    frame.render_widget(input, area);
}

fn render_selector(frame: &mut Frame, title: &str, value: &str, focused: bool, theme: &Theme, area: Rect) {
    let line = if focused {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(theme.border)),
            Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", Style::default().fg(theme.border)),
        ])
    } else {
        Line::from(format!("  {value}"))
    };

    let selector = Paragraph::new(line).block(field_block(title, focused, theme));
    frame.render_widget(selector, area);
}

pub fn render_genre_selector(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    render_selector(frame, " Genre ", &app.form.genre, app.focus == Focus::Genre, theme, area);
}

pub fn render_length_selector(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    render_selector(frame, " Length ", &app.form.length, app.focus == Focus::Length, theme, area);
}

/// Single line, only drawn while an error is showing.
pub fn render_error_region(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(message) = app.error_message() else {
        return;
    };
    let error = Paragraph::new(Span::raw(message.to_string()))
        .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD));
    frame.render_widget(error, area);
}

pub fn render_output_panel(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match &app.ui_state {
        UiState::Loading => render_loading(frame, theme, area),
        UiState::ShowingResult(story) => render_story(frame, app, story, theme, area),
        UiState::Idle | UiState::ShowingError(_) => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Press Enter to generate a story",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center)
            .block(field_block(" Story ", false, theme));
            frame.render_widget(hint, area);
        }
    }
}

fn render_loading(frame: &mut Frame, theme: &Theme, area: Rect) {
    let loading = Paragraph::new(Line::from(Span::styled(
        "Generating your story...",
        Style::default().fg(theme.accent).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .block(field_block(" Story ", false, theme));
    frame.render_widget(loading, area);
}

fn render_story(frame: &mut Frame, app: &App, story: &Story, theme: &Theme, area: Rect) {
    let block = field_block(" Story ", true, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    // Title and content are plain text; nothing is interpreted as markup
    let mut text = Text::from(Line::from(Span::styled(
        story.title.clone(),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.extend(Text::raw(story.content.clone()));

    let content = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));
    frame.render_widget(content, rows[0]);

    let copy_style = if app.copy_confirmed {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };
    let buttons = Line::from(vec![
        Span::styled(format!("[ {} ]", app.copy_label()), copy_style),
        Span::styled(" Ctrl+Y   ", Style::default().fg(Color::DarkGray)),
        Span::styled("[ New Story ]", Style::default().fg(theme.border)),
        Span::styled(" Ctrl+N", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(buttons), rows[1]);
}

pub fn render_examples(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Examples;
    let block = field_block(" Examples ", focused, theme);

    if app.examples.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No examples available",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .examples
        .iter()
        .map(|example| {
            ListItem::new(vec![
                Line::from(example.prompt.clone()),
                Line::from(Span::styled(
                    format!("  {}", example.genre),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let highlight = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(focused.then_some(app.selected_example));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Enter: Generate | Tab: Next Field | Ctrl+L: Clear | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text).alignment(Alignment::Center).style(style);

    frame.render_widget(bar, area);
}

pub fn render_help_window(frame: &mut Frame, theme: &Theme, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled(
            "StoryForm - Keyboard Shortcuts",
            Style::default().fg(theme.border).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Form:", bold)),
        Line::from("  Tab/Shift+Tab - Move between fields"),
        Line::from("  Typing        - Edit the prompt"),
        Line::from("  Left/Right    - Change genre or length"),
        Line::from("  Enter/Ctrl+S  - Generate story"),
        Line::from("  Ctrl+L        - Clear form"),
        Line::from(""),
        Line::from(Span::styled("Examples:", bold)),
        Line::from("  Up/Down       - Choose an example"),
        Line::from("  Enter         - Use it in the form"),
        Line::from(""),
        Line::from(Span::styled("Story:", bold)),
        Line::from("  Ctrl+Y        - Copy to clipboard"),
        Line::from("  Ctrl+N        - Start a new story"),
        Line::from("  PgUp/PgDn     - Scroll"),
        Line::from(""),
        Line::from("  Ctrl+Q        - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(theme.border)),
        )
        .wrap(Wrap { trim: false });

    let popup_width = 50;
    let popup_height = 24;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}
