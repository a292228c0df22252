mod api;
mod app;
mod config;
mod controller;
mod error;
mod events;
mod logging;
mod models;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use api::StoryClient;
use app::{App, Focus};
use controller::SystemClipboard;
use events::AppEvent;
use ui::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    let args = config::Args::parse();
    let config = config::load(&args)?;

    let _log_guard = logging::init_logging(&config::get_log_dir()?, &config.log_level)?;
    tracing::info!(server_url = %config.server_url, "starting storyform");

    let client = StoryClient::new(&config.server_url, config.request_timeout)?;
    let theme = Theme::from_config(&config.theme);
    let mut app = App::new(client.base_url());
    let clipboard = SystemClipboard::default();

    // Create channel for async events
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    controller::load_examples(&client, &tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &theme, &client, &clipboard, &tx, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %format!("{err:#}"), "terminal loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ExamplesLoaded(examples) => app.append_examples(examples),
        AppEvent::StoryFinished(result) => app.finish_story(result),
        AppEvent::Copied(seq) => app.copy_succeeded(seq),
        AppEvent::CopyFeedbackExpired(seq) => app.copy_feedback_expired(seq),
    }
}

/// Keys that behave the same whatever field has focus. Returns true when
/// the key was consumed.
fn handle_global_keys(
    app: &mut App,
    key: KeyCode,
    modifiers: KeyModifiers,
    client: &StoryClient,
    clipboard: &SystemClipboard,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) -> bool {
    // Quit keys work even with the help window open
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            if app.exit_pending {
                app.quit();
            } else {
                app.exit_pending = true;
            }
            return true;
        }
        KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return true;
        }
        _ => {}
    }

    if app.show_help {
        match key {
            KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => app.toggle_help(),
            KeyCode::Esc if app.exit_pending => app.exit_pending = false,
            KeyCode::Esc => app.show_help = false,
            _ => {}
        }
        return true;
    }

    match key {
        KeyCode::Esc if app.exit_pending => {
            app.exit_pending = false;
            return true;
        }
        _ if app.exit_pending => {
            // Any other key cancels pending exit, then is handled normally
            app.exit_pending = false;
        }
        _ => {}
    }

    if !modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key {
        KeyCode::Char('h') => app.toggle_help(),
        KeyCode::Char('l') => app.clear_form(),
        KeyCode::Char('n') => app.new_story(),
        KeyCode::Char('y') => {
            controller::copy_story(app, clipboard.clone(), event_tx);
        }
        KeyCode::Char('s') => {
            controller::submit_story(app, client, event_tx);
        }
        _ => return false,
    }
    true
}

fn handle_keyboard_input(
    app: &mut App,
    key: KeyCode,
    modifiers: KeyModifiers,
    client: &StoryClient,
    clipboard: &SystemClipboard,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    if handle_global_keys(app, key, modifiers, client, clipboard, event_tx) {
        return;
    }

    match key {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::PageUp => app.scroll_output_up(10),
        KeyCode::PageDown => app.scroll_output_down(10),

        KeyCode::Enter if app.focus == Focus::Examples => app.apply_selected_example(),
        KeyCode::Enter => {
            controller::submit_story(app, client, event_tx);
        }

        KeyCode::Up if app.focus == Focus::Examples => app.select_prev_example(),
        KeyCode::Down if app.focus == Focus::Examples => app.select_next_example(),
        KeyCode::Up => app.scroll_output_up(1),
        KeyCode::Down => app.scroll_output_down(1),

        KeyCode::Left => app.cycle_selection(false),
        KeyCode::Right => app.cycle_selection(true),

        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),

        _ => {}
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
    client: &StoryClient,
    clipboard: &SystemClipboard,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app, theme))?;

        // Apply finished background work before reading input
        while let Ok(app_event) = event_rx.try_recv() {
            handle_app_event(app, app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_keyboard_input(app, key.code, key.modifiers, client, clipboard, event_tx);
                }
            }
        }

        if app.should_quit {
            tracing::info!("quitting");
            break;
        }
    }
    Ok(())
}
