use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::db::StateStore;
use crate::export::{ExportFormat, SystemClipboard};
use crate::ui::app::{App, EditTarget, InputMode, Screen};
use crate::ui::commands;

/// Rows taken by everything but the category list: tab, status and command
/// bars, the amount panel, the allocation panel and the list borders.
const CATEGORY_LIST_CHROME: u16 = 3 + 4 + 6 + 2;

pub(crate) fn as_tui(store: &dyn StateStore, config: &Config) -> Result<()> {
    let allocation = crate::load_allocation(store, config)?;
    let profit = crate::load_profit(store)?;
    let mut app = App::new(allocation, profit, config.export_dir());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "TUI exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &dyn StateStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let list_height = f.area().height.saturating_sub(CATEGORY_LIST_CHROME) as usize;
            app.visible_rows = list_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app, store),
                InputMode::Confirm => handle_confirm_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &dyn StateStore) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.goto_top(),
        KeyCode::Char('G') => app.goto_bottom(),
        KeyCode::Char('1') => switch_screen(app, Screen::Breakdown),
        KeyCode::Char('2') => switch_screen(app, Screen::Profit),
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else if idx == 0 {
                screens.len() - 1
            } else {
                idx - 1
            };
            switch_screen(app, screens[next]);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('c') => app.cycle_currency(store),
        KeyCode::Esc => app.status_message.clear(),
        _ => match app.screen {
            Screen::Breakdown => handle_breakdown_key(key, app, store),
            Screen::Profit => handle_profit_key(key, app),
        },
    }
    Ok(())
}

fn handle_breakdown_key(key: event::KeyEvent, app: &mut App, store: &dyn StateStore) {
    let selected = app.selected_category().map(|c| c.id.clone());
    match key.code {
        KeyCode::Char('a') => {
            app.add_category(store);
        }
        KeyCode::Enter | KeyCode::Char('e') => match selected {
            Some(id) => app.begin_edit(EditTarget::CategoryName(id)),
            None => app.set_status("No categories yet. Press a to add one"),
        },
        KeyCode::Char('p') | KeyCode::Char('%') => match selected {
            Some(id) => app.begin_edit(EditTarget::CategoryPercentage(id)),
            None => app.set_status("No categories yet. Press a to add one"),
        },
        KeyCode::Char('t') => app.begin_edit(EditTarget::TotalAmount),
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('R') => app.request_reset(),
        KeyCode::Char('y') => app.copy(&SystemClipboard),
        KeyCode::Char('x') => app.export(ExportFormat::Text, None),
        KeyCode::Char('X') => app.export(ExportFormat::Csv, None),
        _ => {}
    }
}

fn handle_profit_key(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => {
            let field = app.selected_profit_field();
            app.begin_edit(EditTarget::Profit(field));
        }
        KeyCode::Char('C') => app.request_clear_profit(),
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &dyn StateStore) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

/// Every keystroke is applied and saved immediately, so leaving the editor
/// never needs to commit anything.
fn handle_editing_input(key: event::KeyEvent, app: &mut App, store: &dyn StateStore) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.finish_edit(),
        KeyCode::Tab => app.edit_next_field(),
        KeyCode::Backspace => app.edit_pop(store),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.set_edit_input(String::new(), store);
        }
        KeyCode::Char(c) => app.edit_push(c, store),
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &dyn StateStore) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm(store);
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_confirm();
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}
