//! # Huemark TUI Library
//!
//! Terminal interface for Huemark: a random palette generator with
//! clipboard copy on the left, a persistent bookmark manager on the right,
//! and a log panel below.
//!
//! ## Architecture
//!
//! The crate follows a functional-core / imperative-shell split:
//! `app` owns pure state updates (`App::update(Msg) -> Vec<Effect>`),
//! `cmd` executes the resulting effects (clipboard writes), `ui` renders,
//! and this module owns the terminal lifecycle and the event loop.

mod app;
mod cmd;
mod theme;
mod ui;

pub use app::{App, Effect, Focus, Msg};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use huemark_util::BookmarkStore;
use ratatui::{prelude::*, Terminal};

/// Poll interval driving `Msg::Tick`; short enough that the 1500 ms copy
/// acknowledgment reverts promptly.
const TICK_INTERVAL: Duration = Duration::from_millis(125);

/// Runs the main TUI application loop over the provided bookmark store.
///
/// Sets up the terminal (raw mode, alternate screen), drives the event
/// loop, and restores the terminal on the way out, including on error.
pub fn run(store: Arc<dyn BookmarkStore>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(store);
    let result = event_loop(&mut terminal, &mut app);
    cleanup_terminal(&mut terminal)?;
    result
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let msg = if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => map_key(app, key),
                Event::Resize(w, h) => Some(Msg::Resize(w, h)),
                _ => None,
            }
        } else {
            Some(Msg::Tick)
        };

        if let Some(msg) = msg {
            let effects = app.update(msg);
            let cmds = cmd::from_effects(effects);
            cmd::run_cmds(app, cmds);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Route a key press to a message based on the current focus.
fn map_key(app: &App, key: KeyEvent) -> Option<Msg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }

    if app.alert.message.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Msg::CloseAlert),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => return Some(Msg::FocusNext),
        KeyCode::BackTab => return Some(Msg::FocusPrev),
        KeyCode::Esc => return Some(Msg::Quit),
        _ => {}
    }

    match app.focus {
        Focus::Palette => match key.code {
            KeyCode::Char('q') => Some(Msg::Quit),
            KeyCode::Char('g') | KeyCode::Char('r') => Some(Msg::GeneratePalette),
            KeyCode::Up | KeyCode::Left => Some(Msg::MoveSelection(-1)),
            KeyCode::Down | KeyCode::Right => Some(Msg::MoveSelection(1)),
            KeyCode::Enter | KeyCode::Char('c') => Some(Msg::CopySelected),
            KeyCode::Char(c @ '1'..='5') => {
                Some(Msg::CopySlot(c as usize - '1' as usize))
            }
            _ => None,
        },
        Focus::Name | Focus::Url => match key.code {
            KeyCode::Enter => Some(Msg::SubmitBookmark),
            KeyCode::Backspace => Some(Msg::InputBackspace),
            KeyCode::Char(c) => Some(Msg::InputChar(c)),
            _ => None,
        },
        Focus::List => match key.code {
            KeyCode::Char('q') => Some(Msg::Quit),
            KeyCode::Up => Some(Msg::MoveSelection(-1)),
            KeyCode::Down => Some(Msg::MoveSelection(1)),
            KeyCode::Char('d') | KeyCode::Delete => Some(Msg::RemoveSelected),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huemark_util::InMemoryBookmarkStore;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Arc::new(InMemoryBookmarkStore::new()))
    }

    #[test]
    fn ctrl_c_always_quits() {
        let app = app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&app, key), Some(Msg::Quit));
    }

    #[test]
    fn digits_map_to_slot_copies() {
        let app = app();
        assert_eq!(map_key(&app, press(KeyCode::Char('1'))), Some(Msg::CopySlot(0)));
        assert_eq!(map_key(&app, press(KeyCode::Char('5'))), Some(Msg::CopySlot(4)));
        assert_eq!(map_key(&app, press(KeyCode::Char('6'))), None);
    }

    #[test]
    fn typed_characters_reach_the_focused_input() {
        let mut app = app();
        app.focus = Focus::Name;
        assert_eq!(map_key(&app, press(KeyCode::Char('g'))), Some(Msg::InputChar('g')));
        app.focus = Focus::Palette;
        assert_eq!(map_key(&app, press(KeyCode::Char('g'))), Some(Msg::GeneratePalette));
    }

    #[test]
    fn alert_swallows_everything_but_dismissal() {
        let mut app = app();
        app.alert.message = Some("invalid URL format".into());
        assert_eq!(map_key(&app, press(KeyCode::Char('g'))), None);
        assert_eq!(map_key(&app, press(KeyCode::Enter)), Some(Msg::CloseAlert));
        assert_eq!(map_key(&app, press(KeyCode::Esc)), Some(Msg::CloseAlert));
    }
}
