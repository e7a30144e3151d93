//! Application state and logic for the Huemark TUI.
//!
//! State updates are pure with respect to the terminal: `App::update`
//! consumes a [`Msg`] and returns the [`Effect`]s to perform, while the
//! imperative shell in `cmd` executes them. The bookmark store is injected
//! behind the [`BookmarkStore`] trait so tests can run against the
//! in-memory backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use huemark_types::{Bookmark, Palette, PALETTE_SIZE};
use huemark_util::{random_palette, BookmarkStore};
use ratatui::widgets::ListState;
use tracing::warn;

/// How long the copy acknowledgment stays on a palette slot.
pub const COPY_ACK_TTL: Duration = Duration::from_millis(1500);

/// Upper bound on retained log lines.
const MAX_LOG_LINES: usize = 500;

/// Represents the current focus area in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Palette slot row
    #[default]
    Palette,
    /// Bookmark name input field
    Name,
    /// Bookmark URL input field
    Url,
    /// Bookmark list
    List,
}

/// Transient check mark shown on a slot after a successful clipboard write.
///
/// A single deadline is kept for the whole palette: starting a new copy
/// replaces it, cancelling the previous pending reversion, so two
/// reversions never race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyAck {
    pub slot: usize,
    pub until: Instant,
}

/// State for the palette panel.
#[derive(Debug)]
pub struct PaletteState {
    /// The five colors currently on display
    pub palette: Palette,
    /// Selected slot index
    pub selected: usize,
    /// Pending copy acknowledgment, if any
    pub copied: Option<CopyAck>,
}

/// State for the bookmark panel.
pub struct BookmarksState {
    /// Name input field contents
    pub name_input: String,
    /// URL input field contents
    pub url_input: String,
    /// Rendered entries, kept in sync with the store
    pub entries: Vec<Bookmark>,
    /// Selected list index
    pub selected: usize,
    /// Ratatui list scroll state
    pub list_state: ListState,
}

/// Blocking validation alert, rendered as a modal over everything else.
#[derive(Debug, Default)]
pub struct AlertState {
    pub message: Option<String>,
}

/// Application log lines shown in the bottom panel.
#[derive(Debug)]
pub struct LogsState {
    pub entries: Vec<String>,
}

/// The main application state containing all UI data.
pub struct App {
    /// Current focus area
    pub focus: Focus,
    /// Palette panel state
    pub palette: PaletteState,
    /// Bookmark panel state
    pub bookmarks: BookmarksState,
    /// Validation alert modal
    pub alert: AlertState,
    /// Log panel state
    pub logs: LogsState,
    /// Injected bookmark repository
    pub store: Arc<dyn BookmarkStore>,
    /// Set when the user asked to exit
    pub should_quit: bool,
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Move focus to the next UI element
    FocusNext,
    /// Move focus to the previous UI element
    FocusPrev,
    /// Regenerate all five palette slots
    GeneratePalette,
    /// Move selection in the focused list by the given offset
    MoveSelection(isize),
    /// Copy the hex value of a specific slot
    CopySlot(usize),
    /// Copy the hex value of the selected slot
    CopySelected,
    /// Add a character to the focused input field
    InputChar(char),
    /// Remove a character from the focused input field
    InputBackspace,
    /// Validate the inputs and add the bookmark
    SubmitBookmark,
    /// Remove the selected bookmark everywhere it appears
    RemoveSelected,
    /// Dismiss the alert modal
    CloseAlert,
    /// Periodic UI tick (copy acknowledgment expiry)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Exit the application
    Quit,
}

/// Side effects to be performed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request to copy a slot's hex value to the clipboard.
    CopyHexRequested { slot: usize, text: String },
}

impl App {
    /// Creates a new application instance over the given store.
    ///
    /// Generates the initial palette and loads the persisted bookmarks in
    /// insertion order before any other bookmark operation can run.
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        let mut logs = LogsState {
            entries: vec!["Welcome to Huemark".into()],
        };
        let entries = match store.list() {
            Ok(entries) => entries,
            Err(error) => {
                warn!("failed to load bookmarks: {error}");
                logs.entries.push(format!("Failed to load bookmarks: {error}"));
                Vec::new()
            }
        };

        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            focus: Focus::default(),
            palette: PaletteState {
                palette: random_palette(&mut rand::rng()),
                selected: 0,
                copied: None,
            },
            bookmarks: BookmarksState {
                name_input: String::new(),
                url_input: String::new(),
                entries,
                selected: 0,
                list_state,
            },
            alert: AlertState::default(),
            logs,
            store,
            should_quit: false,
        }
    }

    /// Records a successful clipboard write. Replaces any pending
    /// acknowledgment, restarting the reversion deadline.
    pub fn mark_copied(&mut self, slot: usize) {
        self.palette.copied = Some(CopyAck {
            slot,
            until: Instant::now() + COPY_ACK_TTL,
        });
    }

    /// Appends a line to the log panel, bounding its size.
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.entries.push(line.into());
        let len = self.logs.entries.len();
        if len > MAX_LOG_LINES {
            let _ = self.logs.entries.drain(0..len - MAX_LOG_LINES);
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Name => Some(&mut self.bookmarks.name_input),
            Focus::Url => Some(&mut self.bookmarks.url_input),
            Focus::Palette | Focus::List => None,
        }
    }

    fn sync_entries_from_store(&mut self) {
        match self.store.list() {
            Ok(entries) => self.bookmarks.entries = entries,
            Err(error) => {
                warn!("failed to reload bookmarks: {error}");
                self.push_log(format!("Failed to reload bookmarks: {error}"));
            }
        }
        let len = self.bookmarks.entries.len();
        self.bookmarks.selected = self.bookmarks.selected.min(len.saturating_sub(1));
        if len == 0 {
            self.bookmarks.list_state.select(None);
        } else {
            self.bookmarks.list_state.select(Some(self.bookmarks.selected));
        }
    }

    fn submit_bookmark(&mut self) {
        let bookmark = match Bookmark::new(&self.bookmarks.name_input, &self.bookmarks.url_input) {
            Ok(bookmark) => bookmark,
            Err(error) => {
                // Validation failure: alert, no state mutation.
                self.alert.message = Some(error.to_string());
                return;
            }
        };

        if let Err(error) = self.store.append(bookmark.clone()) {
            warn!("failed to save bookmark: {error}");
            self.push_log(format!("Failed to save bookmark: {error}"));
            return;
        }

        self.bookmarks.entries.push(bookmark.clone());
        self.bookmarks.name_input.clear();
        self.bookmarks.url_input.clear();
        self.focus = Focus::Name;
        if self.bookmarks.list_state.selected().is_none() {
            self.bookmarks.list_state.select(Some(0));
        }
        self.push_log(format!("Added {bookmark}"));
    }

    fn remove_selected(&mut self) {
        let Some(entry) = self.bookmarks.entries.get(self.bookmarks.selected).cloned() else {
            return;
        };
        match self.store.remove_matching(&entry.name, &entry.url) {
            Ok(removed) => {
                self.push_log(format!("Removed {removed} bookmark(s) matching {entry}"));
            }
            Err(error) => {
                warn!("failed to remove bookmark: {error}");
                self.push_log(format!("Failed to remove bookmark: {error}"));
            }
        }
        self.sync_entries_from_store();
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Palette => {
                let max = PALETTE_SIZE.saturating_sub(1);
                self.palette.selected = step(self.palette.selected, delta, max);
            }
            Focus::List => {
                if self.bookmarks.entries.is_empty() {
                    return;
                }
                let max = self.bookmarks.entries.len() - 1;
                self.bookmarks.selected = step(self.bookmarks.selected, delta, max);
                self.bookmarks.list_state.select(Some(self.bookmarks.selected));
            }
            Focus::Name | Focus::Url => {}
        }
    }

    /// Updates the application state based on a message and returns the
    /// side effects to perform.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        let mut effects = Vec::new();

        // The alert is blocking: only dismissal and ticks get through.
        if self.alert.message.is_some() && !matches!(msg, Msg::CloseAlert | Msg::Tick | Msg::Quit) {
            return effects;
        }

        match msg {
            Msg::FocusNext => {
                self.focus = match self.focus {
                    Focus::Palette => Focus::Name,
                    Focus::Name => Focus::Url,
                    Focus::Url => Focus::List,
                    Focus::List => Focus::Palette,
                };
            }
            Msg::FocusPrev => {
                self.focus = match self.focus {
                    Focus::Palette => Focus::List,
                    Focus::Name => Focus::Palette,
                    Focus::Url => Focus::Name,
                    Focus::List => Focus::Url,
                };
            }
            Msg::GeneratePalette => {
                self.palette.palette = random_palette(&mut rand::rng());
                self.palette.copied = None;
            }
            Msg::MoveSelection(delta) => self.move_selection(delta),
            Msg::CopySlot(slot) => {
                if let Some(color) = self.palette.palette.get(slot) {
                    self.palette.selected = slot;
                    effects.push(Effect::CopyHexRequested {
                        slot,
                        text: color.as_str().to_string(),
                    });
                }
            }
            Msg::CopySelected => {
                let slot = self.palette.selected;
                if let Some(color) = self.palette.palette.get(slot) {
                    effects.push(Effect::CopyHexRequested {
                        slot,
                        text: color.as_str().to_string(),
                    });
                }
            }
            Msg::InputChar(c) => {
                if let Some(input) = self.focused_input_mut() {
                    input.push(c);
                }
            }
            Msg::InputBackspace => {
                if let Some(input) = self.focused_input_mut() {
                    input.pop();
                }
            }
            Msg::SubmitBookmark => self.submit_bookmark(),
            Msg::RemoveSelected => self.remove_selected(),
            Msg::CloseAlert => {
                self.alert.message = None;
            }
            Msg::Tick => {
                if let Some(ack) = self.palette.copied
                    && Instant::now() >= ack.until
                {
                    self.palette.copied = None;
                }
            }
            Msg::Resize(_, _) => {}
            Msg::Quit => {
                self.should_quit = true;
            }
        }
        effects
    }
}

fn step(current: usize, delta: isize, max: usize) -> usize {
    let next = if delta > 0 {
        current.saturating_add(delta as usize)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    };
    next.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huemark_util::InMemoryBookmarkStore;

    fn app_with_store() -> (App, Arc<InMemoryBookmarkStore>) {
        let store = Arc::new(InMemoryBookmarkStore::new());
        let app = App::new(Arc::clone(&store) as Arc<dyn BookmarkStore>);
        (app, store)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(Msg::InputChar(c));
        }
    }

    fn add_bookmark(app: &mut App, name: &str, url: &str) {
        app.focus = Focus::Name;
        type_text(app, name);
        app.update(Msg::FocusNext);
        type_text(app, url);
        app.update(Msg::SubmitBookmark);
    }

    #[test]
    fn valid_submission_persists_and_clears_inputs() {
        let (mut app, store) = app_with_store();
        add_bookmark(&mut app, "GitHub", "https://github.com");

        assert!(app.alert.message.is_none());
        assert!(app.bookmarks.name_input.is_empty());
        assert!(app.bookmarks.url_input.is_empty());
        assert_eq!(app.focus, Focus::Name);
        assert_eq!(app.bookmarks.entries.len(), 1);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn invalid_scheme_alerts_without_mutation() {
        let (mut app, store) = app_with_store();
        add_bookmark(&mut app, "x", "ftp://x");

        assert!(app.alert.message.is_some());
        assert!(app.bookmarks.entries.is_empty());
        assert!(store.list().unwrap().is_empty());
        // Inputs survive so the user can correct them.
        assert_eq!(app.bookmarks.url_input, "ftp://x");
    }

    #[test]
    fn empty_fields_alert_without_mutation() {
        let (mut app, store) = app_with_store();
        app.focus = Focus::Url;
        type_text(&mut app, "https://github.com");
        app.update(Msg::SubmitBookmark);

        assert!(app.alert.message.is_some());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn alert_blocks_input_until_dismissed() {
        let (mut app, _store) = app_with_store();
        add_bookmark(&mut app, "x", "ftp://x");
        assert!(app.alert.message.is_some());

        app.update(Msg::InputChar('z'));
        assert!(!app.bookmarks.url_input.contains('z'));

        app.update(Msg::CloseAlert);
        assert!(app.alert.message.is_none());
    }

    #[test]
    fn remove_selected_drops_entry_from_store_and_list() {
        let (mut app, store) = app_with_store();
        add_bookmark(&mut app, "A", "https://a.example");
        add_bookmark(&mut app, "B", "https://b.example");

        app.focus = Focus::List;
        app.bookmarks.selected = 0;
        app.update(Msg::RemoveSelected);

        let names: Vec<&str> = app.bookmarks.entries.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["B"]);
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.list().unwrap()[0].name, "B");
    }

    #[test]
    fn remove_selected_drops_duplicates_everywhere() {
        let (mut app, store) = app_with_store();
        add_bookmark(&mut app, "A", "https://a.example");
        add_bookmark(&mut app, "A", "https://a.example");

        app.focus = Focus::List;
        app.bookmarks.selected = 1;
        app.update(Msg::RemoveSelected);

        assert!(app.bookmarks.entries.is_empty());
        assert!(store.list().unwrap().is_empty());
        assert_eq!(app.bookmarks.list_state.selected(), None);
    }

    #[test]
    fn startup_renders_persisted_entries_in_order() {
        let store = Arc::new(InMemoryBookmarkStore::new());
        store.append(Bookmark::new("A", "https://a.example").unwrap()).unwrap();
        store.append(Bookmark::new("B", "https://b.example").unwrap()).unwrap();

        let app = App::new(store);
        let names: Vec<&str> = app.bookmarks.entries.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(app.bookmarks.list_state.selected(), Some(0));
    }

    #[test]
    fn copy_requests_surface_as_effects() {
        let (mut app, _store) = app_with_store();
        let effects = app.update(Msg::CopySlot(2));
        assert_eq!(effects.len(), 1);
        let Effect::CopyHexRequested { slot, text } = &effects[0];
        assert_eq!(*slot, 2);
        assert_eq!(text, app.palette.palette.get(2).unwrap().as_str());
    }

    #[test]
    fn copy_ack_expires_on_tick() {
        let (mut app, _store) = app_with_store();
        app.palette.copied = Some(CopyAck {
            slot: 0,
            until: Instant::now() - Duration::from_millis(1),
        });
        app.update(Msg::Tick);
        assert!(app.palette.copied.is_none());
    }

    #[test]
    fn new_copy_replaces_pending_ack() {
        let (mut app, _store) = app_with_store();
        app.mark_copied(0);
        let first = app.palette.copied.unwrap();
        app.mark_copied(3);
        let second = app.palette.copied.unwrap();

        assert_eq!(second.slot, 3);
        assert!(second.until >= first.until);
        app.update(Msg::Tick);
        // Fresh deadline has not elapsed.
        assert!(app.palette.copied.is_some());
    }

    #[test]
    fn generate_replaces_all_five_slots() {
        let (mut app, _store) = app_with_store();
        let before = app.palette.palette.clone();
        app.update(Msg::GeneratePalette);
        assert_eq!(app.palette.palette.colors().len(), PALETTE_SIZE);
        assert_ne!(app.palette.palette, before);
    }

    #[test]
    fn focus_cycles_through_all_areas() {
        let (mut app, _store) = app_with_store();
        let mut seen = vec![app.focus];
        for _ in 0..3 {
            app.update(Msg::FocusNext);
            seen.push(app.focus);
        }
        assert_eq!(seen, [Focus::Palette, Focus::Name, Focus::Url, Focus::List]);
        app.update(Msg::FocusNext);
        assert_eq!(app.focus, Focus::Palette);
        app.update(Msg::FocusPrev);
        assert_eq!(app.focus, Focus::List);
    }
}
