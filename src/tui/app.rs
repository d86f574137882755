//! Application state for the terminal front end.

use crossterm::event::KeyCode;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use super::input::move_cursor;
use super::view::BoardView;
use crate::games::memory::{CardId, GameSession, Phase, SessionConfig, Timings};
use crate::scheduler::RealtimeScheduler;
use crate::store::ScoreStore;

/// Session type driven by the terminal.
pub type TuiSession = GameSession<RealtimeScheduler, Box<dyn ScoreStore>, BoardView>;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Mode and difficulty selection.
    Menu,
    /// A session is on the table.
    Playing,
}

/// Terminal application state.
pub struct App {
    session: TuiSession,
    screen: Screen,
    selection: SessionConfig,
    menu_best: Option<u32>,
    cursor: usize,
    error: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates the app on the menu screen.
    #[instrument(skip(store))]
    pub fn new(store: Box<dyn ScoreStore>, selection: SessionConfig, timings: Timings) -> Self {
        let session = GameSession::new(RealtimeScheduler::new(), store, BoardView::new())
            .with_timings(timings);
        let mut app = Self {
            session,
            screen: Screen::Menu,
            selection,
            menu_best: None,
            cursor: 0,
            error: None,
            should_quit: false,
        };
        app.refresh_menu_best();
        app
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Mode and difficulty highlighted on the menu.
    pub fn selection(&self) -> SessionConfig {
        self.selection
    }

    /// Stored record for the highlighted selection.
    pub fn menu_best(&self) -> Option<u32> {
        self.menu_best
    }

    /// Card under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Error from the last failed start, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The session.
    pub fn session(&self) -> &TuiSession {
        &self.session
    }

    /// The session, mutably.
    pub fn session_mut(&mut self) -> &mut TuiSession {
        &mut self.session
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts a session straight away, skipping the menu.
    #[instrument(skip(self))]
    pub fn start(&mut self, config: SessionConfig) {
        self.selection = config;
        match self.session.start(config) {
            Ok(()) => {
                info!(%config, "Game started from TUI");
                self.screen = Screen::Playing;
                self.cursor = 0;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Could not start game");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.selection.mode = cycle(self.selection.mode, -1),
            KeyCode::Down => self.selection.mode = cycle(self.selection.mode, 1),
            KeyCode::Left => self.selection.difficulty = cycle(self.selection.difficulty, -1),
            KeyCode::Right => self.selection.difficulty = cycle(self.selection.difficulty, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let config = self.selection;
                self.start(config);
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => return,
        }
        self.refresh_menu_best();
    }

    fn handle_game_key(&mut self, key: KeyCode) {
        let len = self.session.state().cards().len();
        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key, len);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if matches!(self.session.phase(), Phase::Over(_)) {
                    self.reset();
                } else {
                    let result = self.session.flip(CardId(self.cursor));
                    debug!(cursor = self.cursor, ?result, "Flip");
                }
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('m') | KeyCode::Esc => {
                self.session.abandon();
                self.screen = Screen::Menu;
                self.refresh_menu_best();
            }
            KeyCode::Char('q') => {
                self.session.abandon();
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        if let Err(e) = self.session.reset() {
            warn!(error = %e, "Reset failed");
            self.error = Some(e.to_string());
        }
    }

    fn refresh_menu_best(&mut self) {
        let SessionConfig { mode, difficulty } = self.selection;
        self.menu_best = self.session.best_score(mode, difficulty);
    }
}

/// Steps through an enum's variants, wrapping at both ends.
fn cycle<T: IntoEnumIterator + PartialEq + Copy>(current: T, step: isize) -> T {
    let all: Vec<T> = T::iter().collect();
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    let len = all.len() as isize;
    all[(idx + step).rem_euclid(len) as usize]
}
