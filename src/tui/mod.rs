//! Terminal UI for Strictly Memory

mod app;
mod input;
mod ui;
mod view;

pub use view::BoardView;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::games::memory::SessionConfig;
use crate::settings::Settings;
use crate::store::{MemoryScoreStore, ScoreStore, SqliteScoreStore};
use app::App;

/// Longest wait for input before timers are pumped again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the terminal game.
///
/// Opens the record database from `settings`, falling back to an in-memory
/// store if it cannot be opened. With `start` set, skips the menu.
#[instrument(skip(settings))]
pub fn run_tui(settings: &Settings, start: Option<SessionConfig>) -> Result<()> {
    info!("Starting Strictly Memory TUI");

    let store: Box<dyn ScoreStore> = match SqliteScoreStore::open(settings.storage().db_path()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Score store unavailable, records will not persist");
            Box::new(MemoryScoreStore::new())
        }
    };

    let mut app = App::new(store, settings.session_config(), settings.session_timings());
    if let Some(config) = start {
        app.start(config);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let wait = app
            .session()
            .scheduler()
            .until_next()
            .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));

        if event::poll(wait)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        app.session_mut().pump();

        if app.should_quit() {
            info!("Quitting");
            return Ok(());
        }
    }
}
