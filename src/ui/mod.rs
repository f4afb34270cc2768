//! Terminal window for the Pomodoro timer.
//!
//! Runs on the main thread while the engine ticks on its own thread:
//! - `app`: the view model and key → action mapping
//! - `render`: ratatui drawing
//!
//! The loop drains pending [`UiUpdate`]s, redraws, then waits up to
//! [`POLL_INTERVAL`] for a key.

pub mod app;
pub mod render;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info, warn};

use crate::engine::TimerHandle;
use crate::surface::{DisplayUpdate, UiUpdate};

pub use app::{Action, TimerView};

/// How long to wait for a key before redrawing.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Opens the window and runs it until the user quits or the engine exits.
///
/// The terminal is restored before returning, also on error.
pub fn run_window(
    handle: &TimerHandle,
    updates: &Receiver<UiUpdate>,
    initial: DisplayUpdate,
) -> anyhow::Result<()> {
    let mut terminal = setup_terminal().context("Failed to open terminal window")?;
    let mut view = TimerView::new(initial);

    let result = event_loop(&mut terminal, handle, updates, &mut view);

    if let Err(e) = restore_terminal(&mut terminal) {
        warn!("Failed to restore terminal: {}", e);
    }
    result
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn event_loop(
    terminal: &mut Tui,
    handle: &TimerHandle,
    updates: &Receiver<UiUpdate>,
    view: &mut TimerView,
) -> anyhow::Result<()> {
    loop {
        view.drain(updates);
        if view.engine_gone {
            info!("Timer engine exited, closing window");
            return Ok(());
        }

        terminal
            .draw(|frame| render::draw(frame, view))
            .context("Failed to draw window")?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(action) = Action::from_key(key) else {
            continue;
        };

        debug!(%action, "Key action");
        view.on_action(action);
        if let Err(e) = action.send(handle) {
            warn!(%action, "Control not delivered: {}", e);
            return Ok(());
        }
        if action == Action::Quit {
            info!("Quit requested from window");
            return Ok(());
        }
    }
}
