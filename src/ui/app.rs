//! Window state and key handling.
//!
//! [`TimerView`] is the window's copy of what the engine last rendered. It
//! is fed from the [`UiUpdate`] channel and never touches the timer state
//! directly; key presses become [`Action`]s sent through the
//! [`TimerHandle`].

use std::fmt;

use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::engine::{TimerError, TimerHandle};
use crate::surface::{DisplayUpdate, Notice, UiUpdate};
use crate::types::{TimerMode, TimerStatus};

// ============================================================================
// Action
// ============================================================================

/// Controls the user can trigger from the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause a running timer, or continue a paused one
    PauseOrContinue,
    /// Halt and rewind the current interval
    Stop,
    /// Start over from cycle 1
    Reset,
    /// Start counting down again after a stop or completion
    Start,
    /// Close the window and end the program
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::PauseOrContinue => write!(f, "pause-or-continue"),
            Action::Stop => write!(f, "stop"),
            Action::Reset => write!(f, "reset"),
            Action::Start => write!(f, "start"),
            Action::Quit => write!(f, "quit"),
        }
    }
}

impl Action {
    /// Maps a key press to an action.
    ///
    /// Key releases and repeats are ignored so each press acts once.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                Some(Action::PauseOrContinue)
            }
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Stop),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
            KeyCode::Enter => Some(Action::Start),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    /// Maps a headless control line (`p`, `s`, `r`, `start`, `q`).
    pub fn from_line(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "continue" => Some(Action::PauseOrContinue),
            "s" | "stop" => Some(Action::Stop),
            "r" | "reset" => Some(Action::Reset),
            "start" => Some(Action::Start),
            "q" | "quit" => Some(Action::Quit),
            _ => None,
        }
    }

    /// Sends this action to the engine.
    pub fn send(self, handle: &TimerHandle) -> Result<(), TimerError> {
        match self {
            Action::PauseOrContinue => handle.pause_or_continue(),
            Action::Stop => handle.stop(),
            Action::Reset => handle.reset(),
            Action::Start => handle.start(),
            Action::Quit => handle.shutdown(),
        }
    }
}

// ============================================================================
// TimerView
// ============================================================================

/// Everything the window draws.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerView {
    /// Last update rendered by the engine
    pub display: DisplayUpdate,
    /// Most recent interval notice
    pub banner: Option<String>,
    /// Set once the engine has gone away
    pub engine_gone: bool,
}

impl TimerView {
    pub fn new(initial: DisplayUpdate) -> Self {
        Self {
            display: initial,
            banner: None,
            engine_gone: false,
        }
    }

    /// Applies one message from the engine.
    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Render(display) => self.display = display,
            UiUpdate::Announce(notice) => self.show_notice(&notice),
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        debug!(?notice, "Notice received");
        self.banner = Some(notice.message());
    }

    /// Applies every pending message without blocking.
    ///
    /// Returns the number of messages applied.
    pub fn drain(&mut self, updates: &Receiver<UiUpdate>) -> usize {
        let mut applied = 0;
        loop {
            match updates.try_recv() {
                Ok(update) => {
                    self.apply(update);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.engine_gone {
                        debug!("Update channel closed");
                    }
                    self.engine_gone = true;
                    break;
                }
            }
        }
        applied
    }

    /// Clears the banner when the user takes over.
    pub fn on_action(&mut self, action: Action) {
        if matches!(action, Action::Reset | Action::Start) {
            self.banner = None;
        }
    }

    /// Label for the pause/continue control.
    pub fn pause_label(&self) -> &'static str {
        match self.display.status {
            TimerStatus::Paused => "Continue",
            _ => "Pause",
        }
    }

    /// Whether the pause/continue control currently does anything.
    pub fn can_pause(&self) -> bool {
        self.display.status.is_running()
    }

    /// Whether Enter would start the timer.
    pub fn can_start(&self) -> bool {
        !self.display.status.is_running()
    }

    pub fn mode(&self) -> TimerMode {
        self.display.mode
    }
}

// ============================================================================
// Tests
// ============================================================================
