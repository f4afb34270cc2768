//! Display surfaces for the Pomodoro timer.
//!
//! The engine renders through the [`DisplaySurface`] capability after every
//! tick and transition, and announces interval changes as [`Notice`]s.
//!
//! - `channel`: forwards everything to the UI thread over crossbeam-channel
//! - `lines`: writes one line per update (headless mode)

mod channel;
mod error;
mod lines;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::types::{TimerMode, TimerState, TimerStatus, Transition};

pub use channel::{ChannelSurface, UiUpdate};
pub use error::SurfaceError;
pub use lines::{LineFormat, LineSurface};

// ============================================================================
// DisplayUpdate
// ============================================================================

/// What the window shows after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    /// Remaining time as `MM:SS`
    pub formatted_time: String,
    /// Status line, e.g. `Cycle 1/4 - Work Time`
    pub status_text: String,
    /// Run status, used to label the pause/continue control
    pub status: TimerStatus,
    /// Current interval kind
    pub mode: TimerMode,
    /// Seconds left in the current interval
    pub time_left_seconds: u32,
    /// Full length of the current interval in seconds
    pub interval_seconds: u32,
}

impl DisplayUpdate {
    /// Builds the update for the given state.
    pub fn from_state(state: &TimerState) -> Self {
        Self {
            formatted_time: state.formatted_time(),
            status_text: state.status_text(),
            status: state.status,
            mode: state.mode,
            time_left_seconds: state.time_left_seconds,
            interval_seconds: state.config.duration_of(state.mode),
        }
    }

    /// Fraction of the current interval already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.interval_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.interval_seconds.saturating_sub(self.time_left_seconds);
        f64::from(elapsed) / f64::from(self.interval_seconds)
    }
}

// ============================================================================
// Notice
// ============================================================================

/// User-facing announcement at an interval boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A work interval finished; break starts
    BreakTime {
        /// The cycle whose work interval finished
        completed_cycle: u32,
    },
    /// A break finished; work starts
    BackToWork,
    /// The final cycle finished
    AllComplete,
}

impl Notice {
    /// Returns the message shown to the user.
    pub fn message(&self) -> String {
        match self {
            Notice::BreakTime { completed_cycle } => {
                format!("Cycle {} complete! Time for a break.", completed_cycle)
            }
            Notice::BackToWork => "Break complete! Back to work.".to_string(),
            Notice::AllComplete => "All cycles complete! Great job!".to_string(),
        }
    }
}

impl From<Transition> for Notice {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::BreakStarted { completed_cycle } => Notice::BreakTime { completed_cycle },
            Transition::WorkResumed { .. } => Notice::BackToWork,
            Transition::AllCyclesComplete => Notice::AllComplete,
        }
    }
}

// ============================================================================
// DisplaySurface
// ============================================================================

/// Sink for display updates and notices.
///
/// Calls are synchronous from the engine's point of view and must not block
/// for long. Errors are logged by the engine and otherwise ignored.
pub trait DisplaySurface {
    /// Shows the current time and status.
    fn render(&self, update: &DisplayUpdate) -> Result<(), SurfaceError>;

    /// Tells the user an interval boundary was crossed.
    fn announce(&self, notice: &Notice) -> Result<(), SurfaceError>;
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Arc<T> {
    fn render(&self, update: &DisplayUpdate) -> Result<(), SurfaceError> {
        (**self).render(update)
    }

    fn announce(&self, notice: &Notice) -> Result<(), SurfaceError> {
        (**self).announce(notice)
    }
}

/// Mock display surface for testing.
#[derive(Debug, Default)]
pub struct MockSurface {
    updates: Mutex<Vec<DisplayUpdate>>,
    notices: Mutex<Vec<Notice>>,
    should_fail: AtomicBool,
}

impl MockSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn updates(&self) -> Vec<DisplayUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// Formatted times of every render, in order.
    #[must_use]
    pub fn rendered_times(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.formatted_time.clone())
            .collect()
    }

    #[must_use]
    pub fn last_update(&self) -> Option<DisplayUpdate> {
        self.updates.lock().unwrap().last().cloned()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.updates.lock().unwrap().clear();
        self.notices.lock().unwrap().clear();
    }
}

impl DisplaySurface for MockSurface {
    fn render(&self, update: &DisplayUpdate) -> Result<(), SurfaceError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SurfaceError::Disconnected);
        }
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }

    fn announce(&self, notice: &Notice) -> Result<(), SurfaceError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SurfaceError::Disconnected);
        }
        self.notices.lock().unwrap().push(*notice);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
