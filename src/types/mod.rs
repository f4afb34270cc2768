//! Core data types for the Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Interval mode and run status
//! - Timer configuration with validation
//! - The timer state machine driven by the engine

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerMode
// ============================================================================

/// The kind of interval currently counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work interval
    #[default]
    Work,
    /// Break between work intervals
    Break,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::Break => "break",
        }
    }

    /// Returns the label shown in status text.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::Break => "Break",
        }
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Lifecycle status of the countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Constructed, never started
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Loop alive, ticking suspended
    Paused,
    /// Halted by the stop control
    Stopped,
    /// Final work interval finished
    Completed,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Stopped => "stopped",
            TimerStatus::Completed => "completed",
        }
    }

    /// Returns true while a run is in progress, paused or not.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerStatus::Running | TimerStatus::Paused)
    }

    /// Returns true if seconds are currently being counted down.
    pub fn is_ticking(&self) -> bool {
        *self == TimerStatus::Running
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Upper bound for work and break durations, in minutes.
pub const MAX_INTERVAL_MINUTES: u32 = 24 * 60;
/// Upper bound for the number of cycles.
pub const MAX_CYCLES: u32 = 999;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_CYCLES: u32 = 1;

/// Durations and cycle count fixed for the lifetime of a timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work interval length in seconds
    pub work_seconds: u32,
    /// Break interval length in seconds
    pub break_seconds: u32,
    /// Number of work/break cycles in a run
    pub total_cycles: u32,
    /// Start a fresh run after the final cycle instead of halting
    pub restart_on_complete: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_MINUTES * 60,
            break_seconds: DEFAULT_BREAK_MINUTES * 60,
            total_cycles: DEFAULT_CYCLES,
            restart_on_complete: false,
        }
    }
}

impl TimerConfig {
    /// Builds a configuration from minutes as entered by the user.
    ///
    /// Returns an error message if any value is out of range.
    pub fn from_minutes(
        work_minutes: u32,
        break_minutes: u32,
        total_cycles: u32,
    ) -> Result<Self, String> {
        if !(1..=MAX_INTERVAL_MINUTES).contains(&work_minutes) {
            return Err(format!(
                "work duration must be between 1 and {} minutes",
                MAX_INTERVAL_MINUTES
            ));
        }
        if !(1..=MAX_INTERVAL_MINUTES).contains(&break_minutes) {
            return Err(format!(
                "break duration must be between 1 and {} minutes",
                MAX_INTERVAL_MINUTES
            ));
        }

        let config = Self {
            work_seconds: work_minutes * 60,
            break_seconds: break_minutes * 60,
            total_cycles,
            restart_on_complete: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration directly from seconds.
    pub fn from_seconds(
        work_seconds: u32,
        break_seconds: u32,
        total_cycles: u32,
    ) -> Result<Self, String> {
        let config = Self {
            work_seconds,
            break_seconds,
            total_cycles,
            restart_on_complete: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets whether a finished run starts over on its own.
    pub fn with_restart_on_complete(mut self, restart: bool) -> Self {
        self.restart_on_complete = restart;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_seconds == 0 {
            return Err("work duration must be positive".to_string());
        }
        if self.break_seconds == 0 {
            return Err("break duration must be positive".to_string());
        }
        if !(1..=MAX_CYCLES).contains(&self.total_cycles) {
            return Err(format!(
                "number of cycles must be between 1 and {}",
                MAX_CYCLES
            ));
        }
        Ok(())
    }

    /// Returns the full length of an interval of the given mode.
    pub fn duration_of(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_seconds,
            TimerMode::Break => self.break_seconds,
        }
    }
}

// ============================================================================
// Transition
// ============================================================================

/// What happened when an interval ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A work interval finished and a break began
    BreakStarted {
        /// The cycle whose work interval just finished
        completed_cycle: u32,
    },
    /// A break finished and the next cycle's work interval began
    WorkResumed {
        /// The cycle now in progress
        cycle: u32,
    },
    /// The final work interval finished
    AllCyclesComplete,
}

// ============================================================================
// TimerState
// ============================================================================

/// The countdown state machine.
///
/// Owned by exactly one [`TimerEngine`](crate::engine::TimerEngine); every
/// mutation happens on the tick loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Run status
    pub status: TimerStatus,
    /// Current interval kind
    pub mode: TimerMode,
    /// Seconds left in the current interval
    pub time_left_seconds: u32,
    /// 1-indexed cycle in progress
    pub current_cycle: u32,
    /// Fixed durations and cycle count
    pub config: TimerConfig,
}

impl TimerState {
    /// Creates an idle state at the start of the first work interval.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            status: TimerStatus::Idle,
            mode: TimerMode::Work,
            time_left_seconds: config.work_seconds,
            current_cycle: 1,
            config,
        }
    }

    /// Returns true while a run is in progress, paused or not.
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Returns true if the timer is paused.
    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    /// Returns true if the next tick will decrement.
    pub fn is_ticking(&self) -> bool {
        self.status.is_ticking()
    }

    /// Starts counting down from the current position.
    ///
    /// Returns false without changing anything if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Toggles between running and paused.
    ///
    /// Returns false if no run is in progress.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            TimerStatus::Running => self.status = TimerStatus::Paused,
            TimerStatus::Paused => self.status = TimerStatus::Running,
            _ => return false,
        }
        true
    }

    /// Halts the countdown and rewinds the current interval.
    ///
    /// Mode and cycle are left untouched. Returns false, changing nothing,
    /// unless the timer is running or paused.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.status = TimerStatus::Stopped;
        self.time_left_seconds = self.config.duration_of(self.mode);
        true
    }

    /// Restores construction-time values and starts a new run.
    pub fn reset(&mut self) {
        self.rewind();
        self.status = TimerStatus::Running;
    }

    /// Decrements the timer by one second.
    ///
    /// Returns true if the current interval has run out.
    pub fn tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }
        if self.time_left_seconds > 0 {
            self.time_left_seconds -= 1;
        }
        self.time_left_seconds == 0
    }

    /// Moves to the next interval after the current one ran out.
    pub fn advance_interval(&mut self) -> Transition {
        match self.mode {
            TimerMode::Work if self.current_cycle < self.config.total_cycles => {
                self.mode = TimerMode::Break;
                self.time_left_seconds = self.config.break_seconds;
                Transition::BreakStarted {
                    completed_cycle: self.current_cycle,
                }
            }
            TimerMode::Work => {
                self.rewind();
                self.status = if self.config.restart_on_complete {
                    TimerStatus::Running
                } else {
                    TimerStatus::Completed
                };
                Transition::AllCyclesComplete
            }
            TimerMode::Break => {
                self.mode = TimerMode::Work;
                self.time_left_seconds = self.config.work_seconds;
                self.current_cycle += 1;
                Transition::WorkResumed {
                    cycle: self.current_cycle,
                }
            }
        }
    }

    /// Returns the remaining time as `MM:SS`.
    pub fn formatted_time(&self) -> String {
        format_time(self.time_left_seconds)
    }

    /// Returns the status line shown under the clock.
    pub fn status_text(&self) -> String {
        if self.status == TimerStatus::Completed {
            return "All cycles complete!".to_string();
        }

        let base = format!(
            "Cycle {}/{} - {} Time",
            self.current_cycle,
            self.config.total_cycles,
            self.mode.label()
        );
        match self.status {
            TimerStatus::Paused => format!("{} (Paused)", base),
            TimerStatus::Stopped => format!("{} (Stopped)", base),
            _ => base,
        }
    }

    fn rewind(&mut self) {
        self.mode = TimerMode::Work;
        self.time_left_seconds = self.config.work_seconds;
        self.current_cycle = 1;
    }
}

/// Formats seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour reads `60:00`.
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
