//! Timer engine error types.

use thiserror::Error;

/// Errors reported by the timer engine and its handle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Start was requested while a run is in progress.
    #[error("timer is already running")]
    AlreadyRunning,

    /// Durations or cycle count out of range.
    #[error("invalid timer settings: {0}")]
    InvalidConfig(String),

    /// The engine loop has exited and no longer accepts commands.
    #[error("timer engine is no longer running")]
    EngineGone,
}
