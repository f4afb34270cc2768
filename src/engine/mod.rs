//! Engine module for the Pomodoro timer.
//!
//! - `timer`: the tick loop that owns the timer state, plus the command
//!   handle used by the window
//! - `error`: engine error types

pub mod error;
pub mod timer;

pub use error::TimerError;
pub use timer::{TimerCommand, TimerEngine, TimerHandle, TICK};
