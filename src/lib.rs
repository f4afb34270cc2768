//! Pomodoro Cycles Library
//!
//! This library provides the core functionality for the terminal Pomodoro
//! timer. It includes:
//! - Timer state and configuration types
//! - Timer engine driving the one-second countdown
//! - Display surfaces for the terminal window and headless output
//! - Sound playback for the interval alarm
//! - CLI parsing and startup prompts
//! - Terminal window (ratatui)

pub mod cli;
pub mod engine;
pub mod sound;
pub mod surface;
pub mod types;
pub mod ui;

// Re-export commonly used types for convenience
pub use types::{format_time, TimerConfig, TimerMode, TimerState, TimerStatus, Transition};

// Re-export engine types
pub use engine::{TimerCommand, TimerEngine, TimerError, TimerHandle};

// Re-export surface types
pub use surface::{
    ChannelSurface, DisplaySurface, DisplayUpdate, LineFormat, LineSurface, MockSurface, Notice,
    SurfaceError, UiUpdate,
};

// Re-export sound types
pub use sound::{
    resolve_alarm, try_create_player, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer,
    SoundSource,
};
