//! CLI module for the Pomodoro timer.
//!
//! This module provides the command-line side of the program:
//! - `commands`: Argument definitions using clap derive
//! - `prompt`: Startup prompts for work/break minutes and cycle count
//! - `display`: Console messages outside the terminal window

pub mod commands;
pub mod display;
pub mod prompt;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use prompt::{InputError, Prompter};
