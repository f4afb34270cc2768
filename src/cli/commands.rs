//! Command-line definitions for the Pomodoro timer.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{MAX_CYCLES, MAX_INTERVAL_MINUTES};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro timer - work and break intervals in your terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-cycles",
    version,
    about = "Terminal Pomodoro timer",
    long_about = "Alternates work and break intervals for a fixed number of cycles,\n\
                  sounding an alarm at every boundary.\n\
                  Settings not given as options are asked for on startup.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer settings
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Arguments for a timer run
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work duration in minutes (asked for if omitted)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_INTERVAL_MINUTES as i64)
    )]
    pub work: Option<u32>,

    /// Break duration in minutes (asked for if omitted)
    #[arg(
        short = 'b',
        long = "break",
        value_parser = clap::value_parser!(u32).range(1..=MAX_INTERVAL_MINUTES as i64)
    )]
    pub break_time: Option<u32>,

    /// Number of work/break cycles (asked for if omitted)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CYCLES as i64)
    )]
    pub cycles: Option<u32>,

    /// Alarm sound file (defaults to ./alarm.wav, or a beep)
    #[arg(long, value_name = "PATH", conflicts_with = "no_sound")]
    pub sound: Option<PathBuf>,

    /// Disable the alarm sound
    #[arg(long)]
    pub no_sound: bool,

    /// Start over automatically after the last cycle
    #[arg(long)]
    pub repeat: bool,

    /// Print updates as lines and read controls from stdin instead of
    /// opening the terminal window
    #[arg(long)]
    pub headless: bool,

    /// Print headless updates as JSON lines
    #[arg(long, requires = "headless")]
    pub json: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================
