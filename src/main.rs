//! Pomodoro Cycles - a terminal Pomodoro timer
//!
//! Alternates work and break intervals for a fixed number of cycles:
//! - Settings come from options or startup prompts
//! - The countdown runs on its own thread
//! - A terminal window (or headless line output) shows the time

use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, error, info, warn};

use pomodoro_cycles::cli::{Cli, Commands, Display, InputError, Prompter, RunArgs};
use pomodoro_cycles::engine::{TimerCommand, TimerEngine, TimerHandle};
use pomodoro_cycles::sound::{resolve_alarm, try_create_player, SoundSource};
use pomodoro_cycles::surface::{
    ChannelSurface, DisplaySurface, DisplayUpdate, LineFormat, LineSurface,
};
use pomodoro_cycles::types::{TimerConfig, TimerState};
use pomodoro_cycles::ui::{self, Action};

/// Log file used while the terminal window is open.
const DEFAULT_LOG_FILE: &str = "pomodoro-cycles.log";

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return;
    }

    // Initialize logging
    init_tracing(cli.verbose, log_destination(&cli.run).as_deref());
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    // Execute the run
    if let Err(e) = run(cli.run) {
        error!("{:#}", e);
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Where logs go: the given file, a temp file in window mode, or stderr.
fn log_destination(args: &RunArgs) -> Option<PathBuf> {
    match (&args.log_file, args.headless) {
        (Some(path), _) => Some(path.clone()),
        (None, false) => Some(std::env::temp_dir().join(DEFAULT_LOG_FILE)),
        (None, true) => None,
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool, log_file: Option<&Path>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => match File::create(path) {
            Ok(file) => {
                fmt()
                    .with_env_filter(filter)
                    .with_target(false)
                    .without_time()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            Err(e) => {
                Display::show_error(&format!(
                    "Cannot open log file {}: {}",
                    path.display(),
                    e
                ));
            }
        },
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .with_writer(io::stderr)
                .init();
        }
    }
}

/// Collects settings and runs the timer until the user quits.
fn run(args: RunArgs) -> Result<()> {
    let config = match collect_config(&args) {
        Ok(config) => config,
        Err(InputError::Cancelled(field)) => {
            info!(field, "Startup cancelled");
            return Err(anyhow!("Input cancelled at {}", field));
        }
        Err(e) => return Err(e).context("Failed to read timer settings"),
    };

    let alarm = if args.no_sound {
        None
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Some(resolve_alarm(args.sound.as_deref(), &cwd))
    };
    info!(?config, alarm = ?alarm.as_ref().map(SoundSource::name), "Starting timer");

    let (handle, commands) = TimerHandle::channel();

    if args.headless {
        let format = if args.json {
            LineFormat::Json
        } else {
            LineFormat::Text
        };
        if format == LineFormat::Text {
            Display::show_settings(&config);
            Display::show_headless_help();
        }
        let surface = Box::new(LineSurface::new(io::stdout(), format));
        let worker = spawn_engine(config, commands, surface, alarm)?;

        read_controls(handle, io::stdin().lock())?;
        join_engine(worker)?;
    } else {
        if let Some(path) = log_destination(&args) {
            Display::show_log_location(&path);
        }
        let (surface, updates) = ChannelSurface::new();
        let initial = DisplayUpdate::from_state(&TimerState::new(config.clone()));
        let worker = spawn_engine(config, commands, Box::new(surface), alarm)?;

        let result = ui::run_window(&handle, &updates, initial);
        if handle.shutdown().is_err() {
            debug!("Engine already exited");
        }
        drop(handle);
        join_engine(worker)?;
        result?;
    }

    Ok(())
}

fn collect_config(args: &RunArgs) -> Result<TimerConfig, InputError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Prompter::new(stdin.lock(), stdout.lock()).collect(args)
}

type EngineThread = thread::JoinHandle<Result<TimerState>>;

/// Starts the engine on its own thread with a current-thread runtime.
///
/// The audio output stream cannot leave the thread that opened it, so the
/// alarm player is created in here.
fn spawn_engine(
    config: TimerConfig,
    commands: tokio::sync::mpsc::UnboundedReceiver<TimerCommand>,
    surface: Box<dyn DisplaySurface + Send>,
    alarm: Option<SoundSource>,
) -> Result<EngineThread> {
    thread::Builder::new()
        .name("timer".to_string())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("Failed to build timer runtime")?;

            let mut engine = TimerEngine::new(config, commands, surface);
            if let Some(source) = alarm {
                match try_create_player() {
                    Some(player) => engine = engine.with_alarm(Box::new(player), source),
                    None => warn!("Audio output unavailable, alarm disabled"),
                }
            }

            Ok(runtime.block_on(engine.run()))
        })
        .context("Failed to start timer thread")
}

fn join_engine(worker: EngineThread) -> Result<()> {
    let state = worker
        .join()
        .map_err(|_| anyhow!("Timer thread panicked"))??;
    debug!(status = state.status.as_str(), "Timer thread finished");
    Ok(())
}

/// Reads headless controls from `input`, one per line, until `q` or EOF.
///
/// On EOF the handle is dropped and the engine finishes its run on its own.
fn read_controls(handle: TimerHandle, input: impl BufRead) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read controls")?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(action) = Action::from_line(&line) else {
            warn!(control = line.trim(), "Unknown control");
            continue;
        };

        debug!(%action, "Control received");
        if action.send(&handle).is_err() {
            debug!("Engine exited, ignoring further controls");
            return Ok(());
        }
        if action == Action::Quit {
            return Ok(());
        }
    }

    debug!("Controls closed, letting the run finish");
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_destination() {
        let window = RunArgs::default();
        assert_eq!(
            log_destination(&window),
            Some(std::env::temp_dir().join(DEFAULT_LOG_FILE))
        );

        let headless = RunArgs {
            headless: true,
            ..RunArgs::default()
        };
        assert_eq!(log_destination(&headless), None);

        let explicit = RunArgs {
            headless: true,
            log_file: Some(PathBuf::from("/tmp/x.log")),
            ..RunArgs::default()
        };
        assert_eq!(log_destination(&explicit), Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn test_read_controls_stops_at_quit() {
        let (handle, mut rx) = TimerHandle::channel();
        let input = io::Cursor::new("p\n\nbogus\nq\nr\n");

        read_controls(handle, input).unwrap();

        assert!(matches!(rx.try_recv(), Ok(TimerCommand::PauseOrContinue)));
        assert!(matches!(rx.try_recv(), Ok(TimerCommand::Shutdown)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_read_controls_engine_gone() {
        let (handle, rx) = TimerHandle::channel();
        drop(rx);
        assert!(read_controls(handle, io::Cursor::new("s\n")).is_ok());
    }
}
