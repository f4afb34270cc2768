//! Startup prompts for timer settings.
//!
//! Asks for work minutes, break minutes and the cycle count, skipping any
//! value already given on the command line. Empty input takes the shown
//! default; invalid input asks again; end of input or `q` cancels startup.

use std::io::{BufRead, Write};

use thiserror::Error;

use super::commands::RunArgs;
use crate::engine::TimerError;
use crate::types::{
    TimerConfig, DEFAULT_BREAK_MINUTES, DEFAULT_CYCLES, DEFAULT_WORK_MINUTES, MAX_CYCLES,
    MAX_INTERVAL_MINUTES,
};

/// Errors raised while collecting settings.
#[derive(Debug, Error)]
pub enum InputError {
    /// The user cancelled a prompt.
    #[error("input cancelled: {0}")]
    Cancelled(&'static str),

    /// Reading or writing the console failed.
    #[error("console error: {0}")]
    Io(#[from] std::io::Error),

    /// The collected values do not form a valid configuration.
    #[error(transparent)]
    Config(#[from] TimerError),
}

/// One integer question.
#[derive(Debug, Clone, Copy)]
struct Question {
    field: &'static str,
    text: &'static str,
    default: u32,
    max: u32,
}

const WORK: Question = Question {
    field: "work duration",
    text: "Enter work duration (in minutes)",
    default: DEFAULT_WORK_MINUTES,
    max: MAX_INTERVAL_MINUTES,
};

const BREAK: Question = Question {
    field: "break duration",
    text: "Enter break duration (in minutes)",
    default: DEFAULT_BREAK_MINUTES,
    max: MAX_INTERVAL_MINUTES,
};

const CYCLES: Question = Question {
    field: "number of cycles",
    text: "Enter number of cycles",
    default: DEFAULT_CYCLES,
    max: MAX_CYCLES,
};

/// Console prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collects the three settings and builds the timer configuration.
    ///
    /// Minutes are converted to seconds here, before the engine sees them.
    pub fn collect(&mut self, args: &RunArgs) -> Result<TimerConfig, InputError> {
        let work = self.value_or_ask(args.work, WORK)?;
        let brk = self.value_or_ask(args.break_time, BREAK)?;
        let cycles = self.value_or_ask(args.cycles, CYCLES)?;

        let config = TimerConfig::from_minutes(work, brk, cycles)
            .map_err(TimerError::InvalidConfig)?
            .with_restart_on_complete(args.repeat);
        tracing::debug!(?config, "Timer settings collected");
        Ok(config)
    }

    fn value_or_ask(&mut self, given: Option<u32>, question: Question) -> Result<u32, InputError> {
        match given {
            Some(value) => Ok(value),
            None => self.ask(question),
        }
    }

    fn ask(&mut self, question: Question) -> Result<u32, InputError> {
        loop {
            write!(self.output, "{} [{}]: ", question.text, question.default)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Err(InputError::Cancelled(question.field));
            }

            match parse_answer(line.trim(), question) {
                Answer::Value(value) => return Ok(value),
                Answer::Cancel => return Err(InputError::Cancelled(question.field)),
                Answer::Invalid => {
                    writeln!(
                        self.output,
                        "Please enter a whole number between 1 and {}.",
                        question.max
                    )?;
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Value(u32),
    Cancel,
    Invalid,
}

fn parse_answer(answer: &str, question: Question) -> Answer {
    if answer.is_empty() {
        return Answer::Value(question.default);
    }
    if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
        return Answer::Cancel;
    }
    match answer.parse::<u32>() {
        Ok(value) if (1..=question.max).contains(&value) => Answer::Value(value),
        _ => Answer::Invalid,
    }
}

// ============================================================================
// Tests
// ============================================================================
