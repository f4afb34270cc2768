//! Console messages printed outside the terminal window.

use crate::types::TimerConfig;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for console output.
pub struct Display;

impl Display {
    /// Shows the settings a run starts with.
    pub fn show_settings(config: &TimerConfig) {
        println!("{}", Self::settings_line(config));
    }

    /// Shows the control keys available in headless mode.
    pub fn show_headless_help() {
        println!("Controls: p = pause/continue, s = stop, r = reset, start = start, q = quit");
    }

    /// Shows where logs are written while the window is open.
    pub fn show_log_location(path: &std::path::Path) {
        eprintln!("Logging to {}", path.display());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    fn settings_line(config: &TimerConfig) -> String {
        let cycles = if config.total_cycles == 1 {
            "1 cycle".to_string()
        } else {
            format!("{} cycles", config.total_cycles)
        };
        let repeat = if config.restart_on_complete {
            ", repeating"
        } else {
            ""
        };
        format!(
            "Pomodoro: {} min work / {} min break, {}{}",
            config.work_seconds / 60,
            config.break_seconds / 60,
            cycles,
            repeat
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
