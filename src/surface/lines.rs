//! Line-oriented surface for headless runs.

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;

use super::{DisplaySurface, DisplayUpdate, Notice, SurfaceError};

/// Output format of [`LineSurface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineFormat {
    /// `MM:SS  status` and `** message`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Record<'a> {
    Update(&'a DisplayUpdate),
    Notice { notice: &'a Notice, message: String },
}

/// Writes one line per update to any writer, flushing after each line.
#[derive(Debug)]
pub struct LineSurface<W: Write> {
    out: Mutex<W>,
    format: LineFormat,
}

impl<W: Write> LineSurface<W> {
    pub fn new(out: W, format: LineFormat) -> Self {
        Self {
            out: Mutex::new(out),
            format,
        }
    }

    /// Consumes the surface and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, record: &Record<'_>, text: String) -> Result<(), SurfaceError> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match self.format {
            LineFormat::Text => writeln!(out, "{}", text)?,
            LineFormat::Json => {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

impl<W: Write> DisplaySurface for LineSurface<W> {
    fn render(&self, update: &DisplayUpdate) -> Result<(), SurfaceError> {
        let text = format!("{}  {}", update.formatted_time, update.status_text);
        self.write_line(&Record::Update(update), text)
    }

    fn announce(&self, notice: &Notice) -> Result<(), SurfaceError> {
        let message = notice.message();
        let text = format!("** {}", message);
        self.write_line(&Record::Notice { notice, message }, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TimerConfig, TimerState};

    fn sample_update() -> DisplayUpdate {
        let mut state = TimerState::new(TimerConfig::from_seconds(65, 60, 3).unwrap());
        state.start();
        DisplayUpdate::from_state(&state)
    }

    #[test]
    fn test_text_lines() {
        let surface = LineSurface::new(Vec::new(), LineFormat::Text);
        surface.render(&sample_update()).unwrap();
        surface.announce(&Notice::BackToWork).unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(
            output,
            "01:05  Cycle 1/3 - Work Time\n** Break complete! Back to work.\n"
        );
    }

    #[test]
    fn test_json_lines() {
        let surface = LineSurface::new(Vec::new(), LineFormat::Json);
        surface.render(&sample_update()).unwrap();
        surface
            .announce(&Notice::BreakTime { completed_cycle: 1 })
            .unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "update");
        assert_eq!(lines[0]["formatted_time"], "01:05");
        assert_eq!(lines[0]["status"], "running");
        assert_eq!(lines[1]["event"], "notice");
        assert_eq!(lines[1]["notice"]["kind"], "break_time");
        assert_eq!(lines[1]["message"], "Cycle 1 complete! Time for a break.");
    }
}
