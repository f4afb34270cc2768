//! Alarm playback errors.
//!
//! Playback is best-effort: the engine logs these and keeps ticking.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why an alarm could not be played.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output could be opened.
    #[error("no audio output device: {0}")]
    DeviceNotAvailable(String),

    /// The alarm file could not be opened.
    #[error("cannot open alarm file {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The alarm file is not audio rodio understands.
    #[error("cannot decode alarm file {}: {reason}", .path.display())]
    Undecodable { path: PathBuf, reason: String },

    /// The output stream refused a new sink.
    #[error("audio stream rejected playback: {0}")]
    StreamError(String),
}

impl SoundError {
    /// A broken file can be replaced by the beep; a broken device cannot.
    #[must_use]
    pub fn should_fallback_to_beep(&self) -> bool {
        matches!(self, Self::FileUnreadable { .. } | Self::Undecodable { .. })
    }

    /// Hint logged next to the error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "run with --no-sound to silence this warning",
            Self::FileUnreadable { .. } => "check the --sound path; a beep is played instead",
            Self::Undecodable { .. } => "use a WAV, MP3, FLAC or OGG file; a beep is played instead",
            Self::StreamError(_) => "check the system audio settings",
        }
    }
}
