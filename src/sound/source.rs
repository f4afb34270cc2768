//! Sound source selection.
//!
//! The alarm is either an audio file on disk or a generated beep tone. The
//! beep needs no assets, so it doubles as the fallback when the file is
//! missing or unreadable.

use std::path::{Path, PathBuf};

/// Alarm file looked up in the working directory when none is configured.
pub const DEFAULT_ALARM_FILE: &str = "alarm.wav";

const BEEP_FREQUENCY_HZ: u32 = 880;
const BEEP_MILLIS: u64 = 700;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file decoded by rodio (WAV, FLAC, MP3, Vorbis).
    File {
        /// Path to the audio file.
        path: PathBuf,
    },
    /// A generated sine tone.
    Beep {
        /// Tone frequency.
        frequency_hz: u32,
        /// Tone length.
        millis: u64,
    },
}

impl SoundSource {
    /// Creates a file sound source.
    ///
    /// The path is not checked here; playback falls back to a beep if it
    /// cannot be opened.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates the default beep tone.
    #[must_use]
    pub fn beep() -> Self {
        Self::Beep {
            frequency_hz: BEEP_FREQUENCY_HZ,
            millis: BEEP_MILLIS,
        }
    }

    /// Returns a short human-readable name for logs.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Beep { frequency_hz, .. } => format!("beep {}Hz", frequency_hz),
        }
    }

    /// Returns true if this is a file source.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this is a generated tone.
    #[must_use]
    pub fn is_beep(&self) -> bool {
        matches!(self, Self::Beep { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path),
            Self::Beep { .. } => None,
        }
    }
}

/// Picks the alarm sound.
///
/// An explicitly configured path is always used as given. Otherwise
/// [`DEFAULT_ALARM_FILE`] is used when it exists in `search_dir`, and the beep
/// when it does not.
#[must_use]
pub fn resolve_alarm(configured: Option<&Path>, search_dir: &Path) -> SoundSource {
    if let Some(path) = configured {
        return SoundSource::file(path);
    }

    let candidate = search_dir.join(DEFAULT_ALARM_FILE);
    if candidate.is_file() {
        SoundSource::file(candidate)
    } else {
        tracing::debug!(
            "No {} in {}, using beep",
            DEFAULT_ALARM_FILE,
            search_dir.display()
        );
        SoundSource::beep()
    }
}
