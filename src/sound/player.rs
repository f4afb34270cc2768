//! Alarm playback through rodio.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

const BEEP_VOLUME: f32 = 0.25;

/// Plays alarms on the default audio output.
///
/// The output stream is not `Send`, so the player must be created on the
/// thread that plays the alarm. Playback is non-blocking; sounds continue
/// in the background.
pub struct RodioSoundPlayer {
    /// Kept alive for as long as sinks may play.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no output device can be
    /// opened.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays `source`, replacing an unusable file with the beep.
    ///
    /// # Errors
    ///
    /// Returns an error if neither the file nor the fallback beep could be
    /// handed to the output device.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { path } => {
                debug!("Playing alarm file: {}", path.display());
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.should_fallback_to_beep() => {
                        warn!("{}, falling back to beep", e);
                        self.play(&SoundSource::beep())
                    }
                    Err(e) => Err(e),
                }
            }
            SoundSource::Beep {
                frequency_hz,
                millis,
            } => {
                debug!("Playing beep: {}Hz for {}ms", frequency_hz, millis);
                self.play_tone(*frequency_hz, *millis)
            }
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path).map_err(|source| SoundError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| SoundError::Undecodable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        self.play_detached(decoder)
    }

    fn play_tone(&self, frequency_hz: u32, millis: u64) -> Result<(), SoundError> {
        let tone = SineWave::new(frequency_hz as f32)
            .take_duration(Duration::from_millis(millis))
            .amplify(BEEP_VOLUME);

        self.play_detached(tone)
    }

    /// Hands a source to a fresh sink and lets it finish on its own.
    fn play_detached<S>(&self, source: S) -> Result<(), SoundError>
    where
        S: Source + Send + 'static,
        S::Item: rodio::Sample + Send,
        f32: rodio::cpal::FromSample<S::Item>,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(source);
        sink.detach();

        debug!("Alarm playback started");
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Opens the audio output, or returns None with a warning if there is none.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("{} ({})", e, e.suggestion());
            None
        }
    }
}
