//! Alarm playback for the Pomodoro timer.
//!
//! This module provides the audio side of interval boundaries:
//!
//! - Audio file playback through rodio
//! - A generated beep used when no file is configured or the file is broken
//! - Non-blocking playback
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Capability injected into the engine
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  Audio file      │
//! │                  │     │  (--sound PATH)  │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Beep tone       │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomodoro_cycles::sound::{RodioSoundPlayer, SoundSource};
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player.play(&SoundSource::file("alarm.wav")).expect("playback failed");
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{resolve_alarm, SoundSource, DEFAULT_ALARM_FILE};

/// Plays the alarm at interval boundaries.
pub trait SoundPlayer {
    /// Starts playing `source` and returns without waiting for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started. The engine logs
    /// it and keeps ticking.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

/// Mock sound player for testing.
///
/// Records every attempt, failed ones included.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes later plays fail the way a rejected output stream does.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        self.play_calls.lock().unwrap().push(source.clone());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::StreamError("mock stream closed".to_string()));
        }
        Ok(())
    }
}
